//! In-memory pagination over an already-fetched collection.
//!
//! Listing views fetch their whole collection (products, a seller's books)
//! and hand it to a [`Paginator`], which owns the collection together with
//! the page position. The paginator is created per view and dropped with it.
//!
//! # Conventions
//!
//! - Pages are numbered from 1.
//! - An empty collection has **0** pages; its visible slice is empty.
//! - [`Paginator::set_page`] rejects 0 and clamps anything past the last page
//!   down to the last page (page 1 for an empty collection).
//! - Replacing the collection always puts the paginator back on page 1.
//!
//! ```
//! use bookstall_core::{Paginator, PaginationOptions};
//!
//! let mut pages = Paginator::new((1..=13).collect::<Vec<_>>(), PaginationOptions::default());
//! assert_eq!(pages.total_pages(), 3);
//!
//! pages.set_page(3).unwrap();
//! assert_eq!(pages.visible_items(), &[13]);
//!
//! pages.replace(vec![1, 2]);
//! assert_eq!(pages.current_page(), 1);
//! ```

use std::num::NonZeroUsize;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Page size used when a view does not configure one.
pub const DEFAULT_ITEMS_PER_PAGE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(5);

/// Errors from page navigation requests.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    /// The requested page number is not positive.
    #[error("invalid page {requested}: pages are numbered from 1")]
    InvalidPage {
        /// The page number that was asked for.
        requested: usize,
    },
}

/// Options recognised by [`Paginator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
    /// Number of items on a full page.
    #[serde(default = "default_items_per_page")]
    pub items_per_page: NonZeroUsize,
}

const fn default_items_per_page() -> NonZeroUsize {
    DEFAULT_ITEMS_PER_PAGE
}

impl PaginationOptions {
    /// Options with the given page size.
    #[must_use]
    pub const fn per_page(items_per_page: NonZeroUsize) -> Self {
        Self { items_per_page }
    }
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self::per_page(DEFAULT_ITEMS_PER_PAGE)
    }
}

/// Snapshot of a paginator's navigation state, for templates and JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// A collection plus the page currently being viewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator<T> {
    items: Vec<T>,
    current_page: usize,
    options: PaginationOptions,
}

impl<T> Paginator<T> {
    /// Wrap a collection, starting on page 1.
    #[must_use]
    pub const fn new(items: Vec<T>, options: PaginationOptions) -> Self {
        Self {
            items,
            current_page: 1,
            options,
        }
    }

    /// Wrap a collection and move straight to `page` (page 1 when `None`).
    ///
    /// # Errors
    ///
    /// Returns `PageError::InvalidPage` if `page` is `Some(0)`.
    pub fn at_page(
        items: Vec<T>,
        options: PaginationOptions,
        page: Option<usize>,
    ) -> Result<Self, PageError> {
        let mut paginator = Self::new(items, options);
        if let Some(page) = page {
            paginator.set_page(page)?;
        }
        Ok(paginator)
    }

    /// Swap in a new collection and go back to page 1.
    ///
    /// Any deeper page position is discarded: after a filter or reload the old
    /// page number may point past the end of the new collection.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = 1;
    }

    /// Move to page `page`, returning the page actually selected.
    ///
    /// Requests past the last page land on the last page (page 1 when the
    /// collection is empty).
    ///
    /// # Errors
    ///
    /// Returns `PageError::InvalidPage` if `page` is 0. The current page is
    /// left unchanged in that case.
    pub fn set_page(&mut self, page: usize) -> Result<usize, PageError> {
        if page == 0 {
            return Err(PageError::InvalidPage { requested: page });
        }

        let last = self.total_pages().max(1);
        if page > last {
            tracing::debug!(requested = page, last, "clamping page request");
        }
        self.current_page = page.min(last);
        Ok(self.current_page)
    }

    /// The page currently being viewed (1-based).
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Configured page size.
    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.options.items_per_page.get()
    }

    /// Number of items in the whole collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the whole collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `ceil(len / items_per_page)`; 0 for an empty collection.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.items_per_page())
    }

    /// The slice of the collection on the current page.
    ///
    /// Never panics; a page past the end yields an empty slice.
    #[must_use]
    pub fn visible_items(&self) -> &[T] {
        let (start, end) = self.bounds();
        self.items.get(start..end).unwrap_or_default()
    }

    /// Consume the paginator, keeping only the visible items.
    #[must_use]
    pub fn into_visible(self) -> Vec<T> {
        let (start, end) = self.bounds();
        self.items
            .into_iter()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }

    /// Whether there is a page before the current one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether there is a page after the current one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// The previous page number, if any.
    #[must_use]
    pub fn previous_page(&self) -> Option<usize> {
        self.has_previous().then(|| self.current_page - 1)
    }

    /// The next page number, if any.
    #[must_use]
    pub fn next_page(&self) -> Option<usize> {
        self.has_next().then(|| self.current_page + 1)
    }

    /// Every page number, for rendering page links. Empty when there are no pages.
    #[must_use]
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages()
    }

    /// Navigation state without the items.
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            current_page: self.current_page,
            total_pages: self.total_pages(),
            items_per_page: self.items_per_page(),
            total_items: self.len(),
            has_previous: self.has_previous(),
            has_next: self.has_next(),
        }
    }

    fn bounds(&self) -> (usize, usize) {
        let len = self.items.len();
        let start = (self.current_page - 1)
            .saturating_mul(self.items_per_page())
            .min(len);
        let end = start.saturating_add(self.items_per_page()).min(len);
        (start, end)
    }
}

impl<T> From<Vec<T>> for Paginator<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items, PaginationOptions::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn per_page(n: usize) -> PaginationOptions {
        PaginationOptions::per_page(NonZeroUsize::new(n).unwrap())
    }

    #[test]
    fn test_thirteen_items_make_three_pages() {
        let mut pages = Paginator::new((0..13).collect(), per_page(6));
        assert_eq!(pages.total_pages(), 3);

        assert_eq!(pages.visible_items(), &[0, 1, 2, 3, 4, 5]);
        pages.set_page(3).unwrap();
        assert_eq!(pages.visible_items(), &[12]);
    }

    #[test]
    fn test_empty_collection_has_no_pages() {
        let mut pages: Paginator<u8> = Paginator::new(Vec::new(), per_page(6));
        assert_eq!(pages.total_pages(), 0);
        assert!(pages.visible_items().is_empty());
        assert!(pages.page_numbers().is_empty());

        // Still lands on page 1 rather than failing.
        assert_eq!(pages.set_page(4).unwrap(), 1);
        assert!(pages.visible_items().is_empty());
        assert!(!pages.has_next());
    }

    #[test]
    fn test_pages_partition_the_collection() {
        for size in [1, 2, 3, 5, 6, 7] {
            for len in 0_usize..40 {
                let mut pages = Paginator::new((0..len).collect::<Vec<_>>(), per_page(size));
                assert_eq!(pages.total_pages(), len.div_ceil(size));

                let mut seen = Vec::new();
                for page in pages.page_numbers() {
                    pages.set_page(page).unwrap();
                    assert!(!pages.visible_items().is_empty());
                    seen.extend_from_slice(pages.visible_items());
                }
                assert_eq!(seen, (0..len).collect::<Vec<_>>(), "size={size} len={len}");
            }
        }
    }

    #[test]
    fn test_visible_items_is_idempotent() {
        let mut pages = Paginator::new((0..20).collect(), per_page(6));
        pages.set_page(2).unwrap();
        let first = pages.visible_items().to_vec();
        assert_eq!(pages.visible_items(), first.as_slice());
    }

    #[test]
    fn test_replace_resets_to_first_page() {
        let mut pages = Paginator::new((0..30).collect(), per_page(6));
        pages.set_page(5).unwrap();

        pages.replace((0..8).collect());
        assert_eq!(pages.current_page(), 1);
        assert_eq!(pages.visible_items(), &[0, 1, 2, 3, 4, 5]);

        pages.set_page(2).unwrap();
        pages.replace((100..130).collect());
        assert_eq!(pages.current_page(), 1);
    }

    #[test]
    fn test_set_page_rejects_zero_and_keeps_position() {
        let mut pages = Paginator::new((0..20).collect(), per_page(6));
        pages.set_page(2).unwrap();

        assert_eq!(
            pages.set_page(0),
            Err(PageError::InvalidPage { requested: 0 })
        );
        assert_eq!(pages.current_page(), 2);
    }

    #[test]
    fn test_set_page_clamps_past_the_end() {
        let mut pages = Paginator::new((0..13).collect(), per_page(6));
        assert_eq!(pages.set_page(99).unwrap(), 3);
        assert_eq!(pages.visible_items(), &[12]);
    }

    #[test]
    fn test_navigation_metadata() {
        let mut pages = Paginator::new((0..13).collect::<Vec<u32>>(), per_page(6));
        assert_eq!(pages.previous_page(), None);
        assert_eq!(pages.next_page(), Some(2));

        pages.set_page(2).unwrap();
        let info = pages.page_info();
        assert_eq!(
            info,
            PageInfo {
                current_page: 2,
                total_pages: 3,
                items_per_page: 6,
                total_items: 13,
                has_previous: true,
                has_next: true,
            }
        );

        pages.set_page(3).unwrap();
        assert_eq!(pages.next_page(), None);
        assert_eq!(pages.previous_page(), Some(2));
    }

    #[test]
    fn test_at_page() {
        let pages = Paginator::at_page((0..13).collect(), per_page(6), Some(2)).unwrap();
        assert_eq!(pages.into_visible(), vec![6, 7, 8, 9, 10, 11]);

        let err = Paginator::at_page(vec![1], per_page(6), Some(0)).unwrap_err();
        assert_eq!(err, PageError::InvalidPage { requested: 0 });
    }

    #[test]
    fn test_options_default_to_six() {
        assert_eq!(PaginationOptions::default().items_per_page.get(), 6);

        let parsed: PaginationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, PaginationOptions::default());

        let parsed: PaginationOptions = serde_json::from_str(r#"{"itemsPerPage": 12}"#).unwrap();
        assert_eq!(parsed.items_per_page.get(), 12);

        assert!(serde_json::from_str::<PaginationOptions>(r#"{"itemsPerPage": 0}"#).is_err());
    }

    #[test]
    fn test_page_info_serializes_camel_case() {
        let pages = Paginator::from(vec!['a'; 7]);
        let json = serde_json::to_value(pages.page_info()).unwrap();
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["hasNext"], true);
    }
}
