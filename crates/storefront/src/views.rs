//! View helpers shared by paginated listings.

use bookstall_core::{FetchResult, PageInfo, Paginator, PaginationOptions};

use crate::error::Result;

/// One numbered link in a pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: usize,
    pub href: String,
    pub current: bool,
}

/// Everything a template needs to draw a pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub links: Vec<PageLink>,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub info: PageInfo,
}

impl PageLinks {
    /// Build links for `paginator`, preserving the extra query parameters.
    pub fn new<T>(paginator: &Paginator<T>, base: &str, query: &[(&str, &str)]) -> Self {
        let href = |page: usize| page_href(base, query, page);
        let current = paginator.current_page();

        Self {
            links: paginator
                .page_numbers()
                .map(|number| PageLink {
                    number,
                    href: href(number),
                    current: number == current,
                })
                .collect(),
            previous_href: paginator.previous_page().map(href),
            next_href: paginator.next_page().map(href),
            info: paginator.page_info(),
        }
    }

    /// Whether the bar has anything worth drawing.
    #[must_use]
    pub fn is_needed(&self) -> bool {
        self.links.len() > 1
    }
}

fn page_href(base: &str, query: &[(&str, &str)], page: usize) -> String {
    let mut href = format!("{base}?");
    for (key, value) in query.iter().filter(|(_, v)| !v.is_empty()) {
        href.push_str(key);
        href.push('=');
        href.push_str(&urlencoding::encode(value));
        href.push('&');
    }
    href.push_str("page=");
    href.push_str(&page.to_string());
    href
}

/// A listing ready to render: the visible page, or the fetch error verbatim.
pub struct Listing<T> {
    pub items: Vec<T>,
    pub pages: Option<PageLinks>,
    pub error: Option<String>,
}

impl<T> Listing<T> {
    /// Paginate a fetched collection.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` when `page` is zero.
    pub fn build(
        fetched: FetchResult<Vec<T>>,
        options: PaginationOptions,
        page: Option<usize>,
        base: &str,
        query: &[(&str, &str)],
    ) -> Result<Self> {
        match fetched {
            FetchResult::Success(items) => {
                let paginator = Paginator::at_page(items, options, page)?;
                let pages = PageLinks::new(&paginator, base, query);
                Ok(Self {
                    items: paginator.into_visible(),
                    pages: Some(pages),
                    error: None,
                })
            }
            FetchResult::Failure(error) => {
                tracing::warn!(%error, base, "listing fetch failed");
                Ok(Self {
                    items: Vec::new(),
                    pages: None,
                    error: Some(error),
                })
            }
        }
    }

    /// Transform the visible items for display.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        Listing {
            items: self.items.into_iter().map(f).collect(),
            pages: self.pages,
            error: self.error,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    fn options(per_page: usize) -> PaginationOptions {
        PaginationOptions::per_page(NonZeroUsize::new(per_page).unwrap())
    }

    #[test]
    fn test_links_for_middle_page() {
        let paginator = Paginator::at_page((1..=13).collect(), options(6), Some(2)).unwrap();
        let links = PageLinks::new(&paginator, "/products", &[("q", "sci fi")]);

        assert_eq!(links.links.len(), 3);
        assert!(links.links[1].current);
        assert_eq!(links.links[0].href, "/products?q=sci%20fi&page=1");
        assert_eq!(
            links.previous_href.as_deref(),
            Some("/products?q=sci%20fi&page=1")
        );
        assert_eq!(
            links.next_href.as_deref(),
            Some("/products?q=sci%20fi&page=3")
        );
        assert!(links.is_needed());
    }

    #[test]
    fn test_empty_query_values_dropped() {
        assert_eq!(page_href("/p", &[("q", "")], 2), "/p?page=2");
    }

    #[test]
    fn test_single_page_needs_no_bar() {
        let paginator = Paginator::new(vec![1, 2], options(6));
        assert!(!PageLinks::new(&paginator, "/p", &[]).is_needed());
    }

    #[test]
    fn test_listing_failure_keeps_error_verbatim() {
        let listing: Listing<u8> = Listing::build(
            FetchResult::Failure("database offline".into()),
            options(6),
            Some(4),
            "/p",
            &[],
        )
        .unwrap();
        assert!(listing.items.is_empty());
        assert!(listing.pages.is_none());
        assert_eq!(listing.error.as_deref(), Some("database offline"));
    }

    #[test]
    fn test_listing_rejects_page_zero() {
        let result = Listing::build(FetchResult::Success(vec![1]), options(6), Some(0), "/p", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_listing_clamps_high_page() {
        let listing =
            Listing::build(FetchResult::Success((1..=13).collect()), options(6), Some(9), "/p", &[])
                .unwrap();
        assert_eq!(listing.items, vec![13]);
    }
}
