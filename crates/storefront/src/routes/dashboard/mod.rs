//! Seller dashboard.
//!
//! Listings show only the caller's own records. Every edit, toggle and
//! delete opens its record through [`bookstall_core::gate::open`], so a
//! record owned by someone else is indistinguishable from a missing one.

pub mod books;
pub mod products;

use serde::Deserialize;

/// Page selector shared by dashboard listings.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}
