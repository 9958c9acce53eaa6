//! Bookstall Core - Shared types and the two pieces of logic every view relies on.
//!
//! This crate is used by:
//! - `storefront` - Public catalog, cart and the seller dashboard
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure logic - no database
//! access, no HTTP. Collaborators that perform I/O (session lookup, record
//! loading) are expressed as traits and implemented by the storefront.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails and prices
//! - [`pagination`] - In-memory pagination over an already-fetched collection
//! - [`gate`] - Ownership-gated access to mutable resources
//! - [`fetch`] - Success/error envelope produced by collection fetchers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fetch;
pub mod gate;
pub mod pagination;
pub mod types;

pub use fetch::FetchResult;
pub use gate::{GateError, Owned, Principal, ResourceStore, SessionValidator, Validated};
pub use pagination::{PageError, PageInfo, Paginator, PaginationOptions};
pub use types::*;
