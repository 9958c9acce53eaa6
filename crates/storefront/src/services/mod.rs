//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Password login and account creation

pub mod auth;
