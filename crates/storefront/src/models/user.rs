//! User domain types.

use chrono::{DateTime, Utc};

use bookstall_core::{Email, UserId};

/// A storefront account.
///
/// The same account shops the catalog and manages its own books and products
/// from the dashboard.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email, stored normalized.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
