//! Session-related types.
//!
//! Types stored in the session for authentication state, and the shapes
//! returned by the session endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookstall_core::{Email, Principal, UserId};

use super::User;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// User's display name.
    pub name: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

impl Principal for CurrentUser {
    fn id(&self) -> UserId {
        self.id
    }
}

/// The server-side session behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// Opaque session ID (the cookie value).
    pub id: String,
    /// When the session expires if left idle.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Session keys for authentication and cart data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the shopping cart.
    pub const CART: &str = "cart";
}
