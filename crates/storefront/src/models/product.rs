//! Product domain types.

use chrono::{DateTime, Utc};

use bookstall_core::{Owned, Price, ProductId, UserId};

/// A catalog product.
///
/// Hidden products (`visible = false`) stay in their seller's dashboard but
/// are left out of the public catalog and dropped from carts.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Product {
    fn owner_id(&self) -> UserId {
        self.owner_id
    }
}

impl Product {
    /// Case-insensitive match against the title and description.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Fields for inserting a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub visible: bool,
}
