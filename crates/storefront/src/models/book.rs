//! Book domain types.

use chrono::{DateTime, Utc};
use thiserror::Error;

use bookstall_core::{BookId, Owned, UserId};

/// Longest accepted title or author.
pub const MAX_NAME_LENGTH: usize = 200;

/// Longest accepted description.
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// A book listed by a seller.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Book {
    pub id: BookId,
    /// The seller who listed the book; the only user allowed to edit it.
    pub owner_id: UserId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Book {
    fn owner_id(&self) -> UserId {
        self.owner_id
    }
}

/// Validation failures for [`BookChanges`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookChangesError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Validated editable fields of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub title: String,
    pub author: String,
    pub description: String,
}

impl BookChanges {
    /// Trim and validate raw form input.
    ///
    /// # Errors
    ///
    /// Returns `BookChangesError` if the title or author is blank, or any field
    /// is longer than its limit.
    pub fn parse(title: &str, author: &str, description: &str) -> Result<Self, BookChangesError> {
        Ok(Self {
            title: required("title", title)?,
            author: required("author", author)?,
            description: limited("description", description.trim(), MAX_DESCRIPTION_LENGTH)?,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, BookChangesError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BookChangesError::Missing(field));
    }
    limited(field, value, MAX_NAME_LENGTH)
}

fn limited(field: &'static str, value: &str, max: usize) -> Result<String, BookChangesError> {
    if value.chars().count() > max {
        return Err(BookChangesError::TooLong { field, max });
    }
    Ok(value.to_owned())
}
