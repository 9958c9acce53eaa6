//! Book repository for database operations.
//!
//! Every write is scoped by `owner_id` as well as `id`, so a missed gate
//! check still cannot touch another seller's book.

use sqlx::PgPool;

use bookstall_core::{BookId, ResourceStore, UserId};

use super::RepositoryError;
use crate::models::{Book, BookChanges};

const COLUMNS: &str = "id, owner_id, title, author, description, created_at, updated_at";

/// Repository for book database operations.
#[derive(Clone, Copy)]
pub struct BookRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookRepository<'a> {
    /// Create a new book repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All books listed by `owner`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Book>, RepositoryError> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {COLUMNS} FROM storefront.book WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(books)
    }

    /// Get a book by ID regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {COLUMNS} FROM storefront.book WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(book)
    }

    /// Insert a book for `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, owner: UserId, book: &BookChanges) -> Result<Book, RepositoryError> {
        let book = sqlx::query_as::<_, Book>(&format!(
            r"
            INSERT INTO storefront.book (owner_id, title, author, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "
        ))
        .bind(owner)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .fetch_one(self.pool)
        .await?;

        Ok(book)
    }

    /// Apply `changes` to a book owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such book belongs to `owner`.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        owner: UserId,
        id: BookId,
        changes: &BookChanges,
    ) -> Result<Book, RepositoryError> {
        sqlx::query_as::<_, Book>(&format!(
            r"
            UPDATE storefront.book
            SET title = $3, author = $4, description = $5, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(owner)
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.description)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a book owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such book belongs to `owner`.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, owner: UserId, id: BookId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM storefront.book WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl ResourceStore for BookRepository<'_> {
    type Id = BookId;
    type Resource = Book;
    type Error = RepositoryError;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        self.get_by_id(id).await
    }
}
