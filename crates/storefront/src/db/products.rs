//! Product repository for database operations.

use sqlx::PgPool;

use bookstall_core::{ProductId, ResourceStore, UserId};

use super::RepositoryError;
use crate::models::{NewProduct, Product};

const COLUMNS: &str = "id, owner_id, title, description, price, visible, created_at, updated_at";

/// Repository for product database operations.
#[derive(Clone, Copy)]
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every visible product, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_visible(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM storefront.product WHERE visible ORDER BY title, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// All products owned by `owner`, hidden ones included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM storefront.product WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product by ID regardless of owner or visibility.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM storefront.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Get a product only if it is visible in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_visible(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM storefront.product WHERE id = $1 AND visible"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// The visible subset of `ids`, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_visible_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM storefront.product WHERE id = ANY($1) AND visible"
        ))
        .bind(raw)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Insert a product for `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        owner: UserId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r"
            INSERT INTO storefront.product (owner_id, title, description, price, visible)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "
        ))
        .bind(owner)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.visible)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Flip the visibility of a product owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such product belongs to `owner`.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn toggle_visibility(
        &self,
        owner: UserId,
        id: ProductId,
    ) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(&format!(
            r"
            UPDATE storefront.product
            SET visible = NOT visible, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a product owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such product belongs to `owner`.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, owner: UserId, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM storefront.product WHERE id = $1 AND owner_id = $2")
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

impl ResourceStore for ProductRepository<'_> {
    type Id = ProductId;
    type Resource = Product;
    type Error = RepositoryError;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        self.get_by_id(id).await
    }
}
