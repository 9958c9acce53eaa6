//! Public catalog handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use bookstall_core::{FetchResult, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, Product};
use crate::state::AppState;
use crate::views::Listing;

/// Catalog query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub page: Option<usize>,
    pub q: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub user: Option<CurrentUser>,
    pub listing: Listing<Product>,
    pub query: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub user: Option<CurrentUser>,
    pub product: Product,
}

/// Display the visible catalog, optionally filtered by `q`.
#[tracing::instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<CatalogQuery>,
) -> Result<impl IntoResponse> {
    let needle = query.q.as_deref().map(str::trim).unwrap_or_default().to_owned();

    let fetched = FetchResult::from_result(
        ProductRepository::new(state.pool()).list_visible().await,
        "Failed to fetch products",
    )
    .map(|products| {
        if needle.is_empty() {
            products
        } else {
            products.into_iter().filter(|p| p.matches(&needle)).collect()
        }
    });

    let listing = Listing::build(
        fetched,
        state.pagination(),
        query.page,
        "/products",
        &[("q", &needle)],
    )?;

    Ok(ProductsIndexTemplate {
        user,
        listing,
        query: needle,
    })
}

/// Display a single visible product.
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let product = ProductRepository::new(state.pool())
        .get_visible(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductShowTemplate { user, product })
}
