//! Dashboard product handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use tower_sessions::Session;

use bookstall_core::{FetchResult, ProductId, gate};

use super::PageQuery;
use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::{RequireAuth, SessionUserValidator};
use crate::models::{CurrentUser, Product};
use crate::state::AppState;
use crate::views::Listing;

/// The seller's product listing, hidden products included.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/products/index.html")]
pub struct ProductsIndexTemplate {
    pub user: Option<CurrentUser>,
    pub listing: Listing<Product>,
}

/// List the caller's products.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let fetched = FetchResult::from_result(
        ProductRepository::new(state.pool())
            .list_by_owner(user.id)
            .await,
        "Failed to fetch products",
    );
    let listing = Listing::build(
        fetched,
        state.pagination(),
        query.page,
        "/dashboard/products",
        &[],
    )?;

    Ok(ProductsIndexTemplate {
        user: Some(user),
        listing,
    })
}

/// Show or hide one of the caller's products in the catalog.
pub async fn toggle_visibility(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Redirect> {
    let products = ProductRepository::new(state.pool());
    let validator = SessionUserValidator::new(&session, state.pool());
    let product = gate::open(&validator, &products, id).await?;

    let product = products.toggle_visibility(product.owner_id, id).await?;
    tracing::info!(product_id = %id, visible = product.visible, "product visibility changed");

    Ok(Redirect::to("/dashboard/products"))
}

/// Delete one of the caller's products.
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Redirect> {
    let products = ProductRepository::new(state.pool());
    let validator = SessionUserValidator::new(&session, state.pool());
    let product = gate::open(&validator, &products, id).await?;

    products.delete(product.owner_id, id).await?;
    tracing::info!(product_id = %id, "product deleted");

    Ok(Redirect::to("/dashboard/products"))
}
