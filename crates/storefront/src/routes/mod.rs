//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Redirect to the catalog
//!
//! # Catalog
//! GET  /products                - Visible products (?page=, ?q=)
//! GET  /products/{id}           - Product detail
//!
//! # Cart
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add to cart
//! POST /cart/remove             - Remove from cart
//!
//! # Auth
//! GET  /auth/login              - Login page
//! POST /auth/login              - Login action
//! POST /auth/logout             - Logout action
//!
//! # API
//! GET  /api/auth/session        - Current user and session as JSON
//!
//! # Dashboard (own records only)
//! GET  /dashboard/books                     - Book listing (?page=)
//! GET  /dashboard/books/{id}/edit           - Edit form
//! POST /dashboard/books/{id}                - Save changes
//! POST /dashboard/books/{id}/delete         - Delete
//! GET  /dashboard/products                  - Product listing (?page=)
//! POST /dashboard/products/{id}/visibility  - Show/hide in catalog
//! POST /dashboard/products/{id}/delete      - Delete
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod dashboard;
pub mod products;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::middleware::{auth_rate_limiter, cart_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(auth::login_page).merge(post(auth::login).layer(auth_rate_limiter())),
        )
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new().route("/", get(cart::show)).merge(
        Router::new()
            .route("/add", post(cart::add))
            .route("/remove", post(cart::remove))
            .layer(cart_rate_limiter()),
    )
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/auth/session", get(api::session::show))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard/books") }))
        .route("/books", get(dashboard::books::index))
        .route("/books/{id}", post(dashboard::books::update))
        .route("/books/{id}/edit", get(dashboard::books::edit))
        .route("/books/{id}/delete", post(dashboard::books::delete))
        .route("/products", get(dashboard::products::index))
        .route(
            "/products/{id}/visibility",
            post(dashboard::products::toggle_visibility),
        )
        .route("/products/{id}/delete", post(dashboard::products::delete))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
        .nest("/dashboard", dashboard_routes())
}
