//! Cart route handlers.
//!
//! The cart lives in the session as product IDs and quantities. Prices and
//! visibility are re-read from the catalog on every render.

use std::collections::HashSet;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use bookstall_core::{Price, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{Cart, CurrentUser, Product, session_keys};
use crate::state::AppState;

/// A cart line joined with its catalog product.
pub struct CartItemView {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Price,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub user: Option<CurrentUser>,
    pub items: Vec<CartItemView>,
    pub subtotal: Price,
    pub item_count: u32,
}

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Remove-from-cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub product_id: ProductId,
}

async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Display the cart, dropping products that are hidden or gone.
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    let mut cart = load_cart(&session).await?;

    let products = ProductRepository::new(state.pool())
        .find_visible_by_ids(&cart.product_ids())
        .await?;

    let available: HashSet<ProductId> = products.iter().map(|p| p.id).collect();
    if cart.retain_available(&available) {
        tracing::debug!("dropped unavailable products from cart");
        save_cart(&session, &cart).await?;
    }

    let items: Vec<CartItemView> = cart
        .lines()
        .iter()
        .filter_map(|line| {
            let product = products.iter().find(|p| p.id == line.product_id)?;
            Some(CartItemView {
                product: product.clone(),
                quantity: line.quantity,
                line_total: product.price.times(line.quantity),
            })
        })
        .collect();

    Ok(CartTemplate {
        user,
        subtotal: items.iter().map(|item| item.line_total).sum(),
        item_count: cart.item_count(),
        items,
    })
}

/// Add a visible product to the cart.
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddForm>,
) -> Result<Redirect> {
    ProductRepository::new(state.pool())
        .get_visible(form.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut cart = load_cart(&session).await?;
    cart.add(form.product_id, form.quantity.unwrap_or(1));
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Remove a product from the cart.
pub async fn remove(session: Session, Form(form): Form<RemoveForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;
    if cart.remove(form.product_id) {
        save_cart(&session, &cart).await?;
    }
    Ok(Redirect::to("/cart"))
}
