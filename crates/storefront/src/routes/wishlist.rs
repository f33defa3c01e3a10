//! Wishlist route handlers.

use axum::{Json, extract::State};
use malisek_core::ProductId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

use super::products::ProductView;

/// Wishlist display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub items: Vec<ProductView>,
    pub count: usize,
}

impl WishlistView {
    fn from_store(state: &AppState) -> Self {
        let items: Vec<ProductView> = state
            .store()
            .wishlist()
            .iter()
            .map(ProductView::from)
            .collect();
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Wishlist mutation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistForm {
    pub product_id: String,
}

/// Show wishlist contents.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<WishlistView> {
    Json(WishlistView::from_store(&state))
}

/// Add a product to the wishlist. Idempotent: repeat adds leave a
/// single entry.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(form): Json<WishlistForm>,
) -> Result<Json<WishlistView>> {
    let id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .product(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    state.store().add_to_wishlist(product);
    Ok(Json(WishlistView::from_store(&state)))
}

/// Remove a wishlist entry. Unknown ids are a no-op.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(form): Json<WishlistForm>,
) -> Json<WishlistView> {
    let id = ProductId::new(form.product_id);
    state.store().remove_from_wishlist(&id);

    Json(WishlistView::from_store(&state))
}
