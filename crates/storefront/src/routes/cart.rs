//! Cart route handlers.
//!
//! Additions are gated here: unknown product ids and out-of-stock
//! products are rejected before the store is invoked, because the store
//! itself absorbs every input.

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use malisek_core::ProductId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::store::CartLine;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
    pub image: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub selected_variations: BTreeMap<String, String>,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id.to_string(),
            name: line.product.name.clone(),
            price: line.product.price.to_string(),
            quantity: line.quantity,
            line_total: line.line_total().to_string(),
            image: line.product.image.clone(),
            selected_variations: line.selected_variations.clone(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u32,
    pub is_open: bool,
}

impl CartView {
    fn from_store(state: &AppState) -> Self {
        let store = state.store();
        Self {
            items: store.lines().iter().map(CartLineView::from).collect(),
            subtotal: store.total_price().to_string(),
            item_count: store.total_items(),
            is_open: store.is_open(),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCountView {
    pub count: u32,
}

/// Cart panel visibility data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPanelView {
    pub is_open: bool,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<i64>,
    pub variations: Option<BTreeMap<String, String>>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart panel visibility request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCartOpenForm {
    pub open: bool,
}

/// Clamp a client-supplied quantity to the valid range.
fn clamp_quantity(raw: i64) -> u32 {
    u32::try_from(raw.max(1)).unwrap_or(u32::MAX)
}

/// Show cart contents and totals.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::from_store(&state))
}

/// Add an item to the cart.
///
/// Rejects unknown ids (404) and out-of-stock products (409) before
/// invoking the store. Returns the updated count badge.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartCountView>> {
    let id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .product(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    if !product.in_stock {
        return Err(AppError::OutOfStock(id));
    }

    let quantity = clamp_quantity(form.quantity.unwrap_or(1));
    state
        .store()
        .add_to_cart(product, quantity, form.variations.unwrap_or_default());

    Ok(Json(CartCountView {
        count: state.store().total_items(),
    }))
}

/// Set the quantity on a cart line. Quantities below 1 are clamped.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(form): Json<UpdateCartForm>,
) -> Json<CartView> {
    let id = ProductId::new(form.product_id);
    state
        .store()
        .update_quantity(&id, clamp_quantity(form.quantity));

    Json(CartView::from_store(&state))
}

/// Remove all lines for a product id. Unknown ids are a no-op.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(form): Json<RemoveFromCartForm>,
) -> Json<CartView> {
    let id = ProductId::new(form.product_id);
    state.store().remove_from_cart(&id);

    Json(CartView::from_store(&state))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    state.store().clear_cart();
    Json(CartView::from_store(&state))
}

/// Flip the cart panel visibility flag.
#[instrument(skip(state))]
pub async fn toggle(State(state): State<AppState>) -> Json<CartPanelView> {
    state.store().toggle_cart();
    Json(CartPanelView {
        is_open: state.store().is_open(),
    })
}

/// Set the cart panel visibility flag.
#[instrument(skip(state))]
pub async fn open(
    State(state): State<AppState>,
    Json(form): Json<SetCartOpenForm>,
) -> Json<CartPanelView> {
    state.store().set_cart_open(form.open);
    Json(CartPanelView {
        is_open: state.store().is_open(),
    })
}

/// Cart unit count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCountView> {
    Json(CartCountView {
        count: state.store().total_items(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(-3), 1);
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(1), 1);
        assert_eq!(clamp_quantity(42), 42);
        assert_eq!(clamp_quantity(i64::MAX), u32::MAX);
    }
}
