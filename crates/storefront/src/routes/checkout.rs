//! Checkout route handler.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::checkout::{CheckoutForm, OrderConfirmation};
use crate::error::Result;
use crate::state::AppState;

/// Order confirmation display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmationView {
    pub order_id: String,
    pub placed_at: DateTime<Utc>,
    pub item_count: u32,
    pub subtotal: String,
    pub delivery_fee: String,
    pub total: String,
    pub payment_method: String,
}

impl From<&OrderConfirmation> for OrderConfirmationView {
    fn from(confirmation: &OrderConfirmation) -> Self {
        Self {
            order_id: confirmation.order_id.to_string(),
            placed_at: confirmation.placed_at,
            item_count: confirmation.item_count,
            subtotal: confirmation.subtotal.to_string(),
            delivery_fee: confirmation.delivery_fee.to_string(),
            total: confirmation.total.to_string(),
            payment_method: confirmation.payment_method.label().to_string(),
        }
    }
}

/// Submit the checkout form for the current cart.
///
/// On failure the cart is preserved unchanged and the error response
/// says whether a retry may succeed; only a successful submission
/// clears the cart.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<OrderConfirmationView>> {
    let lines = state.store().lines();
    let confirmation = state.checkout().submit(&form, &lines).await?;

    state.store().clear_cart();
    Ok(Json(OrderConfirmationView::from(&confirmation)))
}
