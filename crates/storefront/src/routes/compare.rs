//! Compare route handlers.

use axum::{Json, extract::State};
use malisek_core::ProductId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::store::COMPARE_LIMIT;

use super::products::ProductView;

/// Compare set display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareView {
    pub items: Vec<ProductView>,
    pub count: usize,
    pub limit: usize,
}

impl CompareView {
    fn from_store(state: &AppState) -> Self {
        let items: Vec<ProductView> = state
            .store()
            .compare()
            .iter()
            .map(ProductView::from)
            .collect();
        Self {
            count: items.len(),
            items,
            limit: COMPARE_LIMIT,
        }
    }
}

/// Response for a compare addition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareAddResponse {
    /// Whether the product entered the set; `false` when the set was
    /// full or already held the id.
    pub accepted: bool,
    pub count: usize,
    pub limit: usize,
}

/// Compare mutation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareForm {
    pub product_id: String,
}

/// Show compare set contents.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CompareView> {
    Json(CompareView::from_store(&state))
}

/// Add a product to the compare set, bounded at six entries.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(form): Json<CompareForm>,
) -> Result<Json<CompareAddResponse>> {
    let id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .product(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let accepted = state.store().add_to_compare(product);

    Ok(Json(CompareAddResponse {
        accepted,
        count: state.store().compare().len(),
        limit: COMPARE_LIMIT,
    }))
}

/// Remove a compare entry. Unknown ids are a no-op.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(form): Json<CompareForm>,
) -> Json<CompareView> {
    let id = ProductId::new(form.product_id);
    state.store().remove_from_compare(&id);

    Json(CompareView::from_store(&state))
}

/// Empty the compare set.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CompareView> {
    state.store().clear_compare();
    Json(CompareView::from_store(&state))
}
