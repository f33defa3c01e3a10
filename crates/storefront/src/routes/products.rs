//! Product route handlers.

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use malisek_core::{Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::{FilterCriteria, Taxonomy, Variation, filter_products};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u32>,
    pub rating: f64,
    pub features: Vec<String>,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,
    pub images: Vec<String>,
}

impl From<&crate::catalog::Product> for ProductView {
    fn from(product: &crate::catalog::Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            original_price: product.original_price.map(|p| p.to_string()),
            discount_percent: product.discount_percent(),
            rating: product.rating,
            features: product.features.clone(),
            in_stock: product.in_stock,
            variations: product.variations.clone(),
            images: product.gallery().into_iter().map(String::from).collect(),
        }
    }
}

/// Product listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductView>,
    pub total: usize,
}

/// Filter query parameters for the product listing.
///
/// `categories` and `brands` are comma-separated lists.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub categories: Option<String>,
    pub brands: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<f64>,
    pub in_stock: Option<bool>,
}

impl FilterQuery {
    /// Build filter criteria, leaving unspecified fields at their
    /// match-everything defaults.
    fn into_criteria(self) -> FilterCriteria {
        let mut criteria = FilterCriteria::default();
        if let Some(raw) = self.categories {
            criteria.categories = split_list(&raw);
        }
        if let Some(raw) = self.brands {
            criteria.brands = split_list(&raw);
        }
        if let Some(min) = self.min_price {
            criteria.price_range.0 = Price::new(min);
        }
        if let Some(max) = self.max_price {
            criteria.price_range.1 = Price::new(max);
        }
        if let Some(min_rating) = self.min_rating {
            criteria.min_rating = min_rating;
        }
        criteria.in_stock_only = self.in_stock.unwrap_or(false);
        criteria
    }
}

/// Split a comma-separated query value into a set of names.
fn split_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// List products, optionally narrowed by filter criteria.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<ProductListResponse> {
    let criteria = query.into_criteria();
    let matched = filter_products(state.catalog().products(), &criteria);

    Json(ProductListResponse {
        total: matched.len(),
        products: matched.into_iter().map(ProductView::from).collect(),
    })
}

/// Product detail by id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let id = ProductId::new(id);
    state
        .catalog()
        .product(&id)
        .map(ProductView::from)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Taxonomy lists for the filter sidebar.
#[instrument(skip(state))]
pub async fn taxonomy(State(state): State<AppState>) -> Json<Taxonomy> {
    Json(state.catalog().taxonomy().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_drops_empties() {
        let set = split_list("Laptops, Cameras,, ");
        assert_eq!(set.len(), 2);
        assert!(set.contains("Laptops"));
        assert!(set.contains("Cameras"));
    }

    #[test]
    fn test_empty_query_is_default_criteria() {
        let criteria = FilterQuery::default().into_criteria();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_query_overrides_bounds() {
        let query = FilterQuery {
            min_price: Some(Decimal::from(100)),
            max_price: Some(Decimal::from(500)),
            min_rating: Some(4.5),
            in_stock: Some(true),
            ..FilterQuery::default()
        };

        let criteria = query.into_criteria();
        assert_eq!(
            criteria.price_range,
            (Price::from_major(100), Price::from_major(500))
        );
        assert!((criteria.min_rating - 4.5).abs() < f64::EPSILON);
        assert!(criteria.in_stock_only);
    }
}
