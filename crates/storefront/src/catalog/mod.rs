//! Product catalog loaded at startup.
//!
//! The catalog is read-only for the lifetime of the process: a sequence
//! of product records plus taxonomy lists (categories, brands, price
//! bands) supplied by an external JSON document. Loading validates the
//! data invariants once, so everything downstream can trust the records.

pub mod filter;

pub use filter::{FilterCriteria, filter_products};

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use malisek_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named axis of product configuration (e.g. `Color`) with its
/// selectable options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    /// Axis name, unique within a product.
    pub name: String,
    /// Selectable options, in display order.
    pub options: Vec<String>,
}

/// A product record from the catalog data source.
///
/// Serialized in camelCase to match the catalog document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current price.
    pub price: Price,
    /// Pre-discount price; when present it is >= `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// Primary image reference.
    pub image: String,
    /// Category name; must be one of the taxonomy's categories.
    pub category: String,
    /// Average rating in `0..=5`.
    pub rating: f64,
    /// Plain text description.
    pub description: String,
    /// Feature bullet points, in display order.
    pub features: Vec<String>,
    /// Whether the product can currently be added to the cart.
    pub in_stock: bool,
    /// Configuration axes; empty for single-configuration products.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,
    /// Gallery image references; falls back to `image` when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Product {
    /// Rounded percentage off, derived from `original_price`.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        self.original_price
            .and_then(|original| original.percent_off(self.price))
    }

    /// Gallery image references, falling back to the single `image`
    /// field when no gallery is supplied.
    #[must_use]
    pub fn gallery(&self) -> Vec<&str> {
        if self.images.is_empty() {
            vec![self.image.as_str()]
        } else {
            self.images.iter().map(String::as_str).collect()
        }
    }

    /// Whether `name` is one of this product's variation axes.
    #[must_use]
    pub fn has_variation(&self, name: &str) -> bool {
        self.variations.iter().any(|v| v.name == name)
    }
}

/// A labelled price band for the storefront's filter sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBand {
    /// Display label (e.g. `Under $100`).
    pub label: String,
    /// Inclusive lower bound.
    pub min: Price,
    /// Inclusive upper bound; `None` marks the open-ended top band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Price>,
}

/// Taxonomy lists supplied alongside the product records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    /// Known category names.
    pub categories: Vec<String>,
    /// Known brand names.
    pub brands: Vec<String>,
    /// Labelled price bands.
    pub price_bands: Vec<PriceBand>,
}

/// On-disk catalog document: product records plus flattened taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Product records, in catalog order.
    pub products: Vec<Product>,
    /// Taxonomy lists.
    #[serde(flatten)]
    pub taxonomy: Taxonomy,
}

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(String),
    #[error("failed to parse catalog file: {0}")]
    Parse(String),
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("product {id}: unknown category '{category}'")]
    UnknownCategory { id: ProductId, category: String },
    #[error("product {id}: negative price")]
    NegativePrice { id: ProductId },
    #[error("product {id}: original price below current price")]
    OriginalPriceBelowPrice { id: ProductId },
    #[error("product {id}: rating {rating} outside 0..=5")]
    RatingOutOfRange { id: ProductId, rating: f64 },
    #[error("product {id}: duplicate variation name '{name}'")]
    DuplicateVariation { id: ProductId, name: String },
}

/// Immutable product catalog held in memory for the process lifetime.
///
/// Cheaply cloneable via `Arc`, like the rest of the shared application
/// state.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
    by_id: Arc<HashMap<ProductId, usize>>,
    taxonomy: Arc<Taxonomy>,
}

impl Catalog {
    /// Load and validate a catalog document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed,
    /// or if any record violates the data-model invariants.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let document: CatalogDocument =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let catalog = Self::from_document(document)?;
        tracing::info!(
            products = catalog.products.len(),
            categories = catalog.taxonomy.categories.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog from an already-parsed document.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if any record violates the data-model
    /// invariants.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        Self::new(document.products, document.taxonomy)
    }

    /// Build a catalog from product records and taxonomy lists.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if any record violates the data-model
    /// invariants.
    pub fn new(products: Vec<Product>, taxonomy: Taxonomy) -> Result<Self, CatalogError> {
        validate(&products, &taxonomy)?;

        let by_id = products
            .iter()
            .enumerate()
            .map(|(index, product)| (product.id.clone(), index))
            .collect();

        Ok(Self {
            products: Arc::new(products),
            by_id: Arc::new(by_id),
            taxonomy: Arc::new(taxonomy),
        })
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.by_id.get(id).and_then(|&index| self.products.get(index))
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Taxonomy lists.
    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Check every record against the data-model invariants.
fn validate(products: &[Product], taxonomy: &Taxonomy) -> Result<(), CatalogError> {
    let known_categories: HashSet<&str> =
        taxonomy.categories.iter().map(String::as_str).collect();

    let mut seen_ids: HashSet<&ProductId> = HashSet::new();
    for product in products {
        if !seen_ids.insert(&product.id) {
            return Err(CatalogError::DuplicateId(product.id.clone()));
        }
        if !known_categories.contains(product.category.as_str()) {
            return Err(CatalogError::UnknownCategory {
                id: product.id.clone(),
                category: product.category.clone(),
            });
        }
        if product.price.is_negative() {
            return Err(CatalogError::NegativePrice {
                id: product.id.clone(),
            });
        }
        if let Some(original) = product.original_price {
            if original < product.price {
                return Err(CatalogError::OriginalPriceBelowPrice {
                    id: product.id.clone(),
                });
            }
        }
        if !(0.0..=5.0).contains(&product.rating) {
            return Err(CatalogError::RatingOutOfRange {
                id: product.id.clone(),
                rating: product.rating,
            });
        }
        let mut seen_variations: HashSet<&str> = HashSet::new();
        for variation in &product.variations {
            if !seen_variations.insert(variation.name.as_str()) {
                return Err(CatalogError::DuplicateVariation {
                    id: product.id.clone(),
                    name: variation.name.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> Taxonomy {
        Taxonomy {
            categories: vec!["Laptops".to_string(), "Cameras".to_string()],
            brands: vec!["Apple".to_string()],
            price_bands: vec![PriceBand {
                label: "Under $100".to_string(),
                min: Price::ZERO,
                max: Some(Price::from_major(100)),
            }],
        }
    }

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_major(899),
            original_price: None,
            image: "/images/product.jpg".to_string(),
            category: "Laptops".to_string(),
            rating: 4.6,
            description: "A product".to_string(),
            features: vec!["Feature".to_string()],
            in_stock: true,
            variations: Vec::new(),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new(vec![product("1"), product("2")], taxonomy()).expect("valid");

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.product(&ProductId::new("2")).map(|p| p.id.as_str()),
            Some("2")
        );
        assert!(catalog.product(&ProductId::new("missing")).is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![product("1"), product("1")], taxonomy());
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let mut bad = product("1");
        bad.category = "Toasters".to_string();
        let result = Catalog::new(vec![bad], taxonomy());
        assert!(matches!(result, Err(CatalogError::UnknownCategory { .. })));
    }

    #[test]
    fn test_rejects_original_price_below_price() {
        let mut bad = product("1");
        bad.original_price = Some(Price::from_major(100));
        let result = Catalog::new(vec![bad], taxonomy());
        assert!(matches!(
            result,
            Err(CatalogError::OriginalPriceBelowPrice { .. })
        ));
    }

    #[test]
    fn test_rejects_rating_out_of_range() {
        let mut bad = product("1");
        bad.rating = 5.2;
        let result = Catalog::new(vec![bad], taxonomy());
        assert!(matches!(result, Err(CatalogError::RatingOutOfRange { .. })));
    }

    #[test]
    fn test_rejects_duplicate_variation_names() {
        let mut bad = product("1");
        bad.variations = vec![
            Variation {
                name: "Color".to_string(),
                options: vec!["Red".to_string()],
            },
            Variation {
                name: "Color".to_string(),
                options: vec!["Blue".to_string()],
            },
        ];
        let result = Catalog::new(vec![bad], taxonomy());
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateVariation { .. })
        ));
    }

    #[test]
    fn test_gallery_falls_back_to_single_image() {
        let mut with_gallery = product("1");
        with_gallery.images = vec!["/a.jpg".to_string(), "/b.jpg".to_string()];
        assert_eq!(with_gallery.gallery(), vec!["/a.jpg", "/b.jpg"]);

        let without_gallery = product("2");
        assert_eq!(without_gallery.gallery(), vec!["/images/product.jpg"]);
    }

    #[test]
    fn test_discount_percent() {
        let mut discounted = product("1");
        discounted.price = Price::from_major(1199);
        discounted.original_price = Some(Price::from_major(1299));
        assert_eq!(discounted.discount_percent(), Some(8));

        assert_eq!(product("2").discount_percent(), None);
    }
}
