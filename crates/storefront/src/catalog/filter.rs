//! Pure filter evaluation over the catalog.
//!
//! Filtering is a stateless function from catalog + criteria to a
//! filtered product list, safe to call on every request.

use std::collections::HashSet;

use malisek_core::Price;

use super::Product;

/// Criteria for narrowing the product list.
///
/// All criteria are conjunctive. The default matches every product: no
/// category or brand restriction, the full price range, no minimum
/// rating, out-of-stock products included.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Keep only these categories; empty means no restriction.
    pub categories: HashSet<String>,
    /// Accepted but inert: products carry no brand field, so this does
    /// not constrain the result.
    pub brands: HashSet<String>,
    /// Inclusive `[min, max]` bounds on the product price.
    pub price_range: (Price, Price),
    /// Keep only products rated at least this highly.
    pub min_rating: f64,
    /// Keep only products currently in stock.
    pub in_stock_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            categories: HashSet::new(),
            brands: HashSet::new(),
            price_range: (Price::ZERO, Price::MAX),
            min_rating: 0.0,
            in_stock_only: false,
        }
    }
}

impl FilterCriteria {
    /// Whether a single product satisfies every criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }

        let (min, max) = self.price_range;
        if product.price < min || product.price > max {
            return false;
        }

        if product.rating < self.min_rating {
            return false;
        }

        if self.in_stock_only && !product.in_stock {
            return false;
        }

        true
    }
}

/// Filter the catalog down to the products matching `criteria`,
/// preserving catalog order.
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    criteria: &FilterCriteria,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| criteria.matches(product))
        .collect()
}
