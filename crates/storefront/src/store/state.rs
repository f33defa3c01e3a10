//! Pure store state and transitions.
//!
//! [`StoreState`] is plain data plus transition methods with no I/O, so
//! every rule here is testable without a runtime. The [`CartStore`]
//! wrapper owns locking, persistence, and notifications.
//!
//! [`CartStore`]: super::CartStore

use std::collections::BTreeMap;

use malisek_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Maximum number of products held for side-by-side comparison.
pub const COMPARE_LIMIT: usize = 6;

/// One cart entry: a product plus a quantity and the chosen variation
/// options.
///
/// A line's identity is (`product.id`, `selected_variations`). The
/// `BTreeMap` keeps selections in canonical key order, so equal
/// selections always compare and serialize identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// The product this line holds, embedded in full.
    #[serde(flatten)]
    pub product: Product,
    /// Number of units; always >= 1.
    pub quantity: u32,
    /// Chosen option per variation axis; empty when the product was
    /// added without a selection.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selected_variations: BTreeMap<String, String>,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// The storefront's mutable state: cart lines, wishlist, compare set,
/// and the cart panel visibility flag.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    items: Vec<CartLine>,
    wishlist: Vec<Product>,
    compare: Vec<Product>,
    is_open: bool,
}

impl StoreState {
    /// Rebuild state from persisted parts. The panel visibility flag is
    /// ephemeral and starts closed.
    #[must_use]
    pub fn from_parts(
        items: Vec<CartLine>,
        wishlist: Vec<Product>,
        compare: Vec<Product>,
    ) -> Self {
        Self {
            items,
            wishlist,
            compare,
            is_open: false,
        }
    }

    /// Cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Wishlist entries.
    #[must_use]
    pub fn wishlist(&self) -> &[Product] {
        &self.wishlist
    }

    /// Compare entries.
    #[must_use]
    pub fn compare(&self) -> &[Product] {
        &self.compare
    }

    /// Whether the cart panel is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// A quantity below 1 is clamped to 1. Selections whose keys are
    /// not variation axes of the product are dropped. If a line with
    /// the same (id, selections) identity exists, its quantity is
    /// incremented; otherwise a new line is appended. Never fails.
    pub fn add_to_cart(
        &mut self,
        product: Product,
        quantity: u32,
        selections: BTreeMap<String, String>,
    ) {
        let quantity = quantity.max(1);
        let selections: BTreeMap<String, String> = selections
            .into_iter()
            .filter(|(name, _)| product.has_variation(name))
            .collect();

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product.id == product.id && line.selected_variations == selections)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLine {
                product,
                quantity,
                selected_variations: selections,
            });
        }
    }

    /// Remove every cart line for the product id, regardless of the
    /// selected variations. Unknown ids are a no-op.
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        self.items.retain(|line| &line.product.id != id);
    }

    /// Set the quantity on every line matching the product id, clamped
    /// to at least 1. Unknown ids are a no-op.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) {
        let quantity = quantity.max(1);
        for line in self
            .items
            .iter_mut()
            .filter(|line| &line.product.id == id)
        {
            line.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.items.clear();
    }

    /// Flip the cart panel visibility flag.
    pub fn toggle_cart(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Set the cart panel visibility flag.
    pub fn set_cart_open(&mut self, open: bool) {
        self.is_open = open;
    }

    /// Add a product to the wishlist; a no-op when the id is already
    /// present.
    pub fn add_to_wishlist(&mut self, product: Product) {
        if self.wishlist.iter().any(|entry| entry.id == product.id) {
            return;
        }
        self.wishlist.push(product);
    }

    /// Remove a wishlist entry if present.
    pub fn remove_from_wishlist(&mut self, id: &ProductId) {
        self.wishlist.retain(|entry| &entry.id != id);
    }

    /// Add a product to the compare set.
    ///
    /// Returns `false`, leaving the state unchanged, when the set
    /// already holds [`COMPARE_LIMIT`] entries or already contains the
    /// product id.
    pub fn add_to_compare(&mut self, product: Product) -> bool {
        if self.compare.len() >= COMPARE_LIMIT {
            return false;
        }
        if self.compare.iter().any(|entry| entry.id == product.id) {
            return false;
        }
        self.compare.push(product);
        true
    }

    /// Remove a compare entry if present.
    pub fn remove_from_compare(&mut self, id: &ProductId) {
        self.compare.retain(|entry| &entry.id != id);
    }

    /// Empty the compare set.
    pub fn clear_compare(&mut self) {
        self.compare.clear();
    }

    /// Sum of `price * quantity` over the cart lines, computed fresh on
    /// every call.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over the cart lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |total, line| total.saturating_add(line.quantity))
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Variation;

    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_major(price),
            original_price: None,
            image: "/images/product.jpg".to_string(),
            category: "Laptops".to_string(),
            rating: 4.5,
            description: String::new(),
            features: Vec::new(),
            in_stock: true,
            variations: vec![Variation {
                name: "Color".to_string(),
                options: vec!["Red".to_string(), "Blue".to_string()],
            }],
            images: Vec::new(),
        }
    }

    fn color(option: &str) -> BTreeMap<String, String> {
        BTreeMap::from([("Color".to_string(), option.to_string())])
    }

    #[test]
    fn test_repeat_adds_merge_into_one_line() {
        let mut state = StoreState::default();
        state.add_to_cart(product("1", 10), 2, BTreeMap::new());
        state.add_to_cart(product("1", 10), 3, BTreeMap::new());

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items().first().map(|l| l.quantity), Some(5));
    }

    #[test]
    fn test_different_selections_stay_distinct_lines() {
        let mut state = StoreState::default();
        state.add_to_cart(product("1", 10), 1, color("Red"));
        state.add_to_cart(product("1", 10), 1, color("Blue"));

        assert_eq!(state.items().len(), 2);
        assert!(state.items().iter().all(|line| line.quantity == 1));
    }

    #[test]
    fn test_same_selection_merges() {
        let mut state = StoreState::default();
        state.add_to_cart(product("1", 10), 1, color("Red"));
        state.add_to_cart(product("1", 10), 4, color("Red"));

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items().first().map(|l| l.quantity), Some(5));
    }

    #[test]
    fn test_unknown_selection_keys_are_dropped() {
        let mut state = StoreState::default();
        let mut selections = color("Red");
        selections.insert("Engraving".to_string(), "MX".to_string());
        state.add_to_cart(product("1", 10), 1, selections);

        // The stray key is gone, so a plain Color=Red add merges.
        state.add_to_cart(product("1", 10), 1, color("Red"));
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items().first().map(|l| l.quantity), Some(2));
    }

    #[test]
    fn test_zero_quantity_add_clamps_to_one() {
        let mut state = StoreState::default();
        state.add_to_cart(product("1", 10), 0, BTreeMap::new());

        assert_eq!(state.items().first().map(|l| l.quantity), Some(1));
    }

    #[test]
    fn test_update_quantity_floors_at_one() {
        let mut state = StoreState::default();
        state.add_to_cart(product("1", 10), 3, BTreeMap::new());
        state.update_quantity(&ProductId::new("1"), 0);

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items().first().map(|l| l.quantity), Some(1));
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut state = StoreState::default();
        state.add_to_cart(product("1", 10), 3, BTreeMap::new());
        state.update_quantity(&ProductId::new("missing"), 7);

        assert_eq!(state.items().first().map(|l| l.quantity), Some(3));
    }

    #[test]
    fn test_remove_drops_every_variant_of_the_id() {
        let mut state = StoreState::default();
        state.add_to_cart(product("1", 10), 1, color("Red"));
        state.add_to_cart(product("1", 10), 1, color("Blue"));
        state.add_to_cart(product("2", 20), 1, BTreeMap::new());

        state.remove_from_cart(&ProductId::new("1"));
        assert_eq!(state.items().len(), 1);
        assert_eq!(
            state.items().first().map(|l| l.product.id.as_str()),
            Some("2")
        );

        // Removing a missing id changes nothing.
        state.remove_from_cart(&ProductId::new("missing"));
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn test_totals() {
        let mut state = StoreState::default();
        state.add_to_cart(product("1", 10), 2, BTreeMap::new());
        state.add_to_cart(product("2", 5), 3, BTreeMap::new());

        assert_eq!(state.total_price(), Price::from_major(35));
        assert_eq!(state.total_items(), 5);
    }

    #[test]
    fn test_wishlist_is_idempotent() {
        let mut state = StoreState::default();
        state.add_to_wishlist(product("1", 10));
        state.add_to_wishlist(product("1", 10));

        assert_eq!(state.wishlist().len(), 1);

        state.remove_from_wishlist(&ProductId::new("1"));
        assert!(state.wishlist().is_empty());
    }

    #[test]
    fn test_compare_is_bounded_at_six() {
        let mut state = StoreState::default();
        for i in 0..6 {
            assert!(state.add_to_compare(product(&i.to_string(), 10)));
        }

        assert!(!state.add_to_compare(product("7", 10)));
        assert_eq!(state.compare().len(), COMPARE_LIMIT);
        assert!(!state.compare().iter().any(|p| p.id.as_str() == "7"));
    }

    #[test]
    fn test_compare_rejects_duplicates() {
        let mut state = StoreState::default();
        assert!(state.add_to_compare(product("1", 10)));
        assert!(!state.add_to_compare(product("1", 10)));
        assert_eq!(state.compare().len(), 1);

        state.clear_compare();
        assert!(state.compare().is_empty());
    }

    #[test]
    fn test_cart_panel_flag() {
        let mut state = StoreState::default();
        assert!(!state.is_open());

        state.toggle_cart();
        assert!(state.is_open());

        state.set_cart_open(false);
        assert!(!state.is_open());
    }
}
