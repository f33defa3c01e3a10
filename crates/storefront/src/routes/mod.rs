//! HTTP route handlers for the storefront.
//!
//! The routes are thin JSON adapters: they convert requests into store
//! commands and store state into view structs, nothing more.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (registered in main)
//!
//! # Catalog
//! GET  /products               - Product listing, filter via query params
//! GET  /products/{id}          - Product detail
//! GET  /taxonomy               - Categories, brands, price bands
//!
//! # Cart
//! GET  /cart                   - Cart contents and totals
//! POST /cart/add               - Add product (rejects unknown/out-of-stock)
//! POST /cart/update            - Set line quantity (clamped to >= 1)
//! POST /cart/remove            - Remove all lines for a product id
//! POST /cart/clear             - Empty the cart
//! POST /cart/toggle            - Flip the cart panel flag
//! POST /cart/open              - Set the cart panel flag
//! GET  /cart/count             - Cart unit count badge
//!
//! # Wishlist
//! GET  /wishlist               - Wishlist contents
//! POST /wishlist/add           - Add product (idempotent)
//! POST /wishlist/remove        - Remove entry
//!
//! # Compare
//! GET  /compare                - Compare set contents
//! POST /compare/add            - Add product (bounded at 6)
//! POST /compare/remove         - Remove entry
//! POST /compare/clear          - Empty the compare set
//!
//! # Checkout
//! POST /checkout               - Submit order; clears cart on success
//! ```

pub mod cart;
pub mod checkout;
pub mod compare;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/toggle", post(cart::toggle))
        .route("/open", post(cart::open))
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
}

/// Create the compare routes router.
pub fn compare_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(compare::show))
        .route("/add", post(compare::add))
        .route("/remove", post(compare::remove))
        .route("/clear", post(compare::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .route("/taxonomy", get(products::taxonomy))
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/compare", compare_routes())
        .route("/checkout", post(checkout::submit))
}
