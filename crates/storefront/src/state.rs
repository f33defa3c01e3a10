//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::checkout::CheckoutService;
use crate::config::StorefrontConfig;
use crate::store::{CartStore, SnapshotError, SnapshotFile, SnapshotWriter};

/// Error building the application state.
#[derive(Debug, Error)]
pub enum StateInitError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and is the composition
/// root for the catalog, the store, and the checkout service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    store: CartStore,
    checkout: CheckoutService,
}

impl AppState {
    /// Build the state from configuration: load and validate the
    /// catalog, restore the persisted store, and return the snapshot
    /// writer for the caller to spawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is invalid or an existing store
    /// snapshot cannot be read.
    pub fn new(config: StorefrontConfig) -> Result<(Self, SnapshotWriter), StateInitError> {
        let catalog = Catalog::load(&config.catalog_path)?;
        let (store, writer) =
            CartStore::persisted(SnapshotFile::new(config.snapshot_path.clone()))?;
        let checkout = CheckoutService::new(config.checkout_delay);

        Ok((Self::from_parts(config, catalog, store, checkout), writer))
    }

    /// Assemble state from prebuilt parts. Used by tests to inject an
    /// in-memory store and catalog.
    #[must_use]
    pub fn from_parts(
        config: StorefrontConfig,
        catalog: Catalog,
        store: CartStore,
        checkout: CheckoutService,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                store,
                checkout,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart/wishlist/compare store.
    #[must_use]
    pub fn store(&self) -> &CartStore {
        &self.inner.store
    }

    /// Get a reference to the checkout service.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }
}
