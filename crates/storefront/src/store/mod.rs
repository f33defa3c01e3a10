//! Cart/wishlist/compare store.
//!
//! Single source of truth for cart lines, the wishlist, the bounded
//! compare set, and the cart panel visibility flag. The store is an
//! explicit state container constructed by the composition root and
//! shared through [`AppState`](crate::state::AppState); there are no
//! globals.
//!
//! The pure transition rules live in [`StoreState`]; [`CartStore`]
//! wraps them with locking, snapshot persistence, and change
//! notifications. No command fails: invalid inputs are clamped or
//! ignored.

mod events;
mod persistence;
mod state;

pub use events::StoreEvent;
pub use persistence::{Snapshot, SnapshotError, SnapshotFile, SnapshotWriter};
pub use state::{CartLine, StoreState, COMPARE_LIMIT};

use std::collections::BTreeMap;

use malisek_core::{Price, ProductId};
use parking_lot::RwLock;
use tokio::sync::{broadcast, mpsc};

use crate::catalog::Product;

/// Capacity of the notification channel. Slow subscribers lag and skip
/// events rather than backpressure the store.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Thread-safe store wrapper.
///
/// Every command runs under a single write lock, so a reader never
/// observes a partially updated line list. Each state-changing command
/// enqueues a snapshot for the background writer; the enqueue is
/// fire-and-forget and never blocks. Cart additions additionally
/// broadcast a [`StoreEvent::CartChanged`].
#[derive(Debug)]
pub struct CartStore {
    state: RwLock<StoreState>,
    persist: Option<mpsc::UnboundedSender<Snapshot>>,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Create an empty in-memory store without persistence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(StoreState::default())
    }

    /// Create an in-memory store preloaded with `state`.
    #[must_use]
    pub fn with_state(state: StoreState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(state),
            persist: None,
            events,
        }
    }

    /// Create a store backed by a snapshot file.
    ///
    /// Any existing snapshot is loaded as the initial state. The
    /// returned [`SnapshotWriter`] must be spawned by the caller; the
    /// store only enqueues snapshots.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if an existing snapshot cannot be
    /// read or decoded.
    pub fn persisted(file: SnapshotFile) -> Result<(Self, SnapshotWriter), SnapshotError> {
        let initial = file.load()?.map(StoreState::from).unwrap_or_default();
        if !initial.items().is_empty() || !initial.wishlist().is_empty() {
            tracing::info!(
                items = initial.items().len(),
                wishlist = initial.wishlist().len(),
                compare = initial.compare().len(),
                "Restored store snapshot"
            );
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let writer = SnapshotWriter::new(rx, file);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok((
            Self {
                state: RwLock::new(initial),
                persist: Some(tx),
                events,
            },
            writer,
        ))
    }

    /// Subscribe to store change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Enqueue the current state for the background writer.
    fn enqueue(&self, state: &StoreState) {
        if let Some(tx) = &self.persist {
            // The writer outlives the store; a send error only means
            // shutdown is in progress.
            let _ = tx.send(Snapshot::from(state));
        }
    }

    // =========================================================================
    // Cart commands
    // =========================================================================

    /// Add `quantity` units of a product to the cart, merging into an
    /// existing line with the same (id, selections) identity.
    pub fn add_to_cart(
        &self,
        product: Product,
        quantity: u32,
        selections: BTreeMap<String, String>,
    ) {
        let total_items = {
            let mut state = self.state.write();
            state.add_to_cart(product, quantity, selections);
            self.enqueue(&state);
            state.total_items()
        };

        // Advisory: nobody listening is fine.
        let _ = self.events.send(StoreEvent::CartChanged { total_items });
    }

    /// Remove every cart line for the product id.
    pub fn remove_from_cart(&self, id: &ProductId) {
        let mut state = self.state.write();
        state.remove_from_cart(id);
        self.enqueue(&state);
    }

    /// Set the quantity on the line(s) matching the product id, clamped
    /// to at least 1.
    pub fn update_quantity(&self, id: &ProductId, quantity: u32) {
        let mut state = self.state.write();
        state.update_quantity(id, quantity);
        self.enqueue(&state);
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        let mut state = self.state.write();
        state.clear_cart();
        self.enqueue(&state);
    }

    /// Flip the cart panel visibility flag. The flag is ephemeral, so
    /// no snapshot is enqueued.
    pub fn toggle_cart(&self) {
        self.state.write().toggle_cart();
    }

    /// Set the cart panel visibility flag. The flag is ephemeral, so no
    /// snapshot is enqueued.
    pub fn set_cart_open(&self, open: bool) {
        self.state.write().set_cart_open(open);
    }

    // =========================================================================
    // Wishlist commands
    // =========================================================================

    /// Add a product to the wishlist; duplicates are ignored.
    pub fn add_to_wishlist(&self, product: Product) {
        let mut state = self.state.write();
        state.add_to_wishlist(product);
        self.enqueue(&state);
    }

    /// Remove a wishlist entry if present.
    pub fn remove_from_wishlist(&self, id: &ProductId) {
        let mut state = self.state.write();
        state.remove_from_wishlist(id);
        self.enqueue(&state);
    }

    // =========================================================================
    // Compare commands
    // =========================================================================

    /// Add a product to the compare set. Returns `false` when the set
    /// is full or already contains the id.
    pub fn add_to_compare(&self, product: Product) -> bool {
        let mut state = self.state.write();
        let added = state.add_to_compare(product);
        if added {
            self.enqueue(&state);
        }
        added
    }

    /// Remove a compare entry if present.
    pub fn remove_from_compare(&self, id: &ProductId) {
        let mut state = self.state.write();
        state.remove_from_compare(id);
        self.enqueue(&state);
    }

    /// Empty the compare set.
    pub fn clear_compare(&self) {
        let mut state = self.state.write();
        state.clear_compare();
        self.enqueue(&state);
    }

    // =========================================================================
    // Derived reads
    // =========================================================================

    /// Cart lines, cloned out in insertion order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.state.read().items().to_vec()
    }

    /// Wishlist entries, cloned out.
    #[must_use]
    pub fn wishlist(&self) -> Vec<Product> {
        self.state.read().wishlist().to_vec()
    }

    /// Compare entries, cloned out.
    #[must_use]
    pub fn compare(&self) -> Vec<Product> {
        self.state.read().compare().to_vec()
    }

    /// Sum of `price * quantity` over the cart lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.state.read().total_price()
    }

    /// Sum of quantities over the cart lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.state.read().total_items()
    }

    /// Whether the cart panel is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.read().is_open()
    }

    /// Current state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&*self.state.read())
    }
}
