//! Store change notifications.
//!
//! An explicit observer interface replacing presentation-side event
//! plumbing: consumers subscribe through
//! [`CartStore::subscribe`](super::CartStore::subscribe) and receive
//! [`StoreEvent`]s. Delivery is advisory; correctness never depends on
//! anyone listening.

/// A change notification emitted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// Items were added to the cart. Used by the presentation layer to
    /// pulse the cart badge.
    CartChanged {
        /// Total unit count across all cart lines after the change.
        total_items: u32,
    },
}
