//! Snapshot persistence for the store.
//!
//! The whole store state (cart lines, wishlist, compare list) is
//! serialized as a single JSON snapshot under one file, loaded at
//! startup and overwritten after every mutation. Writes go through a
//! background task so the mutating caller never blocks on the
//! filesystem.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::catalog::Product;

use super::state::{CartLine, StoreState};

/// Errors raised while loading or saving a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Persisted store state.
///
/// The cart panel flag is ephemeral and not part of the snapshot. Cart
/// line order is preserved across the round-trip; wishlist and compare
/// order is incidental.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Cart lines, in insertion order.
    #[serde(default)]
    pub items: Vec<CartLine>,
    /// Wishlist entries.
    #[serde(default)]
    pub wishlist: Vec<Product>,
    /// Compare entries.
    #[serde(default)]
    pub compare: Vec<Product>,
}

impl From<&StoreState> for Snapshot {
    fn from(state: &StoreState) -> Self {
        Self {
            items: state.items().to_vec(),
            wishlist: state.wishlist().to_vec(),
            compare: state.compare().to_vec(),
        }
    }
}

impl From<Snapshot> for StoreState {
    fn from(snapshot: Snapshot) -> Self {
        Self::from_parts(snapshot.items, snapshot.wishlist, snapshot.compare)
    }
}

/// A snapshot file on disk, identified by its path.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Create a handle for the snapshot at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, or `None` when none has been written yet.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the file exists but cannot be
    /// read or decoded.
    pub fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Write the snapshot, replacing any previous one.
    ///
    /// The data goes to a sibling temp file first and is renamed into
    /// place, so a crash mid-write leaves the previous snapshot intact.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the file cannot be written.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let encoded = serde_json::to_vec(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &encoded)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Background task that applies queued snapshots to the file.
///
/// Bursts of mutations are coalesced: only the most recent queued
/// snapshot is written. Save failures are logged, never surfaced to
/// the mutating caller.
#[derive(Debug)]
pub struct SnapshotWriter {
    rx: mpsc::UnboundedReceiver<Snapshot>,
    file: SnapshotFile,
}

impl SnapshotWriter {
    pub(super) const fn new(rx: mpsc::UnboundedReceiver<Snapshot>, file: SnapshotFile) -> Self {
        Self { rx, file }
    }

    /// Run until every sender is dropped.
    pub async fn run(mut self) {
        while let Some(mut snapshot) = self.rx.recv().await {
            while let Ok(newer) = self.rx.try_recv() {
                snapshot = newer;
            }
            if let Err(e) = self.file.save(&snapshot) {
                tracing::error!("Failed to persist store snapshot: {e}");
            }
        }
        tracing::debug!("Snapshot writer stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use malisek_core::{Price, ProductId};

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
            variations: vec![crate::catalog::Variation {
                name: "Color".to_string(),
                options: vec!["Red".to_string(), "Blue".to_string()],
            }],
            images: Vec::new(),
        }
    }

    fn populated_state() -> StoreState {
        let mut state = StoreState::default();
        state.add_to_cart(
            product("1", 10),
            2,
            BTreeMap::from([("Color".to_string(), "Red".to_string())]),
        );
        state.add_to_cart(product("2", 5), 3, BTreeMap::new());
        state.add_to_wishlist(product("3", 99));
        state
    }

    #[test]
    fn test_round_trip_preserves_lines_and_selections() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = SnapshotFile::new(dir.path().join("cart.json"));

        let state = populated_state();
        file.save(&Snapshot::from(&state)).expect("save");

        let restored: StoreState = file
            .load()
            .expect("load")
            .expect("snapshot present")
            .into();

        assert_eq!(restored.items(), state.items());
        assert_eq!(restored.wishlist(), state.wishlist());
        assert_eq!(restored.compare(), state.compare());
        assert_eq!(restored.total_price(), Price::from_major(35));
        assert_eq!(restored.total_items(), 5);
        assert!(!restored.is_open());
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = SnapshotFile::new(dir.path().join("absent.json"));

        assert!(file.load().expect("load").is_none());
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = SnapshotFile::new(dir.path().join("cart.json"));

        file.save(&Snapshot::from(&populated_state())).expect("save");
        file.save(&Snapshot::default()).expect("save again");

        let snapshot = file.load().expect("load").expect("snapshot present");
        assert!(snapshot.items.is_empty());
        assert!(snapshot.wishlist.is_empty());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = SnapshotFile::new(dir.path().join("nested/state/cart.json"));

        file.save(&Snapshot::default()).expect("save");
        assert!(file.load().expect("load").is_some());
    }

    #[tokio::test]
    async fn test_writer_coalesces_to_latest_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = SnapshotFile::new(dir.path().join("cart.json"));
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = SnapshotWriter::new(rx, file.clone());

        let mut state = StoreState::default();
        for i in 0..3 {
            state.add_to_cart(product(&i.to_string(), 10), 1, BTreeMap::new());
            tx.send(Snapshot::from(&state)).expect("send");
        }
        drop(tx);
        writer.run().await;

        let snapshot = file.load().expect("load").expect("snapshot present");
        assert_eq!(snapshot.items.len(), 3);
    }
}
