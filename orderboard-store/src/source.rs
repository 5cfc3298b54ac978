use async_trait::async_trait;
use orderboard_shared::Order;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// The list endpoint never returns more than this many orders.
pub const MAX_LIMIT: usize = 200;

/// Supplies the board's order snapshot.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_orders(&self, limit: usize) -> StoreResult<Vec<Order>>;
}

/// Reads a JSON export of the order list from disk.
pub struct FileOrderSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Bare(Vec<Order>),
    Envelope {
        ok: bool,
        #[serde(default)]
        items: Vec<Order>,
    },
}

impl FileOrderSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OrderSource for FileOrderSource {
    async fn fetch_orders(&self, limit: usize) -> StoreResult<Vec<Order>> {
        let raw = tokio::fs::read(&self.path).await.map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        let mut orders = match serde_json::from_slice::<SnapshotFile>(&raw)? {
            SnapshotFile::Bare(orders) => orders,
            SnapshotFile::Envelope { ok: false, .. } => return Err(StoreError::Upstream),
            SnapshotFile::Envelope { items, .. } => items,
        };

        orders.truncate(limit.min(MAX_LIMIT));
        debug!(path = %self.path.display(), count = orders.len(), "read order snapshot");
        Ok(orders)
    }
}
