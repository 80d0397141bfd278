//! Persistence boundary for Scapes.
//!
//! The backing service owns the wire format; the editor only exchanges whole
//! [`Scape`] aggregates and receives a stable id back.

use std::collections::HashMap;

use async_trait::async_trait;
use genscape_core::types::ScapeId;
use genscape_core::Scape;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A service that persists complete Scapes.
#[async_trait]
pub trait ScapeStore: Send + Sync {
    /// Persist `scape`, returning its stable id.
    ///
    /// A Scape without an id is assigned a new one; otherwise the existing
    /// record is replaced.
    async fn save(&self, scape: &Scape) -> Result<ScapeId, StoreError>;

    /// Fetch a previously saved Scape.
    async fn fetch(&self, id: ScapeId) -> Result<Option<Scape>, StoreError>;
}

/// Process-local store that keeps each Scape as its JSON document.
///
/// Storing the serialized form means `fetch` returns exactly what a remote
/// service would hand back.
#[derive(Debug, Default)]
pub struct InMemoryScapeStore {
    records: RwLock<HashMap<ScapeId, serde_json::Value>>,
}

impl InMemoryScapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored Scapes.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ScapeStore for InMemoryScapeStore {
    async fn save(&self, scape: &Scape) -> Result<ScapeId, StoreError> {
        let id = scape.id.unwrap_or_else(uuid::Uuid::now_v7);
        let mut stored = scape.clone();
        stored.id = Some(id);
        let document = serde_json::to_value(&stored)?;

        self.records.write().await.insert(id, document);
        tracing::debug!(scape_id = %id, "Scape stored");
        Ok(id)
    }

    async fn fetch(&self, id: ScapeId) -> Result<Option<Scape>, StoreError> {
        let records = self.records.read().await;
        match records.get(&id) {
            Some(document) => Ok(Some(serde_json::from_value(document.clone())?)),
            None => Ok(None),
        }
    }
}
