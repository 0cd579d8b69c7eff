//! In-memory entry store.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use swmtrack_core::{EntryStore, StoreError};

/// A process-local [`EntryStore`] keyed by entry identifier.
#[derive(Default)]
pub struct InMemoryEntryStore {
    entries: RwLock<HashMap<String, BTreeMap<String, f64>>>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry's material weights.
    pub fn insert(&self, entry_id: impl Into<String>, weights: BTreeMap<String, f64>) {
        self.entries
            .write()
            .expect("entry store lock poisoned")
            .insert(entry_id.into(), weights);
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn material_weights(
        &self,
        entry_id: &str,
    ) -> Result<Option<BTreeMap<String, f64>>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::Storage("entry store lock poisoned".into()))?;
        Ok(entries.get(entry_id).cloned())
    }
}
