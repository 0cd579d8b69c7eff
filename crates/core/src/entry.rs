//! Entry-storage trait — the boundary to the excluded document store.
//!
//! A stored entry is a per-day mapping from material name to collected
//! weight in kilograms. The orchestrator sums those weights to derive
//! `dry_waste_collected` when the caller references an entry instead of
//! supplying the figure directly.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::StoreError;

/// Lookup-by-identifier over persisted material-weight entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Returns the material → weight (kg) mapping for an entry, or `None`
    /// when no entry exists under that identifier.
    async fn material_weights(
        &self,
        entry_id: &str,
    ) -> std::result::Result<Option<BTreeMap<String, f64>>, StoreError>;
}
