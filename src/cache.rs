use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::data::{EnrichedDataset, Item};

/// Enriched datasets keyed by view (`{dimension}_{value}`).
///
/// Values are handed out as `Arc` snapshots; `put` swaps the whole entry, so a
/// reader either sees the previous dataset or the new one.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: RwLock<HashMap<String, Arc<EnrichedDataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    pub fn keys(&self) -> BTreeSet<String> {
        self.read().keys().cloned().collect()
    }

    pub fn get(&self, key: &str) -> Option<Arc<EnrichedDataset>> {
        self.read().get(key).cloned()
    }

    /// Stores `dataset` under `key`, replacing whatever was there.
    pub fn put(&self, key: &str, dataset: EnrichedDataset) -> Arc<EnrichedDataset> {
        let dataset = Arc::new(dataset);
        self.write().insert(key.to_string(), Arc::clone(&dataset));
        dataset
    }

    pub fn lookup_item(&self, key: &str, id: &str) -> Option<Item> {
        let dataset = self.get(key)?;
        dataset.item(id).cloned()
    }

    pub fn evict(&self, key: &str) -> bool {
        self.write().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock can only happen between whole-entry
    // operations, so the map is still consistent after poisoning.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<EnrichedDataset>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<EnrichedDataset>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
