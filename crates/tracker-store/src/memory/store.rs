use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;
use bson::Document;
use imbl::OrdMap;
use tracker_query::CompositeQuery;

use crate::error::StoreError;
use crate::eval;
use crate::key::Key;
use crate::store::Store;

type Entities = OrdMap<Key, Document>;

/// In-memory entity store.
///
/// Readers query a point-in-time snapshot without locking. Writers serialize
/// on `write_lock`, clone the map (cheap due to imbl structural sharing),
/// apply the change and swap the new map in.
pub struct MemoryStore {
    entities: ArcSwap<Entities>,
    write_lock: Mutex<()>,
    next_key: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entities: ArcSwap::from_pointee(OrdMap::new()),
            write_lock: Mutex::new(()),
            next_key: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.load().is_empty()
    }

    pub fn get(&self, key: Key) -> Option<Document> {
        self.entities.load().get(&key).cloned()
    }

    /// Apply `f` to a private copy of the entities and publish the result.
    fn write<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Entities),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("write lock poisoned: {e}")))?;
        let mut data = (**self.entities.load()).clone();
        f(&mut data);
        self.entities.store(Arc::new(data));
        Ok(())
    }
}

impl Store for MemoryStore {
    fn allocate_key(&self) -> Result<Key, StoreError> {
        Ok(Key::new(self.next_key.fetch_add(1, Ordering::Relaxed)))
    }

    fn put(&self, key: Key, fields: Document) -> Result<(), StoreError> {
        self.write(|data| {
            data.insert(key, fields);
        })
    }

    fn query(&self, query: &CompositeQuery) -> Result<Vec<(Key, Document)>, StoreError> {
        let snapshot = self.entities.load_full();
        Ok(snapshot
            .iter()
            .filter(|(_, doc)| eval::matches(doc, query))
            .map(|(key, doc)| (*key, doc.clone()))
            .collect())
    }

    fn delete(&self, key: Key) -> Result<(), StoreError> {
        if !self.entities.load().contains_key(&key) {
            return Ok(());
        }
        self.write(|data| {
            data.remove(&key);
        })
    }
}
