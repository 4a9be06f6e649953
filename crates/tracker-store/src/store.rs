use bson::Document;
use tracker_query::CompositeQuery;

use crate::error::StoreError;
use crate::key::Key;

/// Schemaless entity store collaborator.
pub trait Store {
    /// Reserve a fresh key for an entity about to be written.
    fn allocate_key(&self) -> Result<Key, StoreError>;

    /// Insert or replace the entity stored under `key`.
    fn put(&self, key: Key, fields: Document) -> Result<(), StoreError>;

    /// Return every entity matching `query`.
    fn query(&self, query: &CompositeQuery) -> Result<Vec<(Key, Document)>, StoreError>;

    /// Remove the entity under `key`. Deleting an absent key is a no-op.
    fn delete(&self, key: Key) -> Result<(), StoreError>;
}

impl<S: Store + ?Sized> Store for &S {
    fn allocate_key(&self) -> Result<Key, StoreError> {
        (**self).allocate_key()
    }

    fn put(&self, key: Key, fields: Document) -> Result<(), StoreError> {
        (**self).put(key, fields)
    }

    fn query(&self, query: &CompositeQuery) -> Result<Vec<(Key, Document)>, StoreError> {
        (**self).query(query)
    }

    fn delete(&self, key: Key) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    fn allocate_key(&self) -> Result<Key, StoreError> {
        (**self).allocate_key()
    }

    fn put(&self, key: Key, fields: Document) -> Result<(), StoreError> {
        (**self).put(key, fields)
    }

    fn query(&self, query: &CompositeQuery) -> Result<Vec<(Key, Document)>, StoreError> {
        (**self).query(query)
    }

    fn delete(&self, key: Key) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}
