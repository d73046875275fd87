use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use rxlog_core::keys::{self, Collection};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::{Document, DocumentStore};

type Collections = BTreeMap<Collection, BTreeMap<String, Value>>;

/// Process-local document store. Clones share the same documents.
///
/// Used by tests and offline runs. [`MemoryStore::set_unavailable`]
/// simulates an unreachable backend: every operation then fails with
/// `StorageError::Unavailable`. [`MemoryStore::set_unavailable_for`] does the
/// same for a single collection.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
    unavailable: Arc<AtomicBool>,
    failing: Arc<Mutex<BTreeSet<Collection>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_unavailable_for(&self, collection: Collection, unavailable: bool) {
        let mut failing = self.failing.lock().unwrap_or_else(PoisonError::into_inner);
        if unavailable {
            failing.insert(collection);
        } else {
            failing.remove(&collection);
        }
    }

    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, BTreeMap::len)
    }

    fn check_available(&self, collection: Collection) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store offline".to_string()));
        }
        let failing = self.failing.lock().unwrap_or_else(PoisonError::into_inner);
        if failing.contains(&collection) {
            return Err(StorageError::Unavailable(format!(
                "{} collection offline",
                collection.prefix().trim_end_matches('/')
            )));
        }
        Ok(())
    }
}

fn not_found(collection: Collection, id: &str) -> StorageError {
    StorageError::NotFound {
        key: keys::document(collection, id),
    }
}

impl DocumentStore for MemoryStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StorageError> {
        self.check_available(collection)?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .into_iter()
            .flatten()
            .map(|(id, body)| Document {
                id: id.clone(),
                body: body.clone(),
            })
            .collect())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Document, StorageError> {
        self.check_available(collection)?;
        let collections = self.collections.read().await;
        let body = collections
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .ok_or_else(|| not_found(collection, id))?;
        Ok(Document {
            id: id.to_string(),
            body: body.clone(),
        })
    }

    async fn put(&self, collection: Collection, id: &str, body: Value) -> Result<(), StorageError> {
        self.check_available(collection)?;
        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .insert(id.to_string(), body);
        Ok(())
    }

    async fn merge(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StorageError> {
        self.check_available(collection)?;
        let mut collections = self.collections.write().await;
        let body = collections
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| not_found(collection, id))?;
        let existing = body.as_object_mut().ok_or_else(|| StorageError::NotAnObject {
            key: keys::document(collection, id),
        })?;
        existing.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StorageError> {
        self.check_available(collection)?;
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(&collection) {
            docs.remove(id);
        }
        Ok(())
    }
}
