//! In-memory [`ObjectStore`] for tests and local development.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::ObjectStore;
use crate::error::StorageError;

/// Object store holding everything in a shared `BTreeMap`, so prefix
/// listings come back in the same lexicographic order S3 uses.
#[derive(Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().expect("store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().expect("store lock").contains_key(key)
    }
}

impl ObjectStore for MemoryStore {
    async fn get_object(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.objects
            .lock()
            .expect("store lock")
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
        self.objects
            .lock()
            .expect("store lock")
            .insert(key.to_string(), body);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .objects
            .lock()
            .expect("store lock")
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        self.objects.lock().expect("store lock").remove(key);
        Ok(())
    }
}
