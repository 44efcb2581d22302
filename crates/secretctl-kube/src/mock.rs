//! In-memory test doubles
//!
//! [`InMemoryObjectClient`] behaves like a single-namespace-aware API server
//! without requiring a Kubernetes cluster, and [`RecordingLogger`] captures
//! log records so tests can assert on them.

use async_trait::async_trait;
use kube::Resource;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::client::{ObjectClient, kind_of};
use crate::context::OpContext;
use crate::error::{Result, SecretError};
use crate::identity::ObjectKey;
use crate::logger::Logger;

/// Counts of operations performed for testing assertions
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationCounts {
    pub gets: usize,
    pub creates: usize,
    pub updates: usize,
    pub deletes: usize,
}

struct Store<K> {
    /// namespace -> name -> object
    objects: HashMap<String, HashMap<String, K>>,
    /// Last resourceVersion handed out
    last_version: u64,
}

impl<K> Store<K> {
    fn next_version(&mut self) -> String {
        self.last_version += 1;
        self.last_version.to_string()
    }
}

/// In-memory [`ObjectClient`] for testing
///
/// Create and update stamp `metadata.resourceVersion` from a shared counter;
/// update rejects a non-empty version that does not match the stored one.
pub struct InMemoryObjectClient<K> {
    store: Arc<RwLock<Store<K>>>,
    operations: Arc<RwLock<OperationCounts>>,
}

impl<K> Clone for InMemoryObjectClient<K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            operations: Arc::clone(&self.operations),
        }
    }
}

impl<K> Default for InMemoryObjectClient<K> {
    fn default() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                objects: HashMap::new(),
                last_version: 0,
            })),
            operations: Arc::new(RwLock::new(OperationCounts::default())),
        }
    }
}

impl<K> InMemoryObjectClient<K>
where
    K: Resource + Clone,
{
    /// Create a new empty client
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-populated objects
    ///
    /// Objects without a namespace or name are skipped.
    pub fn with_objects(objects: impl IntoIterator<Item = K>) -> Self {
        let client = Self::new();
        {
            let mut store = client.store.write().unwrap_or_else(PoisonError::into_inner);
            for mut object in objects {
                let Ok(key) = ObjectKey::from_object(&object) else {
                    continue;
                };
                if object.meta().resource_version.is_none() {
                    object.meta_mut().resource_version = Some(store.next_version());
                }
                store
                    .objects
                    .entry(key.namespace)
                    .or_default()
                    .insert(key.name, object);
            }
        }
        client
    }

    /// Get operation counts for assertions
    pub fn operation_counts(&self) -> OperationCounts {
        self.operations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reset operation counts
    pub fn reset_counts(&self) {
        *self.operations.write().unwrap_or_else(PoisonError::into_inner) =
            OperationCounts::default();
    }

    /// Count stored objects across all namespaces
    pub fn object_count(&self) -> usize {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.objects.values().map(HashMap::len).sum()
    }

    /// Whether an object exists, without touching the counters
    pub fn contains(&self, key: &ObjectKey) -> bool {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store
            .objects
            .get(&key.namespace)
            .is_some_and(|ns| ns.contains_key(&key.name))
    }

    fn count(&self, bump: impl FnOnce(&mut OperationCounts)) {
        bump(&mut self.operations.write().unwrap_or_else(PoisonError::into_inner));
    }
}

#[async_trait]
impl<K> ObjectClient<K> for InMemoryObjectClient<K>
where
    K: Resource + Clone + Send + Sync + 'static,
    K::DynamicType: Default,
{
    async fn get(&self, ctx: &OpContext, key: &ObjectKey) -> Result<K> {
        ctx.check()?;
        self.count(|ops| ops.gets += 1);

        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store
            .objects
            .get(&key.namespace)
            .and_then(|ns| ns.get(&key.name))
            .cloned()
            .ok_or_else(|| SecretError::not_found(&kind_of::<K>(), key))
    }

    async fn create(&self, ctx: &OpContext, object: &K) -> Result<()> {
        ctx.check()?;
        let key = ObjectKey::from_object(object)?;
        self.count(|ops| ops.creates += 1);

        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let exists = store
            .objects
            .get(&key.namespace)
            .is_some_and(|ns| ns.contains_key(&key.name));
        if exists {
            return Err(SecretError::already_exists(&kind_of::<K>(), &key));
        }

        let mut stored = object.clone();
        stored.meta_mut().resource_version = Some(store.next_version());
        store
            .objects
            .entry(key.namespace)
            .or_default()
            .insert(key.name, stored);
        Ok(())
    }

    async fn update(&self, ctx: &OpContext, object: &K) -> Result<()> {
        ctx.check()?;
        let key = ObjectKey::from_object(object)?;
        self.count(|ops| ops.updates += 1);

        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let current_version = store
            .objects
            .get(&key.namespace)
            .and_then(|ns| ns.get(&key.name))
            .map(|existing| existing.meta().resource_version.clone())
            .ok_or_else(|| SecretError::not_found(&kind_of::<K>(), &key))?;

        let incoming = object
            .meta()
            .resource_version
            .as_deref()
            .filter(|v| !v.is_empty());
        if let Some(incoming) = incoming {
            if current_version.as_deref() != Some(incoming) {
                return Err(SecretError::conflict(
                    &kind_of::<K>(),
                    &key,
                    "the object has been modified; please apply your changes to the latest version",
                ));
            }
        }

        let mut stored = object.clone();
        stored.meta_mut().resource_version = Some(store.next_version());
        store
            .objects
            .entry(key.namespace)
            .or_default()
            .insert(key.name, stored);
        Ok(())
    }

    async fn delete(&self, ctx: &OpContext, object: &K) -> Result<()> {
        ctx.check()?;
        let key = ObjectKey::from_object(object)?;
        self.count(|ops| ops.deletes += 1);

        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        store
            .objects
            .get_mut(&key.namespace)
            .and_then(|ns| ns.remove(&key.name))
            .map(|_| ())
            .ok_or_else(|| SecretError::not_found(&kind_of::<K>(), &key))
    }
}

/// A captured log record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub message: String,
    pub values: BTreeMap<String, String>,
}

impl LogRecord {
    /// Look up an attribute by key
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// [`Logger`] that keeps every record in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records captured so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str, values: &[(&str, &str)]) {
        let record = LogRecord {
            message: message.to_string(),
            values: values
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        };
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}
