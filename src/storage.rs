/// Storage adapter: named buckets over an async key-value backend
///
/// Every bucket has its own async mutex. `save` and `update` hold it across the
/// whole read-modify-write, so concurrent writers to one bucket queue up instead
/// of clobbering each other. Reads take no lock.

use crate::error::Result;
use async_trait::async_trait;
use futures_util::lock::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// The persisted buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    TabHistory,
    TabFolders,
    SavedSessions,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::TabHistory, Bucket::TabFolders, Bucket::SavedSessions];

    pub fn key(self) -> &'static str {
        match self {
            Bucket::TabHistory => "tabHistory",
            Bucket::TabFolders => "tabFolders",
            Bucket::SavedSessions => "savedSessions",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Raw async key-value storage. A missing key is `Ok(None)`, never an error.
#[async_trait(?Send)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// In-process store, used in tests and when no browser storage is reachable
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.values.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

/// Typed bucket access with per-bucket write serialization
pub struct Store<S> {
    backend: S,
    locks: [Mutex<()>; 3],
}

impl<S: KeyValueStore> Store<S> {
    pub fn new(backend: S) -> Self {
        Store {
            backend,
            locks: [Mutex::new(()), Mutex::new(()), Mutex::new(())],
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load a bucket, falling back to `T::default()` when it was never written
    pub async fn load<T>(&self, bucket: Bucket) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.backend.get(bucket.key()).await? {
            Some(Value::Null) | None => Ok(T::default()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    pub async fn save<T: Serialize>(&self, bucket: Bucket, value: &T) -> Result<()> {
        let _guard = self.locks[bucket.index()].lock().await;
        self.write(bucket, value).await
    }

    /// Read-modify-write a bucket while holding its lock
    pub async fn update<T, R, F>(&self, bucket: Bucket, mutate: F) -> Result<R>
    where
        T: DeserializeOwned + Serialize + Default,
        F: FnOnce(&mut T) -> R,
    {
        let _guard = self.locks[bucket.index()].lock().await;
        let mut value: T = self.load(bucket).await?;
        let out = mutate(&mut value);
        self.write(bucket, &value).await?;
        Ok(out)
    }

    async fn write<T: Serialize>(&self, bucket: Bucket, value: &T) -> Result<()> {
        let json = serde_json::to_value(value)?;
        self.backend.set(bucket.key(), json).await
    }
}
