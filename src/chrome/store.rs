/// Browser-backed key-value stores: `chrome.storage.local`, with `localStorage` as fallback

use super::bridge::{from_js, getStorage, hasExtensionStorage, js_error_message, setStorage, to_js};
use crate::error::{Error, Result};
use crate::storage::{KeyValueStore, MemoryStore};
use async_trait::async_trait;
use log::{info, warn};
use serde_json::Value;

/// Extension-local storage
pub struct ChromeStore;

#[async_trait(?Send)]
impl KeyValueStore for ChromeStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let value = getStorage(key)
            .await
            .map_err(|e| Error::storage(js_error_message(&e)))?;

        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }
        from_js(value).map(Some)
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let js_value = to_js(&value)?;
        setStorage(key, js_value)
            .await
            .map_err(|e| Error::storage(js_error_message(&e)))
    }
}

/// Page-local storage; values are stored as JSON strings
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> Option<LocalStore> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(LocalStore { storage })
    }
}

#[async_trait(?Send)]
impl KeyValueStore for LocalStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let raw = self
            .storage
            .get_item(key)
            .map_err(|e| Error::storage(js_error_message(&e)))?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let text = serde_json::to_string(&value)?;
        self.storage
            .set_item(key, &text)
            .map_err(|e| Error::storage(js_error_message(&e)))
    }
}

/// Whichever store the current execution context can reach
pub enum BrowserStore {
    Extension(ChromeStore),
    Local(LocalStore),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn detect() -> BrowserStore {
        if hasExtensionStorage() {
            info!("Using chrome.storage.local");
            return BrowserStore::Extension(ChromeStore);
        }
        match LocalStore::open() {
            Some(store) => {
                info!("chrome.storage unavailable; using localStorage");
                BrowserStore::Local(store)
            }
            None => {
                warn!("No persistent storage available; data will not survive a reload");
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

#[async_trait(?Send)]
impl KeyValueStore for BrowserStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        match self {
            BrowserStore::Extension(store) => store.get(key).await,
            BrowserStore::Local(store) => store.get(key).await,
            BrowserStore::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        match self {
            BrowserStore::Extension(store) => store.set(key, value).await,
            BrowserStore::Local(store) => store.set(key, value).await,
            BrowserStore::Memory(store) => store.set(key, value).await,
        }
    }
}
