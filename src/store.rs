//! Persistence of the [`ProgressRecord`].
//!
//! Every mutation re-reads storage, applies the change and writes it back
//! ([`ProgressRepository::update`]). Nothing is cached between calls so writes
//! from another tab are picked up by the next operation; there is no cross-tab
//! locking and the last writer wins.
//!
//! Failures never escape [`ProgressRepository::load`] or
//! [`ProgressRepository::save`]: they are logged and the tracker carries on
//! with an empty record or an unsaved change.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::status::ProgressRecord;

/// localStorage key used when the page does not configure one.
pub const DEFAULT_STORAGE_KEY: &str = "lessonProgress";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("stored progress is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("progress could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

/// String key-value storage, the shape of `window.localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store. Used natively and in tests; writes can be made to fail
/// to mimic a full or blocked localStorage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Raw stored string, bypassing parsing.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Write("quota exceeded".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`, looked up on every call.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or(StoreError::Unavailable)?
            .local_storage()
            .map_err(|e| StoreError::Read(format!("{e:?}")))?
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Read(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Write(format!("{e:?}")))
    }
}

/// Loads and saves the progress record under a single key.
#[derive(Debug)]
pub struct ProgressRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ProgressRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn try_load(&self) -> Result<ProgressRecord, StoreError> {
        match self.store.get(&self.key)? {
            Some(json) => serde_json::from_str(&json).map_err(StoreError::Malformed),
            None => Ok(ProgressRecord::new()),
        }
    }

    pub fn try_save(&self, record: &ProgressRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record).map_err(StoreError::Encode)?;
        self.store.set(&self.key, &json)
    }

    /// Current record, or an empty one if storage is missing or corrupt.
    pub fn load(&self) -> ProgressRecord {
        self.try_load().unwrap_or_else(|e| {
            log::warn!("could not load progress from {:?}, starting empty: {e}", self.key);
            ProgressRecord::new()
        })
    }

    pub fn save(&self, record: &ProgressRecord) {
        if let Err(e) = self.try_save(record) {
            log::warn!("could not save progress to {:?}: {e}", self.key);
        }
    }

    /// Load, apply `change`, and save if `change` reports a modification.
    /// Returns the resulting record either way.
    pub fn update(&self, change: impl FnOnce(&mut ProgressRecord) -> bool) -> ProgressRecord {
        let mut record = self.load();
        if change(&mut record) {
            self.save(&record);
        }
        record
    }
}
