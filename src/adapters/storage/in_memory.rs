//! In-memory key-value store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::ports::{KeyValueStore, StoreError};

/// Test store that keeps values in a map.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned, which only happens
/// if another test thread panicked while holding it.
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
    failing: AtomicBool,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Switches the store into (or out of) failing mode.
    ///
    /// While failing, every operation returns a backend error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.values
            .read()
            .expect("InMemoryKeyValueStore: values lock poisoned")
            .len()
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_failing(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Backend(
                "simulated storage failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_failing()?;
        Ok(self
            .values
            .read()
            .expect("InMemoryKeyValueStore: values lock poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_failing()?;
        self.values
            .write()
            .expect("InMemoryKeyValueStore: values lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_failing()?;
        self.values
            .write()
            .expect("InMemoryKeyValueStore: values lock poisoned")
            .remove(key);
        Ok(())
    }
}
