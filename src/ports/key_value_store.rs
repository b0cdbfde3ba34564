//! KeyValueStore port - Interface for durable string persistence.
//!
//! The durable metric queue stores its backlog as a JSON array under a
//! single logical key, so the contract is deliberately small: get, set,
//! remove. Operations are synchronous; implementations are expected to be
//! fast local storage, not network services.

/// Port for persisting opaque string values by key.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value for `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Errors from the persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying storage failed.
    #[error("storage error: {0}")]
    Backend(String),
}
