//! Storage Adapters
//!
//! Implementations of the KeyValueStore port backing the durable metric
//! backlog.
//!
//! ## Available Adapters
//!
//! - **FileKeyValueStore** - Stores each key as a file on disk
//! - **InMemoryKeyValueStore** - Stores values in memory (testing)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
//!
//! // Production: file-based storage
//! let storage = FileKeyValueStore::new("./data/analytics");
//!
//! // Testing: in-memory storage
//! let storage = InMemoryKeyValueStore::new();
//! ```

mod file_store;
mod in_memory;

pub use file_store::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;
