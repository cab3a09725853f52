//! Inventory store.
//!
//! The store is the only owner of the product collection. Every mutator loads
//! the whole collection from a [`KeyValueStorage`] backend, changes it, and
//! writes the whole collection back under a single key.

pub mod error;
pub mod scan;
pub mod storage;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use scan::{ScanResolution, ScanSession, resolve_scan};
pub use storage::{InMemoryStorage, KeyValueStorage, StorageError};
pub use store::{DEFAULT_STORAGE_KEY, InventoryStore};
