use thiserror::Error;

use crate::storage::StorageError;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The persisted document exists but is not a product list.
    #[error("persisted product list under `{key}` is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode product list: {0}")]
    Encode(#[source] serde_json::Error),
}
