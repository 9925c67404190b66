//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// The persistent store failed.
    #[error("Storage failure: {0}")]
    Storage(#[from] pocket_kv::StoreError),

    /// A stored value could not be parsed into a cart item.
    #[error("Malformed cart entry at {key}: {source}")]
    MalformedEntry {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A cart item could not be encoded for storage.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An operation was invoked with an empty product id.
    #[error("Product id must not be empty")]
    EmptyProductId,
}
