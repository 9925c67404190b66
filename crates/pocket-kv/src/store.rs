//! The key-value storage port and merge semantics.

use async_trait::async_trait;
use serde_json::Value;

use crate::StoreError;

/// Durable mapping from string key to JSON text value.
///
/// The cart layer persists through this trait and never sees a concrete
/// backend. Every method is an asynchronous I/O boundary.
///
/// # Implementations
///
/// - [`MemoryStore`](crate::MemoryStore): process-local, for tests
/// - [`FileStore`](crate::FileStore): JSON document on disk, durable
///   across process restarts
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any existing value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Shallow-merge the JSON object `partial` into the value stored
    /// under `key`. Creates the entry if absent.
    ///
    /// Fails with [`StoreError::InvalidMerge`] if either side is not a
    /// JSON object.
    async fn merge(&self, key: &str, partial: &str) -> Result<(), StoreError>;

    /// Bulk-read the given keys, pairing each with its value if present.
    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, StoreError>;

    /// Enumerate every key in the store. Ordering is backend-defined.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Shallow-merge `partial` into `existing`, returning the merged JSON
/// text.
///
/// Fields present in `partial` overwrite fields of the same name in
/// `existing`; other fields are kept. With no existing value the partial
/// becomes the stored value wholesale. Both sides must be JSON objects.
///
/// Backends share this helper so merge semantics cannot drift between
/// them; external implementations of [`KeyValueStore`] may reuse it.
pub fn merge_json(key: &str, existing: Option<&str>, partial: &str) -> Result<String, StoreError> {
    let patch: Value = serde_json::from_str(partial)?;
    let Value::Object(patch_fields) = patch else {
        return Err(StoreError::InvalidMerge(key.to_string()));
    };

    let Some(raw) = existing else {
        return Ok(partial.to_string());
    };

    let mut base: Value = serde_json::from_str(raw)?;
    let Value::Object(base_fields) = &mut base else {
        return Err(StoreError::InvalidMerge(key.to_string()));
    };

    for (name, value) in patch_fields {
        base_fields.insert(name, value);
    }

    Ok(base.to_string())
}
