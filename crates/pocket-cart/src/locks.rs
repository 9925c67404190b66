//! Per-product mutual exclusion.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;

use crate::ids::ProductId;

/// Registry of asynchronous locks keyed by product id.
///
/// Every read-modify-write cycle against a product's stored entry runs
/// under that product's lock, so concurrent mutations of the same id
/// cannot interleave between the store read and the store write.
/// Mutations of distinct ids do not contend.
#[derive(Debug, Default)]
pub(crate) struct IdLocks {
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl IdLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Get the lock for `id`, creating it on first use.
    ///
    /// Locks are never evicted: the registry grows with the number of
    /// distinct products touched in a session, which is bounded by the
    /// catalog.
    pub(crate) fn lock_for(&self, id: &ProductId) -> Arc<Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks
            .entry(id.as_str().to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
