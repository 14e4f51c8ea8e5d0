//! Per-key serialization of writes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::cache::mutex_lock;

const SOURCE: &str = "services::keyed_lock";

/// One async mutex per setting key.
///
/// Serializes the probe-then-write sequence of concurrent upserts on the same
/// key inside this process. Entries are kept for the life of the service;
/// the key space is the small set of settings an operator edits.
#[derive(Default)]
pub(crate) struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    pub(crate) async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = mutex_lock(&self.locks, SOURCE, "lock");
            Arc::clone(locks.entry(key.to_string()).or_default())
        };
        lock.lock_owned().await
    }
}
