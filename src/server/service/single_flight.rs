//! Per-key serialization of fork requests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::server::model::cache::CacheKey;

type LockMap = HashMap<CacheKey, Arc<AsyncMutex<()>>>;

/// Serializes cached fork requests that share a [`CacheKey`].
///
/// Holding the lock for a key across the cache lookup, the GitHub call and the cache write
/// means a second request for the same key waits for the first and then finds its result in
/// the cache, instead of forking again. Requests for different keys never wait on each other.
///
/// Clones share the same lock table.
#[derive(Clone, Default)]
pub struct ForkGuard {
    locks: Arc<Mutex<LockMap>>,
}

/// Lock for one key, released on drop.
///
/// Dropping it, held or still waiting, removes the key from the table once nobody else
/// holds or awaits it.
pub struct ForkLock {
    key: CacheKey,
    locks: Arc<Mutex<LockMap>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl ForkGuard {
    /// Waits until no other request holds `key`, then takes it.
    pub async fn lock(&self, key: &CacheKey) -> ForkLock {
        let entry = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(key.clone()).or_default().clone()
        };

        // Built before waiting so a cancelled waiter still releases its table entry
        let mut lock = ForkLock {
            key: key.clone(),
            locks: self.locks.clone(),
            guard: None,
        };
        lock.guard = Some(entry.lock_owned().await);

        lock
    }

    /// Number of keys currently held or waited on.
    pub fn active_keys(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for ForkLock {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

        // Only the table's own reference left means nobody holds or awaits this key
        if locks
            .get(&self.key)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            locks.remove(&self.key);
        }
    }
}
