//! Per-key single-flight locking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<AsyncMutex<()>>>;

fn lock_map(map: &Mutex<LockMap>) -> MutexGuard<'_, LockMap> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

/// RAII guard that releases the key lock when dropped.
///
/// The table entry is evicted when no other caller holds or waits on it.
/// A waiter cancelled after the holder released leaves its entry behind;
/// such entries are pruned by the next [`KeyLockTable::acquire`].
pub struct KeyGuard {
    key: String,
    permit: OwnedMutexGuard<()>,
    table: Arc<Mutex<LockMap>>,
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        let mut map = lock_map(&self.table);
        let slot = OwnedMutexGuard::mutex(&self.permit);
        // One reference in the map, one held by this guard's permit.
        let idle = Arc::strong_count(slot) == 2
            && map.get(&self.key).is_some_and(|entry| Arc::ptr_eq(entry, slot));
        if idle {
            map.remove(&self.key);
        }
    }
}

impl std::fmt::Debug for KeyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGuard").field("key", &self.key).finish()
    }
}

/// Table of async mutexes keyed by a key's canonical string.
///
/// Distinct keys never contend; the table-level mutex is only held long
/// enough to find or insert an entry.
#[derive(Debug, Clone, Default)]
pub struct KeyLockTable {
    locks: Arc<Mutex<LockMap>>,
}

impl KeyLockTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn acquire(&self, key: &str) -> KeyGuard {
        let slot = {
            let mut map = lock_map(&self.locks);
            // Only the map references an abandoned entry.
            map.retain(|_, entry| Arc::strong_count(entry) > 1);
            Arc::clone(map.entry(key.to_string()).or_default())
        };
        let permit = slot.lock_owned().await;
        KeyGuard {
            key: key.to_string(),
            permit,
            table: Arc::clone(&self.locks),
        }
    }

    /// Number of keys currently held or awaited.
    #[must_use]
    pub fn len(&self) -> usize {
        lock_map(&self.locks).len()
    }

    /// Whether no key is held or awaited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn entry_is_evicted_after_release() {
        let table = KeyLockTable::new();
        {
            let _guard = table.acquire("female/en/hello").await;
            assert_eq!(table.len(), 1);
        }
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn distinct_keys_do_not_block() {
        let table = KeyLockTable::new();
        let _a = table.acquire("a").await;
        let b = tokio::time::timeout(Duration::from_millis(100), table.acquire("b")).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn same_key_waits_for_release() {
        let table = KeyLockTable::new();
        let first = table.acquire("k").await;

        let waiter = {
            let table = table.clone();
            tokio::spawn(async move {
                let _g = table.acquire("k").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());
        assert_eq!(table.len(), 1);

        drop(first);
        waiter.await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn cancelled_waiter_entry_is_pruned() {
        let table = KeyLockTable::new();
        let first = table.acquire("k").await;

        let waiter = {
            let table = table.clone();
            tokio::spawn(async move {
                let _g = table.acquire("k").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Release and cancel the waiter before it can take the lock.
        drop(first);
        waiter.abort();
        assert!(waiter.await.unwrap_err().is_cancelled());

        let other = table.acquire("other").await;
        assert_eq!(table.len(), 1);
        drop(other);
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn held_key_survives_pruning() {
        let table = KeyLockTable::new();
        let held = table.acquire("k").await;
        let _other = table.acquire("other").await;
        assert_eq!(table.len(), 2);

        let waiter = {
            let table = table.clone();
            tokio::spawn(async move {
                let _g = table.acquire("k").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(held);
        waiter.await.unwrap();
    }
}
