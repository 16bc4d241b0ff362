use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const DEFAULT_CAPACITY: usize = 200;
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

struct Entry {
    value: Value,
    inserted_at: Instant,
}

struct PendingUpdate {
    key: String,
    /// Snapshot taken before the optimistic write; `None` when the key
    /// was absent.
    prior: Option<Value>,
}

struct CacheInner {
    entries: HashMap<String, Entry>,
    /// Insertion order for FIFO eviction. Overwrites keep the original slot.
    order: VecDeque<String>,
    pending: HashMap<String, PendingUpdate>,
}

/// Bounded TTL cache with optimistic-mutation bookkeeping, used by the
/// dashboard read paths to mask store latency.
///
/// Eviction is FIFO on insertion order, not LRU. Single-process only;
/// there is no cross-instance invalidation.
pub struct ViewCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
    ttl: Duration,
}

impl ViewCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
                pending: HashMap::new(),
            }),
            capacity,
            ttl,
        }
    }

    pub fn set(&self, key: &str, value: Value) {
        let mut inner = self.inner.lock().unwrap();
        self.insert(&mut inner, key, value);
    }

    /// Value for `key` if present and not past its TTL. Expired entries
    /// are purged on the spot, not just hidden.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut inner = self.inner.lock().unwrap();

        let expired = match inner.entries.get(key) {
            Some(entry) => entry.inserted_at.elapsed() >= self.ttl,
            None => return None,
        };

        if expired {
            Self::remove(&mut inner, key);
            return None;
        }

        inner.entries.get(key).map(|e| e.value.clone())
    }

    /// Apply a mutation to the cached value immediately, before the
    /// backing write completes. Returns an update id to pass to
    /// `confirm` or `revert` once the write settles.
    ///
    /// `Update` shallow-merges `value` over the current entry (or stores
    /// it whole if the key is absent); `Create` replaces; `Delete`
    /// removes the key.
    pub fn optimistic_update(&self, key: &str, value: Value, kind: MutationKind) -> String {
        let mut inner = self.inner.lock().unwrap();

        let prior = inner.entries.get(key).map(|e| e.value.clone());
        let update_id = Uuid::new_v4().to_string();
        inner.pending.insert(
            update_id.clone(),
            PendingUpdate {
                key: key.to_string(),
                prior: prior.clone(),
            },
        );

        match kind {
            MutationKind::Create => self.insert(&mut inner, key, value),
            MutationKind::Update => {
                let merged = match prior {
                    Some(mut current) => {
                        crate::store::merge_fields(&mut current, &value);
                        current
                    }
                    None => value,
                };
                self.insert(&mut inner, key, merged);
            }
            MutationKind::Delete => Self::remove(&mut inner, key),
        }

        update_id
    }

    /// The backing write succeeded; optionally replace the cached value
    /// with the server-confirmed document and drop the bookkeeping.
    pub fn confirm(&self, update_id: &str, final_value: Option<Value>) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(pending) = inner.pending.remove(update_id) {
            if let Some(value) = final_value {
                self.insert(&mut inner, &pending.key, value);
            }
        }
    }

    /// The backing write failed; restore the pre-update snapshot, or
    /// remove the key entirely if there was none.
    pub fn revert(&self, update_id: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(pending) = inner.pending.remove(update_id) {
            match pending.prior {
                Some(value) => self.insert(&mut inner, &pending.key, value),
                None => Self::remove(&mut inner, &pending.key),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, inner: &mut CacheInner, key: &str, value: Value) {
        if !inner.entries.contains_key(key) {
            if inner.entries.len() >= self.capacity {
                // Evict the single oldest-inserted entry still present.
                while let Some(oldest) = inner.order.pop_front() {
                    if inner.entries.remove(&oldest).is_some() {
                        break;
                    }
                }
            }
            inner.order.push_back(key.to_string());
        }
        inner.entries.insert(
            key.to_string(),
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    fn remove(inner: &mut CacheInner, key: &str) {
        inner.entries.remove(key);
        inner.order.retain(|k| k != key);
    }
}

impl Default for ViewCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_get_roundtrip() {
        let cache = ViewCache::new(10, Duration::from_secs(5));
        cache.set("k", json!({"v": 1}));
        assert_eq!(cache.get("k"), Some(json!({"v": 1})));
    }

    #[test]
    fn test_ttl_expiry_purges_entry() {
        let cache = ViewCache::new(10, Duration::from_millis(20));
        cache.set("k", json!({"v": 1}));
        std::thread::sleep(Duration::from_millis(30));

        assert_eq!(cache.get("k"), None);
        // Purged, not hidden.
        assert_eq!(cache.len(), 0);

        cache.set("k", json!({"v": 2}));
        assert_eq!(cache.get("k"), Some(json!({"v": 2})));
    }

    #[test]
    fn test_fifo_eviction_at_capacity() {
        let cache = ViewCache::new(2, Duration::from_secs(5));
        cache.set("a", json!(1));
        cache.set("b", json!(2));
        cache.set("c", json!(3));

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(json!(2)));
        assert_eq!(cache.get("c"), Some(json!(3)));
    }

    #[test]
    fn test_overwrite_keeps_insertion_slot() {
        let cache = ViewCache::new(2, Duration::from_secs(5));
        cache.set("a", json!(1));
        cache.set("b", json!(2));
        cache.set("a", json!(10));
        cache.set("c", json!(3));

        // "a" keeps its original (oldest) slot, so it is the one evicted.
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(json!(2)));
    }

    #[test]
    fn test_optimistic_update_merges_immediately() {
        let cache = ViewCache::new(10, Duration::from_secs(5));
        cache.set("k", json!({"a": 1, "b": 2}));

        let id = cache.optimistic_update("k", json!({"b": 9}), MutationKind::Update);
        assert_eq!(cache.get("k"), Some(json!({"a": 1, "b": 9})));

        cache.confirm(&id, Some(json!({"a": 1, "b": 9, "server": true})));
        assert_eq!(cache.get("k"), Some(json!({"a": 1, "b": 9, "server": true})));
    }

    #[test]
    fn test_revert_restores_prior_value() {
        let cache = ViewCache::new(10, Duration::from_secs(5));
        cache.set("k", json!({"v": 1}));

        let id = cache.optimistic_update("k", json!({"v": 2}), MutationKind::Update);
        assert_eq!(cache.get("k"), Some(json!({"v": 2})));

        cache.revert(&id);
        assert_eq!(cache.get("k"), Some(json!({"v": 1})));
    }

    #[test]
    fn test_revert_removes_key_absent_before() {
        let cache = ViewCache::new(10, Duration::from_secs(5));
        let id = cache.optimistic_update("fresh", json!({"v": 1}), MutationKind::Create);
        assert!(cache.get("fresh").is_some());

        cache.revert(&id);
        assert_eq!(cache.get("fresh"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_optimistic_delete_then_revert() {
        let cache = ViewCache::new(10, Duration::from_secs(5));
        cache.set("k", json!({"v": 1}));

        let id = cache.optimistic_update("k", Value::Null, MutationKind::Delete);
        assert_eq!(cache.get("k"), None);

        cache.revert(&id);
        assert_eq!(cache.get("k"), Some(json!({"v": 1})));
    }
}
