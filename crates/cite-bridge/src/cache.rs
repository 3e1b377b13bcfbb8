//! Bounded least-recently-used caches for mapped items and month tables.

use hashlink::LruCache;
use std::hash::Hash;
use std::sync::Arc;

/// Hit and miss counters for a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// An LRU cache of shared values.
///
/// Values are handed out as `Arc`s, so every hit for a key returns the same
/// allocation until the entry is evicted.
pub struct BoundedCache<K, V> {
    entries: LruCache<K, Arc<V>>,
    stats: CacheStats,
}

impl<K: Hash + Eq, V> BoundedCache<K, V> {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Look up a value, marking it as most recently used.
    pub fn get(&mut self, key: &K) -> Option<Arc<V>> {
        match self.entries.get(key) {
            Some(value) => {
                self.stats.hits += 1;
                Some(Arc::clone(value))
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Insert a value, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.entries.insert(key, Arc::clone(&value));
        value
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K, V> std::fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.capacity())
            .field("stats", &self.stats)
            .finish()
    }
}
