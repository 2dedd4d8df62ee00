//! Bounded memoization table owned by a single search call

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Default entry limit, per table
pub const DEFAULT_CACHE_CAPACITY: usize = 1_000_000;

/// Hash map with a hard entry limit.
///
/// When an insert would exceed the limit the whole table is dropped and
/// refilled from scratch. Losing entries only costs time: every caller
/// recomputes on a miss.
#[derive(Debug)]
pub struct SearchCache<K, V> {
    entries: FxHashMap<K, V>,
    capacity: usize,
    flushes: u64,
}

impl<K: Eq + Hash, V> SearchCache<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            capacity: capacity.max(1),
            flushes: 0,
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            self.entries.clear();
            self.flushes += 1;
        }
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times the table was full and got cleared
    pub fn flushes(&self) -> u64 {
        self.flushes
    }
}

impl<K: Eq + Hash, V> Default for SearchCache<K, V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}
