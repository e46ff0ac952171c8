//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with uniform TTL expiry and a
//! capacity bound. When the cache is full, the entry with the earliest expiry
//! is evicted before a new key is inserted; with a uniform TTL this
//! approximates FIFO eviction because insertion order and expiry order
//! coincide.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// In-memory cache with TTL expiry and earliest-expiry eviction.
///
/// Generic over the stored value so one store can hold a tagged result enum
/// without losing type safety at call sites.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// TTL applied to every entry
    ttl: Duration,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Performance statistics
    stats: CacheStats,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and uniform TTL.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            max_entries,
            stats: CacheStats::new(),
        }
    }

    // == Insert ==
    /// Stores a value under `key`, expiring `ttl` from now.
    ///
    /// Overwriting an existing key resets its TTL. Inserting a new key while
    /// at capacity first evicts exactly one entry: the one with the earliest
    /// expiry (ties broken arbitrarily). The capacity bound therefore holds
    /// at every observation point.
    pub fn insert(&mut self, key: String, value: V) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(victim) = self.earliest_expiring_key() {
                self.entries.remove(&victim);
                self.stats.record_eviction();
            }
        }

        self.entries.insert(key, CacheEntry::new(value, self.ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves the value under `key` if present and not expired.
    ///
    /// Expiry is checked lazily on every read, independent of the background
    /// sweep: an expired-but-unswept entry reads as absent and is removed.
    pub fn get(&mut self, key: &str) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                return None;
            }

            let value = entry.value.clone();
            self.stats.record_hit();
            Some(value)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Remove ==
    /// Removes an entry by key. Returns true if the key was present.
    #[allow(dead_code)]
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    /// Removes every entry.
    #[allow(dead_code)]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed. This is the background sweep;
    /// read correctness never depends on it having run.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Eviction Scan ==
    /// Returns the key with the earliest expiry.
    ///
    /// O(n) in the current entry count, which is acceptable at hundreds to
    /// low thousands of entries. TODO: replace with an index ordered by
    /// expiry if the configured capacity grows beyond that.
    fn earliest_expiring_key(&self) -> Option<String> {
        self.entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone())
    }
}
