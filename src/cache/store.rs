//! Cache Store Module
//!
//! Bounded preview storage combining a HashMap with LRU tracking.

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker, PreviewKey, RenderedImage};

// == Cache Store ==
/// Capacity-bounded map from [`PreviewKey`] to [`RenderedImage`].
///
/// After every `put` the number of entries is at most `capacity`; overflow
/// evicts the least recently used entry. Only successful renders are stored.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<PreviewKey, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker<PreviewKey>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` previews.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(capacity),
            capacity,
        }
    }

    // == Get ==
    /// Retrieves a preview and marks it most recently used.
    ///
    /// Records a hit or a miss in the statistics.
    pub fn get(&mut self, key: &PreviewKey) -> Option<RenderedImage> {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.touch();
                let image = entry.image.clone();
                self.lru.touch(key);
                self.stats.record_hit();
                Some(image)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores a preview, replacing any previous image for the key.
    ///
    /// Evicts least recently used entries until the store is back within
    /// capacity and returns the evicted keys.
    pub fn put(&mut self, key: PreviewKey, image: RenderedImage) -> Vec<PreviewKey> {
        self.entries.insert(key.clone(), CacheEntry::new(image));
        self.lru.touch(&key);

        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            match self.lru.evict_oldest() {
                Some(oldest) => {
                    if let Some(entry) = self.entries.remove(&oldest) {
                        debug!(
                            key = %oldest,
                            hits = entry.hits,
                            idle_ms = entry.idle_for(Utc::now()).num_milliseconds(),
                            "evicted preview"
                        );
                    }
                    self.stats.record_eviction();
                    evicted.push(oldest);
                }
                None => break,
            }
        }

        self.stats.set_total_entries(self.entries.len());
        evicted
    }

    // == Remove ==
    /// Removes a preview by key, returning it if it was cached.
    pub fn remove(&mut self, key: &PreviewKey) -> Option<RenderedImage> {
        let removed = self.entries.remove(key).map(|entry| entry.image);
        if removed.is_some() {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Remove Path ==
    /// Removes every cached size of one path.
    ///
    /// Returns the number of entries removed.
    pub fn remove_path(&mut self, path: &Path) -> usize {
        let keys: Vec<PreviewKey> = self
            .entries
            .keys()
            .filter(|key| key.path() == path)
            .cloned()
            .collect();

        for key in &keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.set_total_entries(self.entries.len());
        keys.len()
    }

    // == Clear ==
    /// Drops every cached preview. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    /// Checks for a cached preview without touching LRU order or stats.
    pub fn contains(&self, key: &PreviewKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns metadata for a cached preview without touching LRU order.
    pub fn entry(&self, key: &PreviewKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Keys ordered from least to most recently used.
    pub fn keys_lru_order(&self) -> Vec<PreviewKey> {
        self.lru.iter_oldest_first().cloned().collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Mutable access for the request pipeline's counters.
    pub(crate) fn stats_mut(&mut self) -> &mut CacheStats {
        &mut self.stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn key(name: &str) -> PreviewKey {
        PreviewKey::new(format!("/tmp/{}.png", name), 100, 100)
    }

    fn image(shade: u8) -> RenderedImage {
        RenderedImage::new(RgbaImage::from_pixel(4, 4, Rgba([shade, shade, shade, 255])))
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = CacheStore::new(100);
        let stored = image(7);

        store.put(key("a"), stored.clone());
        let fetched = store.get(&key("a")).unwrap();

        assert!(fetched.ptr_eq(&stored));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_missing() {
        let mut store = CacheStore::new(100);
        assert!(store.get(&key("missing")).is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_sizes_are_separate_entries() {
        let mut store = CacheStore::new(100);
        store.put(PreviewKey::new("/tmp/a.png", 100, 100), image(1));
        store.put(PreviewKey::new("/tmp/a.png", 200, 200), image(2));

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100);
        let replacement = image(2);

        store.put(key("a"), image(1));
        store.put(key("a"), replacement.clone());

        assert!(store.get(&key("a")).unwrap().ptr_eq(&replacement));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(3);

        store.put(key("a"), image(1));
        store.put(key("b"), image(2));
        store.put(key("c"), image(3));
        let evicted = store.put(key("d"), image(4));

        assert_eq!(evicted, vec![key("a")]);
        assert_eq!(store.len(), 3);
        assert!(store.get(&key("a")).is_none());
        assert!(store.get(&key("b")).is_some());
        assert!(store.get(&key("c")).is_some());
        assert!(store.get(&key("d")).is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = CacheStore::new(3);

        store.put(key("a"), image(1));
        store.put(key("b"), image(2));
        store.put(key("c"), image(3));

        // Access a to make it most recently used
        store.get(&key("a")).unwrap();

        store.put(key("d"), image(4));

        assert!(store.contains(&key("a")));
        assert!(!store.contains(&key("b")));
        assert_eq!(store.keys_lru_order(), vec![key("c"), key("a"), key("d")]);
    }

    #[test]
    fn test_store_zero_capacity_keeps_nothing() {
        let mut store = CacheStore::new(0);
        let evicted = store.put(key("a"), image(1));

        assert_eq!(evicted, vec![key("a")]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_remove() {
        let mut store = CacheStore::new(10);
        store.put(key("a"), image(1));

        assert!(store.remove(&key("a")).is_some());
        assert!(store.remove(&key("a")).is_none());
        assert!(store.is_empty());
        assert!(store.keys_lru_order().is_empty());
    }

    #[test]
    fn test_store_remove_path_drops_all_sizes() {
        let mut store = CacheStore::new(10);
        store.put(PreviewKey::new("/tmp/a.png", 100, 100), image(1));
        store.put(PreviewKey::new("/tmp/a.png", 64, 64), image(2));
        store.put(PreviewKey::new("/tmp/b.png", 100, 100), image(3));

        let removed = store.remove_path(Path::new("/tmp/a.png"));

        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert!(store.contains(&PreviewKey::new("/tmp/b.png", 100, 100)));
        assert_eq!(store.stats().total_entries, 1);
    }

    #[test]
    fn test_store_clear_keeps_counters() {
        let mut store = CacheStore::new(10);
        store.put(key("a"), image(1));
        store.get(&key("a"));
        store.clear();

        let stats = store.stats();
        assert!(store.is_empty());
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_store_entry_metadata() {
        let mut store = CacheStore::new(10);
        store.put(key("a"), image(1));
        store.get(&key("a"));
        store.get(&key("a"));

        assert_eq!(store.entry(&key("a")).unwrap().hits, 2);
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(100);

        store.put(key("a"), image(1));
        store.get(&key("a"));
        store.get(&key("missing"));

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.capacity, 100);
    }
}
