//! Listing memo
//!
//! Results are kept per store key for the lifetime of the cache. There is
//! no eviction; the owner calls [`ListCache::clear`] when the underlying
//! tables change.

use cms_core::models::AnnotatedAsset;
use cms_core::pagination::PaginatedResult;
use cms_queries::CacheKey;
use dashmap::DashMap;

/// Concurrent memo of listing results keyed by store key
#[derive(Debug)]
pub struct ListCache<V = PaginatedResult<AnnotatedAsset>> {
    entries: DashMap<CacheKey, V>,
}

impl<V: Clone> ListCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Store `value`, returning the previous entry for `key`
    pub fn insert(&self, key: CacheKey, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn invalidate(&self, key: &CacheKey) -> Option<V> {
        self.entries.remove(key).map(|(_, value)| value)
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for ListCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_queries::{store_key, FilterState};

    #[test]
    fn test_entries_are_keyed_by_filter_state() {
        let cache: ListCache<Vec<i64>> = ListCache::new();
        let news = store_key("list", &FilterState::new().search("news"));
        let blog = store_key("list", &FilterState::new().search("blog"));

        cache.insert(news.clone(), vec![1, 2]);

        assert_eq!(cache.get(&news), Some(vec![1, 2]));
        assert_eq!(cache.get(&blog), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache: ListCache<i64> = ListCache::default();
        let first = store_key("list", &FilterState::new().page(0, 20));
        let second = store_key("list", &FilterState::new().page(20, 20));

        cache.insert(first.clone(), 1);
        cache.insert(second.clone(), 2);

        assert_eq!(cache.invalidate(&first), Some(1));
        assert_eq!(cache.get(&first), None);

        cache.clear();
        assert!(cache.is_empty());
    }
}
