use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, Mutex},
};

use super::CacheStorage;

/// Shared map with the lock held only for the duration of a single read or
/// write. Entries are append-only for the process lifetime: nothing deletes
/// or evicts, and a key is only ever rewritten with an equal value.
#[derive(Debug, Clone)]
pub struct MemoCache<K, V> {
    cc: CacheStorage<K, V>,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        let cc = Arc::new(Mutex::new(HashMap::<K, V>::new()));
        Self { cc }
    }

    pub fn write(&self, key: K, data: V) -> Option<V> {
        self.cc.lock().unwrap().insert(key, data)
    }

    pub fn read(&self, key: &K) -> Option<V> {
        self.cc.lock().unwrap().get(key).cloned()
    }

    /// Point-in-time copy of the contents, in unspecified order.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.cc
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cc.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cc.lock().unwrap().is_empty()
    }
}

impl<K, V> Default for MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_returns_previous_value() {
        let cache = MemoCache::<i64, i64>::new();

        assert_eq!(cache.write(5, 120), None);
        assert_eq!(cache.write(5, 120), Some(120));
        assert_eq!(cache.read(&5), Some(120));
        assert_eq!(cache.read(&6), None);
    }

    #[test]
    fn entries_snapshots_contents() {
        let cache = MemoCache::<i64, i64>::new();
        cache.write(1, 1);
        cache.write(2, 2);

        let mut entries = cache.entries();
        entries.sort();
        assert_eq!(entries, vec![(1, 1), (2, 2)]);
        assert_eq!(cache.len(), 2);
        assert!(!cache.is_empty());
    }

    #[test]
    fn clones_share_the_same_map() {
        let cache = MemoCache::<i64, i64>::new();
        let other = cache.clone();

        cache.write(10, 55);
        assert_eq!(other.read(&10), Some(55));
    }
}
