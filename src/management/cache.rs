use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, RwLock},
};

/// In-memory cache-aside store for the results of one operation.
///
/// Entries are keyed by the operation's argument and never expire. Only
/// successful results are stored. Two concurrent misses for the same key may
/// both compute; the last one to finish wins.
#[derive(Clone)]
pub struct ResultCache<V> {
    operation: &'static str,
    entries: Arc<RwLock<HashMap<String, V>>>,
}

impl<V: Clone> ResultCache<V> {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    pub fn insert(&self, key: String, value: V) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, value);
        }
    }

    /// Returns the cached value for `key`, or runs `compute` and caches its
    /// result when it succeeds.
    pub async fn get_or_try_insert_with<E, F, Fut>(&self, key: &str, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }

        let value = compute().await?;
        self.insert(key.to_string(), value.clone());
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_computes_once_per_key() {
        let cache: ResultCache<u32> = ResultCache::new("square");
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Result<u32, String> = cache
                .get_or_try_insert_with("7", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(49)
                })
                .await;
            assert_eq!(value, Ok(49));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.operation(), "square");
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache: ResultCache<u32> = ResultCache::new("flaky");

        let first: Result<u32, String> = cache
            .get_or_try_insert_with("k", || async { Err("down".to_string()) })
            .await;
        assert!(first.is_err());
        assert!(cache.is_empty());

        let second: Result<u32, String> = cache
            .get_or_try_insert_with("k", || async { Ok(1) })
            .await;
        assert_eq!(second, Ok(1));
        assert_eq!(cache.get("k"), Some(1));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache: ResultCache<String> = ResultCache::new("echo");
        cache.insert("a".into(), "A".into());
        cache.insert("b".into(), "B".into());

        assert_eq!(cache.get("a").as_deref(), Some("A"));
        assert_eq!(cache.get("b").as_deref(), Some("B"));
        assert_eq!(cache.get("c"), None);

        cache.clear();
        assert!(cache.is_empty());
    }
}
