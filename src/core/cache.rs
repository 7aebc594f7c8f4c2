use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Time source for cache expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheValue<V> {
    value: V,
    expires_at: Option<Instant>,
}

/// Session-scoped memoization table. Entries live until the cache is dropped,
/// or until `ttl` elapses when one is configured.
pub struct Cache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    inner: Arc<Mutex<HashMap<K, CacheValue<V>>>>,
    ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Send + Sync + Debug,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self::with_policy(None, Arc::new(SystemClock))
    }

    pub fn with_policy(ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            clock,
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let mut cache = self.inner.lock().await;
        let now = self.clock.now();
        let expired = match cache.get(key) {
            None => {
                debug!("Cache MISS for key: {:?}", key);
                return None;
            }
            Some(entry) => entry.expires_at.is_some_and(|expiry| expiry <= now),
        };
        if expired {
            debug!("Cache entry expired for key: {:?}", key);
            cache.remove(key);
            return None;
        }
        debug!("Cache HIT for key: {:?}", key);
        cache.get(key).map(|entry| entry.value.clone())
    }

    pub async fn put(&self, key: K, value: V) {
        let expires_at = self.ttl.map(|ttl| self.clock.now() + ttl);
        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for key: {:?}", key);
        cache.insert(key, CacheValue { value, expires_at });
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Eq + Hash + Send + Sync + Debug,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::test_clock::ManualClock;
    use super::*;

    #[tokio::test]
    async fn test_cache_get_put() {
        let cache = Cache::<String, i32>::new();

        // Initially, cache is empty
        assert!(cache.get(&"key1".to_string()).await.is_none());

        cache.put("key1".to_string(), 123).await;

        assert_eq!(cache.get(&"key1".to_string()).await, Some(123));
        assert!(cache.get(&"key2".to_string()).await.is_none());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_without_ttl_never_expires() {
        let clock = Arc::new(ManualClock::new());
        let cache = Cache::<&str, i32>::with_policy(None, clock.clone());

        cache.put("key1", 1).await;
        clock.advance(Duration::from_secs(60 * 60 * 24 * 365));

        assert_eq!(cache.get(&"key1").await, Some(1));
    }

    #[tokio::test]
    async fn test_cache_ttl_expiration() {
        let clock = Arc::new(ManualClock::new());
        let cache = Cache::<&str, i32>::with_policy(Some(Duration::from_secs(10)), clock.clone());

        cache.put("key1", 1).await;
        clock.advance(Duration::from_secs(9));
        assert_eq!(cache.get(&"key1").await, Some(1));

        clock.advance(Duration::from_secs(1));
        assert!(cache.get(&"key1").await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_separate_caches_do_not_share_entries() {
        let first = Cache::<&str, i32>::new();
        let second = Cache::<&str, i32>::new();

        first.put("key1", 1).await;

        assert!(second.get(&"key1").await.is_none());
    }
}
