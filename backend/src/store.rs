use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use redis::Client as RedisClient;
use tokio::sync::Mutex;

use crate::error::Error;

// Memory maps at or above this size drop expired entries before counting
const MEMORY_SWEEP_THRESHOLD: usize = 1024;

pub struct MemoryEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl MemoryEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| at > now)
    }
}

/// Key-value backing for the segment list and rate-limit counters.
///
/// `Memory` keeps everything in-process and is used when no Redis URL is
/// configured and in tests.
#[derive(Clone)]
pub enum KeyValueStore {
    Redis(RedisClient),
    Memory(Arc<Mutex<HashMap<String, MemoryEntry>>>),
}

impl KeyValueStore {
    pub fn redis(url: &str) -> Result<Self, Error> {
        Ok(KeyValueStore::Redis(RedisClient::open(url)?))
    }

    pub fn memory() -> Self {
        KeyValueStore::Memory(Arc::new(Mutex::new(HashMap::new())))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            KeyValueStore::Redis(_) => "redis",
            KeyValueStore::Memory(_) => "memory",
        }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match self {
            KeyValueStore::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
                Ok(value)
            }
            KeyValueStore::Memory(map) => {
                let map = map.lock().await;
                let now = Instant::now();
                Ok(map
                    .get(key)
                    .filter(|entry| entry.is_live(now))
                    .map(|entry| entry.value.clone()))
            }
        }
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        match self {
            KeyValueStore::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let _: () = redis::cmd("SET").arg(key).arg(value).query_async(&mut conn).await?;
                Ok(())
            }
            KeyValueStore::Memory(map) => {
                map.lock().await.insert(
                    key.to_string(),
                    MemoryEntry {
                        value: value.to_string(),
                        expires_at: None,
                    },
                );
                Ok(())
            }
        }
    }

    /// Counts one request against `key` in a fixed window and returns the
    /// total for the current window, this request included.
    pub async fn hit(&self, key: &str, window: Duration) -> Result<u32, Error> {
        match self {
            KeyValueStore::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let (count,): (u32,) = hit_pipeline(key, window).query_async(&mut conn).await?;
                Ok(count)
            }
            KeyValueStore::Memory(map) => {
                let mut map = map.lock().await;
                let now = Instant::now();
                if map.len() >= MEMORY_SWEEP_THRESHOLD {
                    map.retain(|_, entry| entry.is_live(now));
                }
                let count = match map.get(key) {
                    Some(entry) if entry.is_live(now) => entry.value.parse::<u32>().unwrap_or(0) + 1,
                    _ => 1,
                };
                let expires_at = match map.get(key) {
                    Some(entry) if count > 1 => entry.expires_at,
                    _ => Some(now + window),
                };
                map.insert(
                    key.to_string(),
                    MemoryEntry {
                        value: count.to_string(),
                        expires_at,
                    },
                );
                Ok(count)
            }
        }
    }
}

/// Creates the counter with its expiry in the same transaction as the first
/// increment, so a counter can never exist without a TTL.
fn hit_pipeline(key: &str, window: Duration) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("SET")
        .arg(key)
        .arg(0)
        .arg("EX")
        .arg(window.as_secs().max(1))
        .arg("NX")
        .ignore()
        .cmd("INCR")
        .arg(key);
    pipe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_get_set() {
        let store = KeyValueStore::memory();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_memory_hit_counts_within_window() {
        let store = KeyValueStore::memory();
        let window = Duration::from_secs(60);
        assert_eq!(store.hit("rate:spin:a", window).await.unwrap(), 1);
        assert_eq!(store.hit("rate:spin:a", window).await.unwrap(), 2);
        assert_eq!(store.hit("rate:spin:b", window).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_memory_hit_resets_after_window() {
        let store = KeyValueStore::memory();
        let window = Duration::from_millis(20);
        assert_eq!(store.hit("rate:save:a", window).await.unwrap(), 1);
        assert_eq!(store.hit("rate:save:a", window).await.unwrap(), 2);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(store.hit("rate:save:a", window).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_memory_hit_drops_expired_keys() {
        let store = KeyValueStore::memory();
        let window = Duration::from_millis(250);
        for i in 0..MEMORY_SWEEP_THRESHOLD + 100 {
            store.hit(&format!("rate:api:10.0.{}.{}", i / 256, i % 256), window).await.unwrap();
        }

        let KeyValueStore::Memory(map) = &store else {
            panic!("expected memory store");
        };
        assert_eq!(map.lock().await.len(), MEMORY_SWEEP_THRESHOLD + 100);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(store.hit("rate:api:fresh", window).await.unwrap(), 1);
        assert_eq!(map.lock().await.len(), 1);
    }

    #[test]
    fn test_hit_pipeline_sets_expiry_with_first_increment() {
        let packed = hit_pipeline("rate:spin:10.0.0.1", Duration::from_secs(60)).get_packed_pipeline();
        let text = String::from_utf8_lossy(&packed);

        let multi = text.find("MULTI").unwrap();
        let set = text.find("SET").unwrap();
        let incr = text.find("INCR").unwrap();
        let exec = text.find("EXEC").unwrap();
        assert!(multi < set && set < incr && incr < exec);
        assert!(text.contains("NX"));
        assert!(text.contains("EX"));
        assert!(text.contains("60"));
    }

    #[test]
    fn test_redis_url_must_parse() {
        assert!(KeyValueStore::redis("not a url").is_err());
        let store = KeyValueStore::redis("redis://127.0.0.1:6379").unwrap();
        assert_eq!(store.backend_name(), "redis");
    }
}
