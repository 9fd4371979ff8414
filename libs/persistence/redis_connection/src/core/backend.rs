use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use deadpool_redis::redis::AsyncCommands;
use moka::{Expiry, future::Cache};
use tracing::instrument;

use super::store::{CacheResult, CacheStore};
use crate::config::MemoryConfig;

/// Value stored by the in-memory backend together with the TTL it was
/// written with.
#[derive(Clone, Debug)]
pub struct MemoryEntry {
    value: Bytes,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<String, MemoryEntry> for PerEntryTtl {
    fn expire_after_create(
        &self, _key: &String, entry: &MemoryEntry, _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self, _key: &String, entry: &MemoryEntry, _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

impl From<deadpool_redis::Pool> for CacheBackend {
    fn from(pool: deadpool_redis::Pool) -> Self { CacheBackend::Redis(pool) }
}

/// Represents different cache backend types
pub enum CacheBackend {
    /// Redis backend using a deadpool connection pool
    Redis(deadpool_redis::Pool),

    /// In-memory cache backend
    Memory {
        cache: Cache<String, MemoryEntry>,
        config: MemoryConfig,
    },
}

impl CacheBackend {
    pub fn redis(pool: deadpool_redis::Pool) -> Self { Self::Redis(pool) }

    pub fn memory(config: MemoryConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self::Memory { cache, config }
    }

    /// Check if this is a Redis backend
    pub fn is_redis(&self) -> bool { matches!(self, CacheBackend::Redis(_)) }

    pub fn name(&self) -> &'static str {
        match self {
            CacheBackend::Redis(_) => "redis",
            CacheBackend::Memory { .. } => "memory",
        }
    }
}

#[async_trait]
impl CacheStore for CacheBackend {
    #[instrument(skip(self), fields(backend = self.name()))]
    async fn get(&self, key: &str) -> CacheResult<Option<Bytes>> {
        match self {
            CacheBackend::Redis(pool) => {
                let mut conn = pool.get().await?;
                let value: Option<Vec<u8>> = conn.get(key).await?;
                Ok(value.map(Bytes::from))
            }
            CacheBackend::Memory { cache, .. } => {
                Ok(cache.get(key).await.map(|entry| entry.value))
            }
        }
    }

    #[instrument(skip(self, value), fields(backend = self.name(), len = value.len()))]
    async fn set(
        &self, key: &str, value: Bytes, ttl: Duration,
    ) -> CacheResult<()> {
        match self {
            CacheBackend::Redis(pool) => {
                let mut conn = pool.get().await?;
                // SETEX rejects a zero expiry
                let seconds = ttl.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value.as_ref(), seconds)
                    .await?;
                Ok(())
            }
            CacheBackend::Memory { cache, config } => {
                let ttl = config.clamp_ttl(ttl);
                cache
                    .insert(key.to_string(), MemoryEntry { value, ttl })
                    .await;
                Ok(())
            }
        }
    }
}
