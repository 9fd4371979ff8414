use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;
use deadpool_redis::{PoolError, redis::RedisError};

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("redis: {0}")]
    Redis(#[from] RedisError),
    #[error("redis pool: {0}")]
    Pool(#[from] PoolError),
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Byte-oriented key/value store with per-entry expiry.
///
/// A missing key is `Ok(None)`, never an error, so callers can tell a miss
/// apart from an unreachable store.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<Bytes>>;

    /// Overwrites `key` with `value`; the entry disappears once `ttl` elapses.
    async fn set(&self, key: &str, value: Bytes, ttl: Duration)
    -> CacheResult<()>;
}

#[async_trait]
impl<T> CacheStore for Arc<T>
where
    T: CacheStore + ?Sized,
{
    async fn get(&self, key: &str) -> CacheResult<Option<Bytes>> {
        (**self).get(key).await
    }

    async fn set(
        &self, key: &str, value: Bytes, ttl: Duration,
    ) -> CacheResult<()> {
        (**self).set(key, value, ttl).await
    }
}
