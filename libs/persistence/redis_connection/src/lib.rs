use deadpool_redis::{Config, CreatePoolError, Pool, Runtime};
pub use deadpool_redis::{PoolError, redis::RedisError};
use tracing::{info, instrument};
use url::Url;
pub mod config;
pub mod core;
pub mod macros;

pub use crate::core::{
    BoundKey, CacheBackend, CacheError, CacheKey, CacheKeyBind, CacheResult,
    CacheStore,
};

#[derive(Debug, thiserror::Error)]
pub enum RedisConnectError {
    #[error("Invalid redis address: {0:?}")]
    InvalidAddress(String),
    #[error("Invalid redis url: {0}")]
    Url(#[from] url::ParseError),
    #[error("Failed to create redis pool: {0}")]
    CreatePool(#[from] CreatePoolError),
}

pub fn redis_url<C>(config: &C) -> Result<Url, RedisConnectError>
where
    C: config::DbConnectConfig,
{
    let mut url = Url::parse("redis://")?;

    url.set_host(Some(config.host()))?;
    url.set_port(Some(config.port())).map_err(|_| {
        RedisConnectError::InvalidAddress(config.host().to_string())
    })?;
    url.path_segments_mut()
        .map_err(|_| {
            RedisConnectError::InvalidAddress(config.host().to_string())
        })?
        .extend(&[config.db().to_string()]);

    Ok(url)
}

/// Creates the pool lazily; no connection is opened until the first checkout.
#[instrument(skip_all, name = "connect-redis")]
pub async fn connect_redis_db<C>(config: &C) -> Result<Pool, RedisConnectError>
where
    C: config::DbConnectConfig,
{
    let url = redis_url(config)?;

    info!(redis.url = %url, redis.connect = true);

    let cfg = Config {
        url: Some(url.to_string()),
        pool: Some(deadpool_redis::PoolConfig::default()),
        connection: None,
    };

    let pool = cfg.create_pool(Some(Runtime::Tokio1))?;
    Ok(pool)
}
