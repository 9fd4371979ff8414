use std::time::Duration;

use deadpool_redis::{
    Pool,
    redis::{Cmd, FromRedisValue, cmd},
};
use redis_connection::{config::RedisDbConfig, connect_redis_db};
use tokio::time::sleep;

const DEFAULT_TEST_REDIS_URL: &str = "redis://localhost:6380";
const READY_ATTEMPTS: u64 = 10;

/// Pool onto an externally started Redis, used by the `#[ignore]`d backend
/// tests.
pub struct TestRedisContainer {
    pub pool: Pool,
}

impl TestRedisContainer {
    /// Connects to `TEST_REDIS_URL` and waits until the server answers `PING`.
    pub async fn new() -> anyhow::Result<Self> {
        let addr = std::env::var("TEST_REDIS_URL")
            .unwrap_or_else(|_| DEFAULT_TEST_REDIS_URL.to_string());
        let pool = connect_redis_db(&RedisDbConfig::from_addr(&addr, 0)?).await?;
        let container = Self { pool };

        for attempt in 1..=READY_ATTEMPTS {
            match container.query::<String>(&cmd("PING")).await {
                Ok(_) => return Ok(container),
                Err(e) if attempt == READY_ATTEMPTS => return Err(e),
                Err(_) => sleep(Duration::from_millis(200 * attempt)).await,
            }
        }
        anyhow::bail!("redis at {addr} never became ready")
    }

    pub async fn flush_db(&self) -> anyhow::Result<()> {
        self.query::<()>(&cmd("FLUSHDB")).await
    }

    /// Remaining lifetime of `key` in seconds, as reported by `TTL`.
    pub async fn ttl(&self, key: &str) -> anyhow::Result<i64> {
        self.query(cmd("TTL").arg(key)).await
    }

    async fn query<T: FromRedisValue>(&self, command: &Cmd) -> anyhow::Result<T> {
        let mut conn = self.pool.get().await?;
        Ok(command.query_async(&mut conn).await?)
    }
}
