//! Runs against a live Redis; start one and set `TEST_REDIS_URL`, then run
//! with `cargo test -- --ignored`.
use std::time::Duration;

use bytes::Bytes;
use redis_connection::{
    CacheBackend, CacheKeyBind, CacheStore, cache_key,
    config::{DbConnectConfig, RedisDbConfig},
};
use test_utils::redis::TestRedisContainer;

cache_key!(FeedSlotKey => "redis-connection:test:feed");

async fn setup_test_redis() -> anyhow::Result<(TestRedisContainer, CacheBackend)>
{
    let container = TestRedisContainer::new().await?;
    container.flush_db().await?;
    let backend = CacheBackend::redis(container.pool.clone());
    Ok((container, backend))
}

#[tokio::test]
async fn test_redis_db_config_from_json() {
    let json = r#"{
        "host": "redis.example.com",
        "port": 6380,
        "db": 1
    }"#;

    let config: RedisDbConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.host(), "redis.example.com");
    assert_eq!(config.port(), 6380);
    assert_eq!(config.db(), 1);
}

#[tokio::test]
#[ignore = "requires a running redis"]
async fn test_redis_miss_is_none() {
    let (_container, backend) = setup_test_redis().await.unwrap();

    assert!(backend.is_redis());
    assert_eq!(backend.get("redis-connection:test:absent").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires a running redis"]
async fn test_redis_set_with_expire() {
    let (container, backend) = setup_test_redis().await.unwrap();
    let bound = FeedSlotKey.bind(&backend);
    let value = Bytes::from_static(br#"[{"id":"1"}]"#);

    bound
        .set_with_expire(value.clone(), Duration::from_secs(3600))
        .await
        .unwrap();

    assert_eq!(bound.try_get().await.unwrap(), Some(value));
    let ttl = container.ttl(bound.key()).await.unwrap();
    assert!(ttl > 3590 && ttl <= 3600, "ttl was {ttl}");
}

#[tokio::test]
async fn test_unreachable_redis_is_an_error_not_a_miss() {
    let config = RedisDbConfig::from_addr("127.0.0.1:1", 0).unwrap();
    let pool = redis_connection::connect_redis_db(&config).await.unwrap();
    let backend = CacheBackend::redis(pool);

    assert!(backend.get("anything").await.is_err());
}
