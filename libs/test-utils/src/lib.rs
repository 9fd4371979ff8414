pub mod cache;
pub mod redis;
pub mod upstream;

use std::sync::Once;

pub use cache::{RecordingCacheStore, StoredEntry};
pub use redis::TestRedisContainer;
use serde_json::{Value, json};
pub use upstream::{RecordedQuery, StubUpstream};

static TRACING: Once = Once::new();

/// Installs a test-friendly subscriber once per process; honours `RUST_LOG`.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Upstream response with the single demo event used across tests.
pub fn demo_feed_response() -> Value {
    json!({"data": [{"id": "1", "name": "Demo"}]})
}

/// Serialized form of [`demo_feed_response`]'s `data` array.
pub const DEMO_FEED_BODY: &[u8] = br#"[{"id":"1","name":"Demo"}]"#;

/// A realistic two-event upstream page, paging cursors included.
pub fn sample_feed_response() -> Value {
    json!({
        "data": [
            {
                "name": "Info Session",
                "description": "Learn about the major",
                "start_time": "2019-05-02T18:00:00-0700",
                "end_time": "2019-05-02T19:30:00-0700",
                "id": "2281409415458393",
                "cover": {"offset_x": 0, "offset_y": 50, "source": "https://example.com/cover.jpg", "id": "7"},
                "place": {"name": "Mary Gates Hall", "id": "8"},
                "is_canceled": false
            },
            {
                "name": "Capstone Showcase",
                "start_time": "2019-06-05T12:00:00-0700",
                "id": "395839974599102",
                "is_canceled": true
            }
        ],
        "paging": {"cursors": {"before": "QVFI", "after": "QVFJ"}}
    })
}
