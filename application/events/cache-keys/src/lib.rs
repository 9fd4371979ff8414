use std::time::Duration;

use redis_connection::cache_key;

cache_key!(EventFeedCacheKey => "eventdata");

/// How long a fetched event feed is served from cache.
pub const EVENT_FEED_TTL: Duration = Duration::from_secs(60 * 60);
