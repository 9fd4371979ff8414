use std::sync::Arc;

use events_cache_keys::{EVENT_FEED_TTL, EventFeedCacheKey};
use events_errors::EventFeedError;
use events_models::{EventFeedBody, extract_feed_data};
use events_queries::GetEventFeedQuery;
use graph_client::{AccessToken, UpstreamSource};
use redis_connection::{CacheKeyBind, CacheStore};
use tracing::instrument;

/// Read-through access to the event feed: cache first, upstream on a miss.
///
/// Concurrent misses are not coalesced; each one fetches and overwrites the
/// same key with equivalent bytes.
#[derive(Clone)]
pub struct GetEventFeedQueryHandler {
    cache: Arc<dyn CacheStore>,
    upstream: Arc<dyn UpstreamSource>,
    credential: AccessToken,
}

impl GetEventFeedQueryHandler {
    pub fn new(
        cache: Arc<dyn CacheStore>, upstream: Arc<dyn UpstreamSource>,
        credential: AccessToken,
    ) -> Self {
        Self {
            cache,
            upstream,
            credential,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: GetEventFeedQuery,
    ) -> Result<EventFeedBody, EventFeedError> {
        let cache = EventFeedCacheKey.bind(self.cache.as_ref());

        if let Some(bytes) = cache.try_get().await? {
            tracing::debug!("Cache hit for {}", cache.key());
            return Ok(EventFeedBody::from_cached(bytes));
        }

        tracing::info!(
            "Cache miss for {}, querying the graph api",
            cache.key()
        );

        let response = self
            .upstream
            .query(&query.resource_path(), query.fields(), &self.credential)
            .await?;

        let data =
            extract_feed_data(response).ok_or(EventFeedError::MissingData)?;
        let body = EventFeedBody::serialize(&data)?;

        // The fetched feed is still served when the write fails
        if let Err(e) = cache
            .set_with_expire(body.as_bytes().clone(), EVENT_FEED_TTL)
            .await
        {
            tracing::warn!(
                error = %e,
                "Failed to cache {}, serving uncached",
                cache.key()
            );
        }

        Ok(body)
    }
}
