pub mod response;
use std::sync::Arc;

use axum::{Router, extract::State, routing::any};
use common_errors::AppError;
use events_queries::GetEventFeedQuery;
use events_query_handlers::GetEventFeedQueryHandler;
use graph_client::{AccessToken, UpstreamSource};
use redis_connection::CacheStore;
use tracing::instrument;

pub use crate::response::{EventFeedResponse, JSON_CONTENT_TYPE};

#[derive(Clone)]
pub struct EventServices {
    pub get_event_feed: GetEventFeedQueryHandler,
    pub feed_query: GetEventFeedQuery,
}

impl EventServices {
    pub fn new(
        cache: Arc<dyn CacheStore>, upstream: Arc<dyn UpstreamSource>,
        credential: AccessToken, feed_query: GetEventFeedQuery,
    ) -> Self {
        Self {
            get_event_feed: GetEventFeedQueryHandler::new(
                cache, upstream, credential,
            ),
            feed_query,
        }
    }
}

pub struct EventHandlers;

impl EventHandlers {
    pub fn routes() -> Router<EventServices> {
        Router::new().route("/get", any(get_event_feed))
    }
}

#[utoipa::path(
    get,
    path = "/get",
    responses(
        (status = 200, description = "Current event feed", body = Vec<events_models::EventRecord>, content_type = "application/json; charset=utf-8"),
        (status = 500, description = "Cache or upstream failure", body = String, content_type = "text/plain; charset=utf-8")
    ),
    tag = "events"
)]
#[instrument(skip_all)]
pub async fn get_event_feed(
    State(services): State<EventServices>,
) -> Result<EventFeedResponse, AppError> {
    let body = services
        .get_event_feed
        .execute(services.feed_query.clone())
        .await?;
    Ok(EventFeedResponse(body))
}
