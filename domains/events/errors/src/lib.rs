use common_errors::AppError;
use graph_client::UpstreamError;
use redis_connection::CacheError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventFeedError {
    #[error("error getting from cache: {0}")]
    CacheRead(#[from] CacheError),
    #[error("error fetching event data from facebook: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("error marshalling json: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("error marshalling json: upstream response has no data array")]
    MissingData,
}

impl From<EventFeedError> for AppError {
    fn from(err: EventFeedError) -> Self {
        AppError::internal_server_error(&err.to_string())
    }
}
