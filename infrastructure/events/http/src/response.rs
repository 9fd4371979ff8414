use axum::{
    body::Body,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use events_models::EventFeedBody;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Successful feed response. The body is written as-is, whether it came
/// from the cache or a fresh fetch.
pub struct EventFeedResponse(pub EventFeedBody);

impl IntoResponse for EventFeedResponse {
    fn into_response(self) -> Response {
        (
            [
                (
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ),
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(JSON_CONTENT_TYPE),
                ),
            ],
            Body::from(self.0.into_bytes()),
        )
            .into_response()
    }
}
