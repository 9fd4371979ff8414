use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
    routing::Router,
};
use events_http::{EventHandlers, EventServices};
use events_queries::GetEventFeedQuery;
use graph_client::AccessToken;
use test_utils::{
    DEMO_FEED_BODY, RecordingCacheStore, StubUpstream, demo_feed_response,
};
use tower::ServiceExt;

fn setup_test_app(cache: &RecordingCacheStore, upstream: &StubUpstream) -> Router {
    let services = EventServices::new(
        Arc::new(cache.clone()),
        Arc::new(upstream.clone()),
        AccessToken::new("test-token"),
        GetEventFeedQuery::default(),
    );

    EventHandlers::routes().with_state(services)
}

fn feed_request(method: Method) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/get")
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

fn assert_feed_headers(response: &axum::response::Response) {
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json; charset=utf-8"
    );
}

#[tokio::test]
async fn test_get_feed_cache_hit() {
    let cache = RecordingCacheStore::new();
    cache
        .seed("eventdata", &br#"[{"id":"42"}]"#[..], Duration::from_secs(60))
        .await;
    let upstream = StubUpstream::ok(demo_feed_response());
    let app = setup_test_app(&cache, &upstream);

    let response = app.oneshot(feed_request(Method::GET)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_feed_headers(&response);
    assert_eq!(body_bytes(response).await, br#"[{"id":"42"}]"#);
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn test_get_feed_cache_miss() {
    let cache = RecordingCacheStore::new();
    let upstream = StubUpstream::ok(demo_feed_response());
    let app = setup_test_app(&cache, &upstream);

    let response = app.oneshot(feed_request(Method::GET)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_feed_headers(&response);
    assert_eq!(body_bytes(response).await, DEMO_FEED_BODY);

    let entry = cache.entry("eventdata").await.unwrap();
    assert_eq!(entry.value.as_ref(), DEMO_FEED_BODY);
    assert_eq!(entry.ttl, Duration::from_secs(3600));
}

#[tokio::test]
async fn test_any_method_is_accepted() {
    let cache = RecordingCacheStore::new();
    let upstream = StubUpstream::ok(demo_feed_response());
    let app = setup_test_app(&cache, &upstream);

    for method in [Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS] {
        let response = app
            .clone()
            .oneshot(feed_request(method.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{method}");
        assert_feed_headers(&response);
    }
    assert_eq!(upstream.calls(), 1);
}

#[tokio::test]
async fn test_upstream_failure_returns_500() {
    let cache = RecordingCacheStore::new();
    let upstream = StubUpstream::failing("invalid token");
    let app = setup_test_app(&cache, &upstream);

    let response = app.oneshot(feed_request(Method::GET)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        body_bytes(response).await,
        b"error fetching event data from facebook: invalid token\n"
    );
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_cache_outage_returns_500_without_fetching() {
    let cache = RecordingCacheStore::failing_reads("broken pipe");
    let upstream = StubUpstream::ok(demo_feed_response());
    let app = setup_test_app(&cache, &upstream);

    let response = app.oneshot(feed_request(Method::GET)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.starts_with("error getting from cache: "));
    assert!(body.contains("broken pipe"));
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn test_malformed_upstream_returns_500() {
    let cache = RecordingCacheStore::new();
    let upstream = StubUpstream::ok(serde_json::json!({"id": "not-a-feed"}));
    let app = setup_test_app(&cache, &upstream);

    let response = app.oneshot(feed_request(Method::GET)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.starts_with("error marshalling json"));
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_cache_write_failure_still_returns_feed() {
    let cache = RecordingCacheStore::failing_writes("OOM command not allowed");
    let upstream = StubUpstream::ok(demo_feed_response());
    let app = setup_test_app(&cache, &upstream);

    let response = app.oneshot(feed_request(Method::GET)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_feed_headers(&response);
    assert_eq!(body_bytes(response).await, DEMO_FEED_BODY);
}

#[tokio::test]
async fn test_unknown_path_is_not_routed() {
    let cache = RecordingCacheStore::new();
    let upstream = StubUpstream::ok(demo_feed_response());
    let app = setup_test_app(&cache, &upstream);

    let request = Request::builder()
        .uri("/events")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(cache.get_count().await, 0);
}
