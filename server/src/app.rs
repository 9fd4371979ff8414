use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use common_errors::AppError;
use events_http::{EventHandlers, EventServices};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(health_check, events_http::get_event_feed),
    components(schemas(events_models::EventRecord)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "events", description = "Cached event feed")
    ),
    info(
        title = "Event Feed Gateway",
        description = "Cached read-through access to a Facebook group's events",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

pub fn build_router(services: EventServices) -> Router {
    let api_routes = EventHandlers::routes().with_state(services);

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes)
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Process is serving requests", body = String)
    ),
    tag = "health"
)]
async fn health_check() -> impl IntoResponse { (StatusCode::OK, "OK") }

async fn not_found() -> AppError {
    AppError::not_found("404 page not found")
}
