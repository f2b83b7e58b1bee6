//! API route definitions.

use axum::extract::Request;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state);

    // Tracing layer with request IDs and timing
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/start",
            post(handlers::start_test).fallback(handlers::method_not_allowed),
        )
        .route(
            "/submit",
            post(handlers::submit_test).fallback(handlers::method_not_allowed),
        )
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(options_no_content))
        .layer(trace_layer)
}

/// Build the CORS layer for the single configured origin.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let methods = [Method::POST, Method::GET, Method::OPTIONS];

    match state.cors.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => {
            tracing::info!("CORS: Allowing origin {}", state.cors.allowed_origin);
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(methods)
                .allow_headers([header::CONTENT_TYPE])
        }
        Err(_) => {
            tracing::error!(
                "CORS: Invalid origin in config: {}, denying all cross-origin requests",
                state.cors.allowed_origin
            );
            CorsLayer::new().allow_origin(AllowOrigin::exact(HeaderValue::from_static("null")))
        }
    }
}

/// Answer every `OPTIONS` request with an empty `204 No Content`.
///
/// The CORS layer short-circuits every `OPTIONS` request with an empty
/// `200 OK`; clients of this API expect 204.
async fn options_no_content(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_options && response.status().is_success() {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
