use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::openapi;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(state.config.server.max_upload_bytes);

    Router::new()
        .route("/", get(handlers::health_check))
        .route("/ocr", post(handlers::ocr::ocr))
        .route("/ocr-multipart", post(handlers::ocr::ocr_multipart))
        .route("/ocr-json", post(handlers::ocr::ocr_json))
        .route("/upload-ocr", post(handlers::upload::upload_ocr))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(body_limit),
        )
        .with_state(state)
}
