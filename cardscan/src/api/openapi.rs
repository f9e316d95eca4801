use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::extractors;
use super::handlers;
use super::response;
use crate::extraction;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cardscan API",
        version = "1.0.0",
        description = "Business card OCR. Upload an image, get the recognised text and contact fields.",
    ),
    paths(
        handlers::health::health_check,
        handlers::ocr::ocr,
        handlers::ocr::ocr_multipart,
        handlers::ocr::ocr_json,
        handlers::upload::upload_ocr,
    ),
    components(schemas(
        extractors::JsonImageRequest,
        extraction::ExtractedInfo,
        extraction::StructuredCard,
        extraction::StructureSource,
        response::OcrResponse,
        response::UploadOcrResponse,
        response::HealthResponse,
        response::ErrorBody,
        response::StatusErrorBody,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "ocr", description = "Image text recognition, field extraction and LLM structuring"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
