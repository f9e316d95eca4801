//! OCR handlers.
//!
//! The three routes share one pipeline and differ only in the
//! [`InputStrategy`] used to read the image out of the request:
//! read input, write it to a scratch file, recognise, extract fields,
//! respond. The scratch file is removed when the pipeline returns, on the
//! success path and on every error path.

use axum::extract::{Request, State};
use axum::Json;
use tracing::{debug, error, info};

use crate::api::extractors::{ImageInput, InputStrategy, JsonImageRequest};
use crate::api::response::{ApiError, ErrorBody, OcrResponse};
use crate::api::AppState;
use crate::error::Result;
use crate::extraction::extract_info_from_text;
use crate::scratch::ScratchFile;

/// `POST /ocr`
///
/// Accepts either a multipart upload or a base64 JSON body, chosen by the
/// request's `Content-Type`.
#[utoipa::path(
    post,
    path = "/ocr",
    tag = "ocr",
    request_body(content = JsonImageRequest, description = "Base64 JSON body, or multipart/form-data with an `image` file field"),
    responses(
        (status = 200, description = "Recognised text and extracted fields", body = OcrResponse),
        (status = 400, description = "Missing image or unsupported content type", body = ErrorBody),
        (status = 413, description = "Body exceeds the upload limit", body = ErrorBody),
        (status = 500, description = "OCR failed", body = ErrorBody),
    )
)]
pub async fn ocr(
    State(state): State<AppState>,
    request: Request,
) -> std::result::Result<Json<OcrResponse>, ApiError> {
    process(InputStrategy::Either, &state, request).await
}

/// `POST /ocr-multipart`
#[utoipa::path(
    post,
    path = "/ocr-multipart",
    tag = "ocr",
    request_body(content_type = "multipart/form-data", content = String, description = "Form with an `image` file field"),
    responses(
        (status = 200, description = "Recognised text and extracted fields", body = OcrResponse),
        (status = 400, description = "No image file uploaded", body = ErrorBody),
        (status = 413, description = "Body exceeds the upload limit", body = ErrorBody),
        (status = 500, description = "OCR failed", body = ErrorBody),
    )
)]
pub async fn ocr_multipart(
    State(state): State<AppState>,
    request: Request,
) -> std::result::Result<Json<OcrResponse>, ApiError> {
    process(InputStrategy::Multipart, &state, request).await
}

/// `POST /ocr-json`
#[utoipa::path(
    post,
    path = "/ocr-json",
    tag = "ocr",
    request_body = JsonImageRequest,
    responses(
        (status = 200, description = "Recognised text and extracted fields", body = OcrResponse),
        (status = 400, description = "No image data or invalid base64", body = ErrorBody),
        (status = 413, description = "Body exceeds the upload limit", body = ErrorBody),
        (status = 500, description = "OCR failed", body = ErrorBody),
    )
)]
pub async fn ocr_json(
    State(state): State<AppState>,
    request: Request,
) -> std::result::Result<Json<OcrResponse>, ApiError> {
    process(InputStrategy::Json, &state, request).await
}

async fn process(
    strategy: InputStrategy,
    state: &AppState,
    request: Request,
) -> std::result::Result<Json<OcrResponse>, ApiError> {
    let run_mode = state.config.run_mode;

    let input = ImageInput::read(strategy, request, state)
        .await
        .map_err(|e| {
            debug!(error = %e, "Rejected OCR request");
            ApiError::from_error(e, run_mode)
        })?;

    match recognize_card(state, input).await {
        Ok(response) => Ok(Json(response)),
        Err(e) if e.is_client_error() => Err(ApiError::from_error(e, run_mode)),
        Err(e) => {
            error!(error = %e, "OCR Error");
            Err(ApiError::from_error(e, run_mode))
        }
    }
}

async fn recognize_card(state: &AppState, input: ImageInput) -> Result<OcrResponse> {
    let scratch =
        ScratchFile::create(&state.config.scratch.dir, &input.file_name, &input.bytes).await?;
    info!(
        source = input.source,
        path = %scratch.path().display(),
        bytes = input.bytes.len(),
        "Processing image"
    );

    let full_text = state.ocr.recognize(scratch.path()).await?;
    debug!(text = %full_text, "OCR text");

    let info = extract_info_from_text(&full_text);
    if info.is_empty() {
        debug!("No contact fields recognised");
    }

    Ok(OcrResponse { full_text, info })
}
