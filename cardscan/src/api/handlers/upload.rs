//! `POST /upload-ocr`: OCR followed by LLM structuring.

use axum::extract::{Request, State};
use axum::Json;
use tracing::{debug, error, info};

use crate::api::extractors::{ImageInput, InputStrategy};
use crate::api::response::{
    ApiError, StatusErrorBody, UploadError, UploadOcrResponse, STATUS_SUCCESS,
};
use crate::api::AppState;
use crate::error::Result;
use crate::scratch::ScratchFile;

/// `POST /upload-ocr`
///
/// Multipart upload with a `file` field. The recognised text is structured
/// by the LLM when one is configured, and by the regex extractor otherwise.
#[utoipa::path(
    post,
    path = "/upload-ocr",
    tag = "ocr",
    request_body(content_type = "multipart/form-data", content = String, description = "Form with a `file` file field"),
    responses(
        (status = 200, description = "Recognised text and structured card", body = UploadOcrResponse),
        (status = 400, description = "No image file uploaded", body = StatusErrorBody),
        (status = 413, description = "Body exceeds the upload limit", body = StatusErrorBody),
        (status = 500, description = "OCR failed", body = StatusErrorBody),
    )
)]
pub async fn upload_ocr(
    State(state): State<AppState>,
    request: Request,
) -> std::result::Result<Json<UploadOcrResponse>, UploadError> {
    let run_mode = state.config.run_mode;

    let input = ImageInput::read(InputStrategy::FileUpload, request, &state)
        .await
        .map_err(|e| {
            debug!(error = %e, "Rejected upload");
            UploadError(ApiError::from_error(e, run_mode))
        })?;

    match structure_upload(&state, input).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            if !e.is_client_error() {
                error!(error = %e, "Upload OCR Error");
            }
            Err(UploadError(ApiError::from_error(e, run_mode)))
        }
    }
}

async fn structure_upload(state: &AppState, input: ImageInput) -> Result<UploadOcrResponse> {
    let scratch =
        ScratchFile::create(&state.config.scratch.dir, &input.file_name, &input.bytes).await?;
    info!(
        path = %scratch.path().display(),
        bytes = input.bytes.len(),
        "Processing upload"
    );

    let ocr_text = state.structured_ocr.recognize(scratch.path()).await?;
    drop(scratch);

    let outcome = state.structurer.structure(&ocr_text).await;
    info!(source = ?outcome.source, "Card structured");

    Ok(UploadOcrResponse {
        status: STATUS_SUCCESS.to_string(),
        file_name: input.file_name,
        ocr_text,
        structured: outcome.card,
        structured_by: outcome.source,
    })
}
