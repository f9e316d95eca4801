//! Wire types shared by the HTTP handlers.
//!
//! Success bodies are plain JSON objects (no envelope). Errors are
//! `{ "error": "..." }` for client mistakes and
//! `{ "error": "OCR failed", "details": "...", "stack": "..." }` for
//! everything that went wrong on the server side; `stack` only appears in
//! development mode.
//!
//! `/upload-ocr` uses its own envelope: `{ "status": "success", ... }` on
//! success and `{ "status": "error", "message": "..." }` on failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::RunMode;
use crate::error::CardscanError;
use crate::extraction::{ExtractedInfo, StructureSource, StructuredCard};

pub const OCR_FAILED: &str = "OCR failed";
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Recognised text plus the fields extracted from it, flattened into one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OcrResponse {
    pub full_text: String,
    #[serde(flatten)]
    pub info: ExtractedInfo,
}

/// Body of a successful `/upload-ocr` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadOcrResponse {
    pub status: String,
    pub file_name: String,
    pub ocr_text: String,
    pub structured: StructuredCard,
    pub structured_by: StructureSource,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusErrorBody {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    PayloadTooLarge(String),
    OcrFailed {
        details: String,
        stack: Option<String>,
    },
}

impl ApiError {
    /// Map a library error to its HTTP form. Server-side failures all collapse
    /// into the same `OCR failed` response.
    pub fn from_error(err: CardscanError, run_mode: RunMode) -> Self {
        match err {
            CardscanError::Validation(msg) => ApiError::BadRequest(msg),
            CardscanError::PayloadTooLarge(msg) => ApiError::PayloadTooLarge(msg),
            other => ApiError::OcrFailed {
                details: other.to_string(),
                stack: run_mode.exposes_stack().then(|| format!("{other:?}")),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::OcrFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(msg) | ApiError::PayloadTooLarge(msg) => ErrorBody {
                error: msg,
                details: None,
                stack: None,
            },
            ApiError::OcrFailed { details, stack } => ErrorBody {
                error: OCR_FAILED.to_string(),
                details: Some(details),
                stack,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// [`ApiError`] rendered in the `/upload-ocr` envelope.
#[derive(Debug)]
pub struct UploadError(pub ApiError);

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let message = match self.0 {
            ApiError::BadRequest(msg) | ApiError::PayloadTooLarge(msg) => msg,
            ApiError::OcrFailed { details, .. } => details,
        };

        (
            status,
            Json(StatusErrorBody {
                status: STATUS_ERROR.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn ocr_response_flattens_fields() {
        let resp = OcrResponse {
            full_text: "Jane Doe\n".to_string(),
            info: ExtractedInfo {
                name: Some("Jane Doe".to_string()),
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&resp).expect("serialize");

        assert_eq!(json["full_text"], "Jane Doe\n");
        assert_eq!(json["name"], "Jane Doe");
        assert!(json["email"].is_null());
        assert!(json.get("info").is_none());
        assert_eq!(json.as_object().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn validation_maps_to_bad_request_with_error_only() {
        let err = ApiError::from_error(
            CardscanError::Validation("No image file uploaded".to_string()),
            RunMode::Development,
        );
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({ "error": "No image file uploaded" }));
    }

    #[test]
    fn payload_too_large_maps_to_413() {
        let err = ApiError::from_error(
            CardscanError::PayloadTooLarge("too big".to_string()),
            RunMode::Production,
        );
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn server_errors_collapse_to_ocr_failed() {
        for err in [
            CardscanError::Ocr("engine exploded".to_string()),
            CardscanError::OcrUnavailable("no tesseract".to_string()),
            CardscanError::Io(std::io::Error::other("disk full")),
            CardscanError::Llm("bad gateway".to_string()),
        ] {
            let response = ApiError::from_error(err, RunMode::Production).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let json = body_json(response).await;
            assert_eq!(json["error"], OCR_FAILED);
            assert!(json["details"].is_string());
            assert!(json.get("stack").is_none());
        }
    }

    #[test]
    fn upload_response_uses_camel_case() {
        let resp = UploadOcrResponse {
            status: STATUS_SUCCESS.to_string(),
            file_name: "card.jpg".to_string(),
            ocr_text: "Jane Doe\n".to_string(),
            structured: StructuredCard::default(),
            structured_by: StructureSource::Regex,
        };
        let json = serde_json::to_value(&resp).expect("serialize");

        assert_eq!(json["status"], "success");
        assert_eq!(json["fileName"], "card.jpg");
        assert_eq!(json["ocrText"], "Jane Doe\n");
        assert_eq!(json["structuredBy"], "regex");
        assert_eq!(json["structured"]["description"], "");
        assert!(json["structured"]["name"].is_null());
    }

    #[tokio::test]
    async fn upload_error_uses_status_envelope() {
        let response = UploadError(ApiError::from_error(
            CardscanError::Validation("No image file uploaded".to_string()),
            RunMode::Development,
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "status": "error", "message": "No image file uploaded" })
        );

        let response = UploadError(ApiError::from_error(
            CardscanError::Ocr("Failed to set image".to_string()),
            RunMode::Development,
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], "OCR error: Failed to set image");
        assert!(json.get("stack").is_none());
    }

    #[tokio::test]
    async fn stack_only_in_development() {
        let response = ApiError::from_error(
            CardscanError::Ocr("Failed to set image".to_string()),
            RunMode::Development,
        )
        .into_response();
        let json = body_json(response).await;

        assert_eq!(json["details"], "OCR error: Failed to set image");
        assert!(json["stack"].as_str().unwrap().contains("Ocr"));
    }
}
