use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::Deserialize;

use crate::error::{CardscanError, Result};
use crate::scratch::DEFAULT_FILE_NAME;

pub const NO_IMAGE_FILE: &str = "No image file uploaded";
pub const NO_IMAGE_DATA: &str = "No image data in JSON body";
pub const INVALID_BASE64: &str = "Invalid base64 image data";
pub const UNSUPPORTED_CONTENT_TYPE: &str =
    "Unsupported content type. Use multipart/form-data or application/json";

const IMAGE_FIELD: &str = "image";
const UPLOAD_FIELD: &str = "file";

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Which request body shapes an endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStrategy {
    /// `multipart/form-data` with an `image` file field.
    Multipart,
    /// `application/json` with a base64 `image` and optional `fileName`.
    Json,
    /// Either of the above, chosen by the `Content-Type` header.
    Either,
    /// `multipart/form-data` with a `file` file field.
    FileUpload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Multipart { field: &'static str },
    Json,
}

impl BodyKind {
    fn as_str(&self) -> &'static str {
        match self {
            BodyKind::Multipart { .. } => "multipart",
            BodyKind::Json => "json",
        }
    }
}

impl InputStrategy {
    fn resolve(self, headers: &HeaderMap) -> Result<BodyKind> {
        match self {
            InputStrategy::Multipart => Ok(BodyKind::Multipart { field: IMAGE_FIELD }),
            InputStrategy::FileUpload => Ok(BodyKind::Multipart {
                field: UPLOAD_FIELD,
            }),
            InputStrategy::Json => Ok(BodyKind::Json),
            InputStrategy::Either => {
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_ascii_lowercase();

                if content_type.contains("multipart/form-data") {
                    Ok(BodyKind::Multipart { field: IMAGE_FIELD })
                } else if content_type.contains("application/json") {
                    Ok(BodyKind::Json)
                } else {
                    Err(CardscanError::Validation(
                        UNSUPPORTED_CONTENT_TYPE.to_string(),
                    ))
                }
            }
        }
    }
}

/// JSON upload body: `{ "image": "<base64>", "fileName": "card.jpg" }`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JsonImageRequest {
    /// Base64 image bytes; a `data:<mime>;base64,` prefix is accepted.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Image bytes read from a request, not yet validated in any way.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub source: &'static str,
}

impl ImageInput {
    pub async fn read<S>(strategy: InputStrategy, request: Request, state: &S) -> Result<Self>
    where
        S: Send + Sync,
    {
        let kind = strategy.resolve(request.headers())?;
        let (bytes, file_name) = match kind {
            BodyKind::Multipart { field } => read_multipart(request, state, field).await?,
            BodyKind::Json => read_json(request, state).await?,
        };

        Ok(Self {
            bytes,
            file_name: file_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            source: kind.as_str(),
        })
    }
}

async fn read_multipart<S>(
    request: Request,
    state: &S,
    field_name: &str,
) -> Result<(Vec<u8>, Option<String>)>
where
    S: Send + Sync,
{
    // A body that is not multipart at all is treated like one without the field.
    let mut multipart = Multipart::from_request(request, state)
        .await
        .map_err(|_| CardscanError::Validation(NO_IMAGE_FILE.to_string()))?;

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        // Only file parts count; a plain text field with the same name is skipped.
        if field.name() != Some(field_name) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field.bytes().await.map_err(map_multipart_error)?;
        return Ok((bytes.to_vec(), Some(file_name)));
    }

    Err(CardscanError::Validation(NO_IMAGE_FILE.to_string()))
}

async fn read_json<S>(request: Request, state: &S) -> Result<(Vec<u8>, Option<String>)>
where
    S: Send + Sync,
{
    let Json(payload) = Json::<JsonImageRequest>::from_request(request, state)
        .await
        .map_err(map_json_rejection)?;

    let image = payload
        .image
        .filter(|image| !image.trim().is_empty())
        .ok_or_else(|| CardscanError::Validation(NO_IMAGE_DATA.to_string()))?;

    let bytes = decode_base64_image(&image)
        .ok_or_else(|| CardscanError::Validation(INVALID_BASE64.to_string()))?;

    Ok((bytes, payload.file_name))
}

fn map_multipart_error(err: MultipartError) -> CardscanError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        CardscanError::PayloadTooLarge(err.body_text())
    } else {
        CardscanError::Validation(format!("Failed to read upload: {}", err.body_text()))
    }
}

fn map_json_rejection(rejection: JsonRejection) -> CardscanError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return CardscanError::PayloadTooLarge(rejection.body_text());
    }

    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            CardscanError::Validation(NO_IMAGE_DATA.to_string())
        }
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if message.contains("expected struct") {
                CardscanError::Validation(NO_IMAGE_DATA.to_string())
            } else {
                CardscanError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            CardscanError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        other => CardscanError::Validation(other.body_text()),
    }
}

/// Decode base64 the way browsers and most clients produce it: optional
/// data-URL prefix, line breaks, missing padding, standard or URL-safe alphabet.
fn decode_base64_image(raw: &str) -> Option<Vec<u8>> {
    let trimmed = raw.trim();
    let data = match trimmed.strip_prefix("data:") {
        Some(rest) => rest.split_once(";base64,")?.1,
        None => trimmed,
    };

    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    STANDARD_LENIENT
        .decode(&compact)
        .or_else(|_| URL_SAFE_LENIENT.decode(&compact))
        .ok()
}
