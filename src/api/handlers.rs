//! Axum request handlers for the HTTP API.
use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::api::routes::AppState;
use crate::catalog::DEFAULT_KEY;
use crate::error::{AppError, AppResult};
use crate::tryon::{GenerationRequest, GenerationResult};
use crate::utils::encoding::{image_mime, preview};

pub const SERVICE_NAME: &str = "Fashion AI Try-On API";

pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Multipart: `garment_image` (file) plus optional `model_type`, `pose`,
/// `background` and `style`. Empty or missing strings take their defaults;
/// anything else is kept verbatim.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<GenerationResult>> {
    let mut garment: Option<(Vec<u8>, Option<String>)> = None;
    let mut request = GenerationRequest::new(Vec::new());

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Multipart error", e))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("garment_image") => {
                let content_type = field.content_type().map(|c| c.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Read error", e))?;
                garment = Some((bytes.to_vec(), content_type));
            }
            Some(key @ ("model_type" | "pose" | "background" | "style")) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Read error", e))?;
                if value.is_empty() {
                    continue;
                }
                let slot = match key {
                    "model_type" => &mut request.model_type,
                    "pose" => &mut request.pose,
                    "background" => &mut request.background,
                    _ => &mut request.style,
                };
                *slot = value;
            }
            _ => {}
        }
    }

    let (bytes, content_type) =
        garment.ok_or_else(|| AppError::Input("Missing garment_image in multipart form".to_string()))?;
    request.garment = bytes;
    request.garment_content_type = content_type;

    let result = state.service.generate(request).await?;
    Ok(Json(result))
}

/// Multipart `file`: echoes its size and a truncated base64 preview.
pub async fn upload_garment(mut multipart: Multipart) -> AppResult<Json<Value>> {
    let mut upload: Option<(Vec<u8>, Option<String>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Upload failed", e))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().map(|c| c.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Upload failed", e))?;
        upload = Some((bytes.to_vec(), content_type));
    }

    let (bytes, content_type) =
        upload.ok_or_else(|| AppError::Input("Missing file in multipart form".to_string()))?;
    let mime = image_mime(content_type.as_deref());
    tracing::info!("Received garment upload of {} bytes", bytes.len());

    Ok(Json(json!({
        "success": true,
        "message": "Garment image uploaded successfully",
        "preview": preview(&mime, &bytes),
        "size": bytes.len(),
    })))
}

/// Body-limit failures keep their 413; everything else is a bad upload.
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    let detail = format!("{}: {}", context, e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(detail)
    } else {
        AppError::Input(detail)
    }
}

pub async fn catalog(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "default_key": DEFAULT_KEY,
        "entries": state.service.catalog().entries(),
    }))
}
