//! Upload validation and crop endpoints.

use axum::Json;
use axum::extract::Multipart;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use image_processor::{CropParams, EncodedImage};

use super::form::FormData;
use super::{ApiError, PROCESS_CONTEXT, UPLOAD_CONTEXT};

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Image uploaded successfully";

/// Text fields read by `POST /crop`.
const CROP_FIELDS: &[&str] = &["x", "y", "width", "height", "rotate", "zoom"];

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub message: String,
}

/// POST /upload – Check that the uploaded file decodes as an image
pub async fn upload_image(mut multipart: Multipart) -> Result<Json<UploadResponse>, ApiError> {
    let err = |e: String| ApiError::client(UPLOAD_CONTEXT, e);

    let mut form = FormData::collect(&mut multipart, &[]).await.map_err(err)?;
    let file = form.take_file().map_err(err)?;

    let data = file.data;
    let (w, h) = tokio::task::spawn_blocking(move || {
        image_processor::decode(&data).map(|img| (img.width(), img.height()))
    })
    .await
    .map_err(|e| err(e.to_string()))?
    .map_err(|e| err(e.to_string()))?;

    tracing::info!(filename = %file.filename, w, h, "Image upload validated");

    Ok(Json(UploadResponse {
        filename: file.filename,
        message: UPLOAD_SUCCESS_MESSAGE.to_string(),
    }))
}

/// POST /crop – Rotate, zoom and crop the uploaded image
pub async fn crop_image(mut multipart: Multipart) -> Result<Response, ApiError> {
    let err = |e: String| ApiError::client(PROCESS_CONTEXT, e);

    let mut form = FormData::collect(&mut multipart, CROP_FIELDS)
        .await
        .map_err(err)?;
    let params = parse_crop_params(&form).map_err(err)?;
    let file = form.take_file().map_err(err)?;

    let filename = file.filename;
    let data = file.data;
    let name = filename.clone();
    let encoded: EncodedImage = tokio::task::spawn_blocking(move || {
        image_processor::process(&data, &name, &params)
    })
    .await
    .map_err(|e| err(e.to_string()))?
    .map_err(|e| err(e.to_string()))?;

    tracing::info!(
        filename = %filename,
        ?params,
        content_type = encoded.mime_type(),
        len = encoded.bytes.len(),
        "Image cropped"
    );

    Ok(([(header::CONTENT_TYPE, encoded.mime_type())], encoded.bytes).into_response())
}

fn parse_crop_params(form: &FormData) -> Result<CropParams, String> {
    Ok(CropParams {
        x: form.required("x", "an integer")?,
        y: form.required("y", "an integer")?,
        width: form.required("width", "an integer")?,
        height: form.required("height", "an integer")?,
        rotate: form.optional("rotate", "an integer", 0)?,
        zoom: form.optional("zoom", "a number", 1.0)?,
    })
}
