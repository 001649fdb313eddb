//! HTTP routes and handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::error::ApiError;
use crate::store::JsonStore;
use crate::upload::CloudinaryUploader;

#[derive(Clone)]
pub struct AppState {
    store: Arc<JsonStore>,
    uploader: Arc<CloudinaryUploader>,
}

#[derive(Serialize)]
struct StoreResponse {
    message: String,
    id: String,
}

#[derive(Serialize)]
struct UploadResponse {
    message: String,
    url: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

/// Build the application router.
pub fn create_router(store: JsonStore, uploader: CloudinaryUploader) -> Router {
    let state = AppState {
        store: Arc::new(store),
        uploader: Arc::new(uploader),
    };

    // Permissive CORS, same posture as the original deployment
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/store-json", post(store_json))
        .route("/api/upload-image", post(upload_image))
        .route("/api/extract-report", post(extract_report))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Persist an arbitrary JSON body and answer with the generated id.
async fn store_json(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<StoreResponse>, ApiError> {
    let value = match body {
        Ok(Json(value)) if !value.is_null() => value,
        _ => return Err(ApiError::MissingData),
    };

    let id = state.store.insert(value).await?;
    log::info!("Stored JSON document with id {}", id);

    Ok(Json(StoreResponse {
        message: "Data stored successfully".to_string(),
        id,
    }))
}

/// Accept a multipart image upload and forward it to Cloudinary.
async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let (filename, data) = read_file_part(multipart).await?;
    if filename.is_empty() {
        return Err(ApiError::UploadInput("No selected file".to_string()));
    }

    let url = state.uploader.upload(&filename, data).await?;
    log::info!("Uploaded image {} ({})", filename, url);

    Ok(Json(UploadResponse {
        message: "Image uploaded successfully".to_string(),
        url,
    }))
}

/// Accept a multipart .docx upload and answer with the extracted blocks.
async fn extract_report(multipart: Multipart) -> Result<Json<docxtract::Document>, ApiError> {
    let (filename, data) = read_file_part(multipart).await?;
    if filename.is_empty() {
        return Err(ApiError::UploadInput("No selected file".to_string()));
    }

    let doc = docxtract::extract_bytes(&data)?;
    log::info!("Extracted {} blocks from {}", doc.len(), filename);

    Ok(Json(doc))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running and healthy".to_string(),
    })
}

/// Pull the `file` part out of a multipart request.
async fn read_file_part(mut multipart: Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Unexpected(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::Unexpected(e.to_string()))?;
            return Ok((filename, data.to_vec()));
        }
    }

    Err(ApiError::UploadInput("No file part".to_string()))
}
