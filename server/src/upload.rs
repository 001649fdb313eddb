//! Cloudinary image upload.

use sha1::{Digest, Sha1};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::CloudinaryConfig;
use crate::error::ApiError;

/// Uploads images to Cloudinary and returns their public URL.
#[derive(Clone)]
pub struct CloudinaryUploader {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

#[derive(serde::Deserialize)]
struct CloudinaryResponse {
    secure_url: String,
}

impl CloudinaryUploader {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Upload an image and return its secure URL.
    pub async fn upload(&self, filename: &str, data: Vec<u8>) -> Result<String, ApiError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ApiError::Unexpected(e.to_string()))?
            .as_secs();
        let signature = sign_upload(timestamp, &self.config.api_secret);

        let part = reqwest::multipart::Part::bytes(data).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature);

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.config.cloud_name
        );
        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Unexpected(format!(
                "upload failed with status {}: {}",
                status, body
            )));
        }

        let parsed: CloudinaryResponse = response.json().await?;
        Ok(parsed.secure_url)
    }
}

/// Cloudinary signs the sorted parameter string followed by the API secret.
/// With only a timestamp parameter that string is `timestamp=<ts><secret>`.
fn sign_upload(timestamp: u64, api_secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("timestamp={}{}", timestamp, api_secret).as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
