use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::uploader::{ObjectUploader, UploadFile};

/// Unsigned upload to the hosted image service: multipart POST carrying the
/// file plus an upload-preset token, answering with the durable URL.
pub struct HttpUploader {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl HttpUploader {
    pub fn new(upload_url: String, upload_preset: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url,
            upload_preset,
        }
    }
}

#[async_trait]
impl ObjectUploader for HttpUploader {
    async fn upload(&self, file: UploadFile) -> Result<String> {
        let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.filename);
        if let Some(content_type) = file.content_type {
            part = part
                .mime_str(&content_type)
                .map_err(|e| AppError::Upload(e.to_string()))?;
        }

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upload(format!("upload service returned {}: {}", status, body)));
        }

        let parsed = response
            .json::<UploadResponse>()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;
        Ok(parsed.secure_url)
    }
}
