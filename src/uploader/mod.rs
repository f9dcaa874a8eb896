use async_trait::async_trait;

use crate::error::{AppError, Result};

pub mod http;
pub mod memory;

pub use http::HttpUploader;
pub use memory::MemoryUploader;

use std::sync::Arc;

use crate::config::{Backend, UploaderConfig};

pub fn from_config(config: &UploaderConfig) -> Result<Arc<dyn ObjectUploader>> {
    match config.backend {
        Backend::Memory => Ok(Arc::new(MemoryUploader::new())),
        Backend::Http => {
            let upload_url = config.upload_url.clone().ok_or_else(|| {
                AppError::Internal(
                    "uploader.upload_url is required for the http backend".to_string(),
                )
            })?;
            let upload_preset = config.upload_preset.clone().ok_or_else(|| {
                AppError::Internal(
                    "uploader.upload_preset is required for the http backend".to_string(),
                )
            })?;
            Ok(Arc::new(HttpUploader::new(upload_url, upload_preset)))
        }
    }
}

/// Several content types cap their attachments at 1 MiB before the upload
/// is even attempted. A UX guard only; the upload service stays
/// authoritative and may enforce its own limits.
pub const INLINE_SIZE_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { filename: filename.into(), content_type: None, bytes }
    }

    pub fn check_size(&self, limit: usize) -> Result<()> {
        if self.bytes.len() > limit {
            return Err(AppError::Validation(format!(
                "{} is too large (max {} KB)",
                self.filename,
                limit / 1024
            )));
        }
        Ok(())
    }
}

/// Remote object upload collaborator: accept one binary blob, return a
/// durable URL. Failures (oversize, wrong type, unreachable) surface as
/// `AppError::Upload`.
#[async_trait]
pub trait ObjectUploader: Send + Sync {
    async fn upload(&self, file: UploadFile) -> Result<String>;
}
