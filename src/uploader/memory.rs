use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::uploader::{ObjectUploader, UploadFile};

/// Uploader for local development and tests: hands back a deterministic
/// fake URL and remembers every accepted filename so tests can assert on
/// what was actually sent. Can be flipped into a failing mode to exercise
/// the upload error path.
#[derive(Default)]
pub struct MemoryUploader {
    accepted: Mutex<Vec<String>>,
    fail: bool,
}

impl MemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { accepted: Mutex::new(Vec::new()), fail: true }
    }

    pub async fn accepted(&self) -> Vec<String> {
        self.accepted.lock().await.clone()
    }
}

#[async_trait]
impl ObjectUploader for MemoryUploader {
    async fn upload(&self, file: UploadFile) -> Result<String> {
        if self.fail {
            return Err(AppError::Upload("upload service unreachable".to_string()));
        }
        self.accepted.lock().await.push(file.filename.clone());
        Ok(format!("https://cdn.example.test/{}/{}", Uuid::new_v4(), file.filename))
    }
}
