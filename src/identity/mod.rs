use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::Result;

pub mod http;
pub mod memory;

pub use http::HttpIdentityProvider;
pub use memory::MemoryIdentityProvider;

use std::sync::Arc;

use crate::config::{Backend, IdentityConfig};
use crate::error::AppError;

pub fn from_config(config: &IdentityConfig) -> Result<Arc<dyn IdentityProvider>> {
    match config.backend {
        Backend::Memory => Ok(Arc::new(MemoryIdentityProvider::new())),
        Backend::Http => {
            let base_url = config.base_url.clone().ok_or_else(|| {
                AppError::Internal("identity.base_url is required for the http backend".to_string())
            })?;
            let api_key = config.api_key.clone().ok_or_else(|| {
                AppError::Internal("identity.api_key is required for the http backend".to_string())
            })?;
            Ok(Arc::new(HttpIdentityProvider::new(base_url, api_key)))
        }
    }
}

/// Opaque identity as the identity service reports it: a uid plus the
/// email it was registered with. Approval status lives in the document
/// store, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
    pub uid: String,
    pub email: String,
}

/// Remote identity service collaborator. Session state is push-based:
/// `subscribe` yields a watch channel that flips on sign-in and sign-out,
/// which is what the session guard observes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser>;

    async fn sign_out(&self) -> Result<()>;

    fn subscribe(&self) -> watch::Receiver<Option<IdentityUser>>;
}
