use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod http;
pub mod memory;
pub mod value;

pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;
pub use value::DateValue;

use std::sync::Arc;

use crate::config::{Backend, StoreConfig};
use crate::error::AppError;

pub fn from_config(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.backend {
        Backend::Memory => Ok(Arc::new(MemoryDocumentStore::new())),
        Backend::Http => {
            let base_url = config.base_url.clone().ok_or_else(|| {
                AppError::Internal("store.base_url is required for the http backend".to_string())
            })?;
            let api_key = config.api_key.clone().ok_or_else(|| {
                AppError::Internal("store.api_key is required for the http backend".to_string())
            })?;
            Ok(Arc::new(HttpDocumentStore::new(base_url, api_key)))
        }
    }
}

/// Flat field map of a stored document. Typed decoding happens at the
/// domain boundary, not here.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Field name the store stamps on every inserted document.
pub const CREATED_AT: &str = "createdAt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// Equality filter plus order-by, the only query shape the upstream store
/// is asked for. No pagination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Query {
    pub filter: Option<(String, serde_json::Value)>,
    pub order_by: Option<(String, Direction)>,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: &str, value: impl Into<serde_json::Value>) -> Self {
        self.filter = Some((field.to_string(), value.into()));
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some((field.to_string(), direction));
        self
    }
}

/// Remote document store collaborator. Collections are schemaless; ids and
/// creation timestamps are server-assigned on `insert`. `set` and `update`
/// are partial merges: fields not supplied are left untouched.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    async fn list(&self, collection: &str, query: Query) -> Result<Vec<Document>>;

    /// Create a document with a store-assigned id and `createdAt` stamp.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document>;

    /// Merge-write at a caller-chosen id, creating the document if absent.
    /// Used for singletons and admin records keyed by identity uid.
    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<Document>;

    /// Partial merge into an existing document. Fails if the id is unknown.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<Document>;

    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}
