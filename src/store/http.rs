use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::store::{Document, DocumentStore, Fields, Query};

/// Client for the hosted document store's REST surface. One collection per
/// URL segment, JSON bodies, bearer-key auth. The server assigns ids and
/// `createdAt` stamps on insert; `set`/`update` are merge semantics on the
/// server side.
pub struct HttpDocumentStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct ListResponse {
    documents: Vec<Document>,
}

impl HttpDocumentStore {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn url(&self, collection: &str, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}/collections/{}/documents/{}", self.base_url, collection, id),
            None => format!("{}/collections/{}/documents", self.base_url, collection),
        }
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Store(format!("store returned {}: {}", status, body)))
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let response = self
            .client
            .get(self.url(collection, Some(id)))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let document = self.check(response).await?.json::<Document>().await?;
        Ok(Some(document))
    }

    async fn list(&self, collection: &str, query: Query) -> Result<Vec<Document>> {
        let response = self
            .client
            .post(format!("{}/collections/{}:query", self.base_url, collection))
            .bearer_auth(&self.api_key)
            .json(&query)
            .send()
            .await?;

        let list = self.check(response).await?.json::<ListResponse>().await?;
        Ok(list.documents)
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document> {
        let response = self
            .client
            .post(self.url(collection, None))
            .bearer_auth(&self.api_key)
            .json(&fields)
            .send()
            .await
            .map_err(|e| AppError::Write(e.to_string()))?;

        let document = self.check(response).await?.json::<Document>().await?;
        Ok(document)
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<Document> {
        let response = self
            .client
            .put(self.url(collection, Some(id)))
            .bearer_auth(&self.api_key)
            .json(&fields)
            .send()
            .await
            .map_err(|e| AppError::Write(e.to_string()))?;

        let document = self.check(response).await?.json::<Document>().await?;
        Ok(document)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<Document> {
        let response = self
            .client
            .patch(self.url(collection, Some(id)))
            .bearer_auth(&self.api_key)
            .json(&fields)
            .send()
            .await
            .map_err(|e| AppError::Update(e.to_string()))?;

        let document = self.check(response).await?.json::<Document>().await?;
        Ok(document)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(collection, Some(id)))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Delete(e.to_string()))?;

        self.check(response).await?;
        Ok(())
    }
}
