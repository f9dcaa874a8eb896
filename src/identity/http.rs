use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::watch;

use crate::error::{AppError, Result};
use crate::identity::{IdentityProvider, IdentityUser};

/// Client for the hosted identity service's password endpoints. The
/// service answers with an opaque uid (`localId`) plus the email; token
/// refresh is out of scope since the guard re-resolves approval on every
/// session change anyway.
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    session_tx: watch::Sender<Option<IdentityUser>>,
}

#[derive(Deserialize)]
struct AccountResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        let (session_tx, _) = watch::channel(None);
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            session_tx,
        }
    }

    async fn post_credentials(&self, action: &str, email: &str, password: &str) -> Result<IdentityUser> {
        let response = self
            .client
            .post(format!("{}/v1/accounts:{}", self.base_url, action))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({ "email": email, "password": password, "returnSecureToken": true }))
            .send()
            .await
            .map_err(|e| AppError::IdentityCreation(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match action {
                "signUp" => AppError::IdentityCreation(body),
                _ => AppError::Unauthorized,
            });
        }

        let account = response
            .json::<AccountResponse>()
            .await
            .map_err(|e| AppError::IdentityCreation(e.to_string()))?;
        Ok(IdentityUser { uid: account.local_id, email: account.email })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser> {
        self.post_credentials("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser> {
        let user = self.post_credentials("signInWithPassword", email, password).await?;
        let _ = self.session_tx.send(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<()> {
        let _ = self.session_tx.send(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<IdentityUser>> {
        self.session_tx.subscribe()
    }
}
