use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::AdminRole;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Session {
    pub uid: String,
    pub email: String,
    pub role: AdminRole,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// In-process session table keyed by the bearer token. Sessions only ever
/// live as long as the server, which matches the upstream identity
/// service being the durable source of truth.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self { sessions: RwLock::new(HashMap::new()) }
    }

    pub async fn create(
        &self,
        uid: &str,
        email: &str,
        role: AdminRole,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session> {
        let session = Session {
            uid: uid.to_string(),
            email: email.to_string(),
            role,
            expires_at,
            created_at: Utc::now(),
        };
        self.sessions
            .write()
            .await
            .insert(token.to_string(), session.clone());
        Ok(session)
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(token)
            .filter(|s| s.expires_at > Utc::now())
            .cloned())
    }

    pub async fn delete_by_token(&self, token: &str) -> Result<()> {
        self.sessions.write().await.remove(token);
        Ok(())
    }

    /// Drop every session held by one account. Used when an account is
    /// disabled or its approval is found missing.
    pub async fn delete_by_uid(&self, uid: &str) -> Result<()> {
        self.sessions.write().await.retain(|_, s| s.uid != uid);
        Ok(())
    }

    pub async fn cleanup_expired(&self) -> Result<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        let now = Utc::now();
        sessions.retain(|_, s| s.expires_at > now);
        Ok(before - sessions.len())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
