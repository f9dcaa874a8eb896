use std::collections::HashMap;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use tokio::sync::{watch, RwLock};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::identity::{IdentityProvider, IdentityUser};

struct Account {
    uid: String,
    password_hash: String,
}

/// Identity provider for local development and tests. Credentials are
/// argon2-hashed in memory; the same weak-password and duplicate-email
/// rejections the hosted service applies are reproduced here so the
/// registration error path behaves identically.
pub struct MemoryIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    session_tx: watch::Sender<Option<IdentityUser>>,
}

impl Default for MemoryIdentityProvider {
    fn default() -> Self {
        let (session_tx, _) = watch::channel(None);
        Self { accounts: RwLock::new(HashMap::new()), session_tx }
    }
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_password(password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser> {
        if password.len() < 6 {
            return Err(AppError::IdentityCreation(
                "Password should be at least 6 characters".to_string(),
            ));
        }

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(AppError::IdentityCreation(
                "The email address is already in use".to_string(),
            ));
        }

        let uid = Uuid::new_v4().to_string();
        accounts.insert(
            email.to_string(),
            Account { uid: uid.clone(), password_hash: Self::hash_password(password)? },
        );

        Ok(IdentityUser { uid, email: email.to_string() })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser> {
        let accounts = self.accounts.read().await;
        let account = accounts.get(email).ok_or(AppError::Unauthorized)?;

        if !Self::verify_password(password, &account.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let user = IdentityUser { uid: account.uid.clone(), email: email.to_string() };
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

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let provider = MemoryIdentityProvider::new();
        let created = provider.sign_up("a@example.com", "hunter22").await.unwrap();
        let signed_in = provider.sign_in("a@example.com", "hunter22").await.unwrap();
        assert_eq!(created, signed_in);
    }

    #[tokio::test]
    async fn weak_password_and_duplicate_email_are_rejected() {
        let provider = MemoryIdentityProvider::new();
        assert!(matches!(
            provider.sign_up("a@example.com", "abc").await,
            Err(AppError::IdentityCreation(_))
        ));
        provider.sign_up("a@example.com", "hunter22").await.unwrap();
        assert!(matches!(
            provider.sign_up("a@example.com", "hunter22").await,
            Err(AppError::IdentityCreation(_))
        ));
    }

    #[tokio::test]
    async fn session_channel_flips_on_sign_in_and_out() {
        let provider = MemoryIdentityProvider::new();
        let rx = provider.subscribe();
        assert!(rx.borrow().is_none());

        provider.sign_up("a@example.com", "hunter22").await.unwrap();
        provider.sign_in("a@example.com", "hunter22").await.unwrap();
        assert!(rx.borrow().is_some());

        provider.sign_out().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
