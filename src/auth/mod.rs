use std::sync::Arc;

use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};

use crate::config::AuthConfig;
use crate::domain::{
    AdminAccount, AdminRole, PendingAdmin, ADMINS_COLLECTION, CODES_COLLECTION,
    PENDING_COLLECTION,
};
use crate::error::{AppError, Result};
use crate::identity::{IdentityProvider, IdentityUser};
use crate::store::{value::DateValue, DocumentStore, Fields, Query};

pub mod session;

pub use session::{Session, SessionStore};

pub const SESSION_COOKIE: &str = "session";

/// What a role is allowed to do. Roles map onto capabilities in
/// `authorize`; handlers only ever ask about capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ViewContent,
    EditContent,
    ManageAdmins,
}

/// Pure role-to-capability check. `ReadOnly` can see the console but
/// mutating operations are refused; only `Superadmin` touches the admin
/// roster itself.
pub fn authorize(role: AdminRole, capability: Capability) -> bool {
    match capability {
        Capability::ViewContent => true,
        Capability::EditContent => role != AdminRole::ReadOnly,
        Capability::ManageAdmins => role == AdminRole::Superadmin,
    }
}

/// Gatekeeper between the identity service and the admin console:
/// an identity signs in upstream, but an `admins` document is what
/// actually admits it. Also owns registration, approval, and the
/// in-process session table.
pub struct SessionGuard {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityProvider>,
    sessions: SessionStore,
    config: AuthConfig,
}

impl SessionGuard {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        config: AuthConfig,
    ) -> Self {
        Self {
            store,
            identity,
            sessions: SessionStore::new(),
            config,
        }
    }

    /// Watch the identity service's session channel and re-check approval
    /// on every sign-in it reports. An identity that signs in without an
    /// approval document is signed straight back out. The same task sweeps
    /// expired sessions out of the table once an hour.
    pub fn spawn_watcher(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let guard = Arc::clone(self);
        let mut rx = guard.identity.subscribe();
        tokio::spawn(async move {
            let mut sweep = tokio::time::interval(std::time::Duration::from_secs(3600));
            loop {
                tokio::select! {
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let user = rx.borrow_and_update().clone();
                        let Some(user) = user else { continue };
                        match guard.resolve(&user).await {
                            Ok(admin) => {
                                tracing::debug!(uid = %admin.uid, role = admin.role.as_str(), "session approved");
                            }
                            Err(err) => {
                                tracing::warn!(uid = %user.uid, "session rejected: {}", err);
                            }
                        }
                    }
                    _ = sweep.tick() => {
                        match guard.sessions.cleanup_expired().await {
                            Ok(0) => {}
                            Ok(n) => tracing::debug!("swept {} expired sessions", n),
                            Err(err) => tracing::warn!("session sweep failed: {}", err),
                        }
                    }
                }
            }
        })
    }

    /// Look up the approval document for a signed-in identity. Missing
    /// document means forced sign-out plus `NotApproved`; a store failure
    /// is reported as `AuthLookup` and also forces sign-out, since an
    /// unverifiable session must not stand.
    pub async fn resolve(&self, user: &IdentityUser) -> Result<AdminAccount> {
        let doc = match self.store.get(ADMINS_COLLECTION, &user.uid).await {
            Ok(doc) => doc,
            Err(err) => {
                self.force_sign_out(&user.uid).await;
                return Err(AppError::AuthLookup(err.to_string()));
            }
        };

        match doc {
            Some(doc) => {
                serde_json::from_value(serde_json::Value::Object(doc.fields.clone())).map_err(
                    |e| AppError::Decode {
                        collection: ADMINS_COLLECTION.to_string(),
                        reason: e.to_string(),
                    },
                )
            }
            None => {
                self.force_sign_out(&user.uid).await;
                Err(AppError::NotApproved)
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(AdminAccount, String)> {
        let user = self.identity.sign_in(email, password).await?;
        let admin = self.resolve(&user).await?;

        let token = generate_token();
        let expires_at = Utc::now() + Duration::hours(self.config.session_duration_hours);
        self.sessions
            .create(&admin.uid, &admin.email, admin.role, &token, expires_at)
            .await?;

        Ok((admin, token))
    }

    pub async fn logout(&self, token: &str) -> Result<()> {
        self.sessions.delete_by_token(token).await?;
        self.identity.sign_out().await
    }

    pub async fn validate_session(&self, token: &str) -> Result<Option<Session>> {
        self.sessions.find_by_token(token).await
    }

    /// Self-service registration. The code is checked against the
    /// document store before the identity service is touched, so a bad
    /// code creates no account anywhere.
    pub async fn register(&self, email: &str, password: &str, code: &str) -> Result<PendingAdmin> {
        let matches = self
            .store
            .list(CODES_COLLECTION, Query::all().filter("code", code))
            .await?;
        if matches.is_empty() {
            return Err(AppError::InvalidCode);
        }

        let user = self.identity.sign_up(email, password).await?;

        let pending = PendingAdmin {
            uid: user.uid.clone(),
            email: user.email.clone(),
            status: "pending".to_string(),
            role: AdminRole::Admin,
            created_at: Some(DateValue::now()),
        };
        let fields = to_fields(&pending)?;

        if let Err(err) = self.store.set(PENDING_COLLECTION, &user.uid, fields).await {
            // The identity now exists upstream with no pending record.
            // It can still be registered again or approved by hand.
            tracing::warn!(uid = %user.uid, "identity created but pending record failed: {}", err);
            return Err(match err {
                AppError::Store(msg) => AppError::Write(msg),
                other => other,
            });
        }

        Ok(pending)
    }

    /// Promote a pending registration to a full admin account. The admin
    /// document is written before the pending one is deleted, so a crash
    /// between the two leaves a stale pending row rather than a lost
    /// approval.
    pub async fn approve(&self, pending_uid: &str) -> Result<AdminAccount> {
        let doc = self
            .store
            .get(PENDING_COLLECTION, pending_uid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("pending admin {}", pending_uid)))?;

        let pending: PendingAdmin =
            serde_json::from_value(serde_json::Value::Object(doc.fields.clone())).map_err(|e| {
                AppError::Decode {
                    collection: PENDING_COLLECTION.to_string(),
                    reason: e.to_string(),
                }
            })?;

        let admin = AdminAccount {
            uid: pending.uid.clone(),
            email: pending.email.clone(),
            role: AdminRole::Admin,
            approved_at: Some(DateValue::now()),
        };
        self.store
            .set(ADMINS_COLLECTION, &admin.uid, to_fields(&admin)?)
            .await?;

        if let Err(err) = self.store.delete(PENDING_COLLECTION, pending_uid).await {
            tracing::warn!(uid = %pending_uid, "approved but pending record not removed: {}", err);
        }

        Ok(admin)
    }

    pub async fn reject(&self, pending_uid: &str) -> Result<()> {
        self.store.delete(PENDING_COLLECTION, pending_uid).await
    }

    /// Change another admin's role. Self-edit is refused so a superadmin
    /// cannot demote themselves into a lockout.
    pub async fn change_role(
        &self,
        actor_uid: &str,
        target_uid: &str,
        role: AdminRole,
    ) -> Result<AdminAccount> {
        if actor_uid == target_uid {
            return Err(AppError::Forbidden(
                "You cannot change your own role".to_string(),
            ));
        }

        let mut fields = Fields::new();
        fields.insert("role".to_string(), serde_json::json!(role.as_str()));
        let doc = self.store.update(ADMINS_COLLECTION, target_uid, fields).await?;

        serde_json::from_value(serde_json::Value::Object(doc.fields)).map_err(|e| {
            AppError::Decode {
                collection: ADMINS_COLLECTION.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Revoke an admin's approval entirely and drop their live sessions.
    pub async fn disable(&self, actor_uid: &str, target_uid: &str) -> Result<()> {
        if actor_uid == target_uid {
            return Err(AppError::Forbidden(
                "You cannot disable your own account".to_string(),
            ));
        }

        self.store.delete(ADMINS_COLLECTION, target_uid).await?;
        self.sessions.delete_by_uid(target_uid).await
    }

    pub async fn list_admins(&self) -> Result<Vec<AdminAccount>> {
        let docs = self.store.list(ADMINS_COLLECTION, Query::all()).await?;
        docs.into_iter()
            .map(|doc| {
                serde_json::from_value(serde_json::Value::Object(doc.fields)).map_err(|e| {
                    AppError::Decode {
                        collection: ADMINS_COLLECTION.to_string(),
                        reason: e.to_string(),
                    }
                })
            })
            .collect()
    }

    pub async fn list_pending(&self) -> Result<Vec<PendingAdmin>> {
        let docs = self.store.list(PENDING_COLLECTION, Query::all()).await?;
        docs.into_iter()
            .map(|doc| {
                serde_json::from_value(serde_json::Value::Object(doc.fields)).map_err(|e| {
                    AppError::Decode {
                        collection: PENDING_COLLECTION.to_string(),
                        reason: e.to_string(),
                    }
                })
            })
            .collect()
    }

    pub fn session_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token.to_string()))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(self.config.secure_cookies)
            .max_age(cookie::time::Duration::hours(self.config.session_duration_hours))
            .build()
    }

    pub fn logout_cookie() -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .max_age(cookie::time::Duration::seconds(0))
            .build()
    }

    async fn force_sign_out(&self, uid: &str) {
        if let Err(err) = self.identity.sign_out().await {
            tracing::warn!(uid = %uid, "forced sign-out failed: {}", err);
        }
        if let Err(err) = self.sessions.delete_by_uid(uid).await {
            tracing::warn!(uid = %uid, "session cleanup failed: {}", err);
        }
    }
}

fn generate_token() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn to_fields<T: serde::Serialize>(value: &T) -> Result<Fields> {
    match serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(AppError::Internal(format!(
            "expected object, got {}",
            other
        ))),
    }
}
