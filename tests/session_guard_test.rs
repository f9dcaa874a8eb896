use std::sync::Arc;

use chapterdesk::auth::{Capability, SessionGuard};
use chapterdesk::config::AuthConfig;
use chapterdesk::domain::{
    AdminAccount, AdminRole, ADMINS_COLLECTION, CODES_COLLECTION, PENDING_COLLECTION,
};
use chapterdesk::error::AppError;
use chapterdesk::identity::{IdentityProvider, MemoryIdentityProvider};
use chapterdesk::store::{value::DateValue, DocumentStore, Fields, MemoryDocumentStore, Query};

fn auth_config() -> AuthConfig {
    AuthConfig { session_duration_hours: 24, secure_cookies: false }
}

fn guard(
    store: &Arc<MemoryDocumentStore>,
    identity: &Arc<MemoryIdentityProvider>,
) -> SessionGuard {
    SessionGuard::new(store.clone(), identity.clone(), auth_config())
}

async fn seed_code(store: &MemoryDocumentStore, code: &str) -> anyhow::Result<()> {
    let mut fields = Fields::new();
    fields.insert("code".to_string(), serde_json::json!(code));
    store.insert(CODES_COLLECTION, fields).await?;
    Ok(())
}

async fn seed_admin(
    store: &MemoryDocumentStore,
    uid: &str,
    email: &str,
    role: AdminRole,
) -> anyhow::Result<()> {
    let admin = AdminAccount {
        uid: uid.to_string(),
        email: email.to_string(),
        role,
        approved_at: Some(DateValue::now()),
    };
    let fields = match serde_json::to_value(&admin)? {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    store.set(ADMINS_COLLECTION, uid, fields).await?;
    Ok(())
}

#[tokio::test]
async fn unapproved_identity_is_signed_back_out() -> anyhow::Result<()> {
    let store = Arc::new(MemoryDocumentStore::new());
    let identity = Arc::new(MemoryIdentityProvider::new());
    let guard = guard(&store, &identity);

    identity.sign_up("lurker@example.com", "secret123").await?;

    // Sign-in succeeds upstream but there is no approval document.
    let err = guard.login("lurker@example.com", "secret123").await.unwrap_err();
    assert!(matches!(err, AppError::NotApproved));

    // The forced sign-out is visible on the identity session channel.
    let rx = identity.subscribe();
    assert!(rx.borrow().is_none());
    Ok(())
}

#[tokio::test]
async fn approved_admin_gets_a_session() -> anyhow::Result<()> {
    let store = Arc::new(MemoryDocumentStore::new());
    let identity = Arc::new(MemoryIdentityProvider::new());
    let guard = guard(&store, &identity);

    let user = identity.sign_up("chair@example.com", "secret123").await?;
    seed_admin(&store, &user.uid, &user.email, AdminRole::Superadmin).await?;

    let (admin, token) = guard.login("chair@example.com", "secret123").await?;
    assert_eq!(admin.role, AdminRole::Superadmin);

    let session = guard.validate_session(&token).await?.expect("session");
    assert_eq!(session.uid, user.uid);

    guard.logout(&token).await?;
    assert!(guard.validate_session(&token).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn bad_register_code_creates_no_identity() -> anyhow::Result<()> {
    let store = Arc::new(MemoryDocumentStore::new());
    let identity = Arc::new(MemoryIdentityProvider::new());
    let guard = guard(&store, &identity);

    seed_code(&store, "GOODCODE").await?;

    let err = guard
        .register("new@example.com", "secret123", "BADCODE")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCode));

    // No identity account was created, so the credentials do not work.
    assert!(identity.sign_in("new@example.com", "secret123").await.is_err());
    assert!(store.list(PENDING_COLLECTION, Query::all()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn register_then_approve_grants_admin() -> anyhow::Result<()> {
    let store = Arc::new(MemoryDocumentStore::new());
    let identity = Arc::new(MemoryIdentityProvider::new());
    let guard = guard(&store, &identity);

    seed_code(&store, "GOODCODE").await?;

    let pending = guard
        .register("new@example.com", "secret123", "GOODCODE")
        .await?;
    assert_eq!(pending.status, "pending");

    // Registration alone does not admit anyone.
    let err = guard.login("new@example.com", "secret123").await.unwrap_err();
    assert!(matches!(err, AppError::NotApproved));

    let admin = guard.approve(&pending.uid).await?;
    assert_eq!(admin.role, AdminRole::Admin);
    assert!(store.list(PENDING_COLLECTION, Query::all()).await?.is_empty());

    let (admin, _token) = guard.login("new@example.com", "secret123").await?;
    assert_eq!(admin.email, "new@example.com");
    Ok(())
}

#[tokio::test]
async fn self_edit_is_refused() -> anyhow::Result<()> {
    let store = Arc::new(MemoryDocumentStore::new());
    let identity = Arc::new(MemoryIdentityProvider::new());
    let guard = guard(&store, &identity);

    seed_admin(&store, "root-1", "root@example.com", AdminRole::Superadmin).await?;

    let err = guard
        .change_role("root-1", "root-1", AdminRole::ReadOnly)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = guard.disable("root-1", "root-1").await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // The document is untouched.
    let doc = store.get(ADMINS_COLLECTION, "root-1").await?.expect("admin doc");
    assert_eq!(doc.fields["role"], serde_json::json!("superadmin"));
    Ok(())
}

#[tokio::test]
async fn disabling_revokes_live_sessions() -> anyhow::Result<()> {
    let store = Arc::new(MemoryDocumentStore::new());
    let identity = Arc::new(MemoryIdentityProvider::new());
    let guard = guard(&store, &identity);

    let user = identity.sign_up("editor@example.com", "secret123").await?;
    seed_admin(&store, &user.uid, &user.email, AdminRole::Admin).await?;
    seed_admin(&store, "root-1", "root@example.com", AdminRole::Superadmin).await?;

    let (_, token) = guard.login("editor@example.com", "secret123").await?;
    assert!(guard.validate_session(&token).await?.is_some());

    guard.disable("root-1", &user.uid).await?;
    assert!(guard.validate_session(&token).await?.is_none());
    assert!(store.get(ADMINS_COLLECTION, &user.uid).await?.is_none());
    Ok(())
}

#[test]
fn capability_matrix_matches_roles() {
    use chapterdesk::auth::authorize;

    assert!(authorize(AdminRole::Superadmin, Capability::ManageAdmins));
    assert!(authorize(AdminRole::Admin, Capability::EditContent));
    assert!(!authorize(AdminRole::Admin, Capability::ManageAdmins));
    assert!(authorize(AdminRole::ReadOnly, Capability::ViewContent));
    assert!(!authorize(AdminRole::ReadOnly, Capability::EditContent));
}
