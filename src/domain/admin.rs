use serde::{Deserialize, Serialize};

use crate::store::DateValue;

/// An approved administrator. Keyed by identity uid; holding sign-in
/// credentials is not enough, this document is what grants console access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    pub uid: String,
    pub email: String,
    pub role: AdminRole,
    pub approved_at: Option<DateValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdminRole {
    Superadmin,
    Admin,
    EventAdmin,
    ContentAdmin,
    ReadOnly,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Superadmin => "superadmin",
            AdminRole::Admin => "admin",
            AdminRole::EventAdmin => "eventAdmin",
            AdminRole::ContentAdmin => "contentAdmin",
            AdminRole::ReadOnly => "readOnly",
        }
    }
}

/// A registered-but-unapproved identity awaiting superadmin action.
/// Also keyed by identity uid; converted into an `AdminAccount` on
/// approval, left indefinitely otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAdmin {
    pub uid: String,
    pub email: String,
    pub status: String,
    pub role: AdminRole,
    pub created_at: Option<DateValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationCode {
    pub code: String,
}

pub const ADMINS_COLLECTION: &str = "admins";
pub const PENDING_COLLECTION: &str = "pendingAdmins";
pub const CODES_COLLECTION: &str = "adminRegisterCodes";
