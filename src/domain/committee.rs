use serde::{Deserialize, Serialize};

use crate::domain::{Arity, AttachmentSlot, ContentRecord, FieldKind, FieldSpec};
use crate::store::{DateValue, Direction};

/// Committee roster entry. The one type that supports full edit in the
/// console: the profile picture is mandatory on create but retained on
/// edit when no replacement is supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMember {
    pub id: String,
    pub name: String,
    pub role: CommitteeRole,
    pub contact: String,
    pub tenure: String,
    pub status: CommitteeStatus,
    /// Lower number renders first.
    pub priority: i64,
    pub profile_pic_url: String,
    pub created_at: Option<DateValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitteeRole {
    Chairperson,
    #[serde(rename = "Vice Chairperson")]
    ViceChairperson,
    Secretary,
    Treasurer,
    #[serde(rename = "Program Coordinator")]
    ProgramCoordinator,
    Editor,
    #[serde(rename = "Staff Advisor/Faculty")]
    StaffAdvisor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitteeStatus {
    Active,
    #[serde(rename = "Past Committee")]
    PastCommittee,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", FieldKind::Text),
    FieldSpec::with_default(
        "role",
        FieldKind::Enum(&[
            "Chairperson",
            "Vice Chairperson",
            "Secretary",
            "Treasurer",
            "Program Coordinator",
            "Editor",
            "Staff Advisor/Faculty",
        ]),
        "Program Coordinator",
    ),
    FieldSpec::required("contact", FieldKind::Text),
    FieldSpec::required("tenure", FieldKind::Text),
    FieldSpec::with_default("status", FieldKind::Enum(&["Active", "Past Committee"]), "Active"),
    FieldSpec::with_default("priority", FieldKind::Number, "10"),
];

const ATTACHMENTS: &[AttachmentSlot] = &[AttachmentSlot {
    name: "profilePic",
    url_field: "profilePicUrl",
    arity: Arity::One,
    required: true,
    size_limit: None,
}];

impl ContentRecord for CommitteeMember {
    const COLLECTION: &'static str = "committee";
    const LABEL: &'static str = "Committee member";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn attachments() -> &'static [AttachmentSlot] {
        ATTACHMENTS
    }

    fn toggleable() -> &'static [&'static str] {
        &["status"]
    }

    fn sort() -> (&'static str, Direction) {
        ("priority", Direction::Asc)
    }

    fn supports_edit() -> bool {
        true
    }
}
