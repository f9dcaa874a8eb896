use serde::{Deserialize, Serialize};

use crate::domain::{Arity, AttachmentSlot, ContentRecord, FieldKind, FieldSpec};
use crate::store::{DateValue, Direction, Fields};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: NoticeCategory,
    pub start_date: String,
    pub end_date: String,
    pub visibility: NoticeVisibility,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub file_url: String,
    pub created_at: Option<DateValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeCategory {
    General,
    Event,
    #[serde(rename = "Committee Notice")]
    CommitteeNotice,
    Academic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeVisibility {
    Public,
    #[serde(rename = "Internal only")]
    InternalOnly,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", FieldKind::Text),
    FieldSpec::required("content", FieldKind::Text),
    FieldSpec::with_default(
        "category",
        FieldKind::Enum(&["General", "Event", "Committee Notice", "Academic"]),
        "General",
    ),
    FieldSpec::required("startDate", FieldKind::Date),
    FieldSpec::required("endDate", FieldKind::Date),
    FieldSpec::with_default("visibility", FieldKind::Enum(&["Public", "Internal only"]), "Public"),
];

const ATTACHMENTS: &[AttachmentSlot] = &[AttachmentSlot {
    name: "file",
    url_field: "fileUrl",
    arity: Arity::One,
    required: false,
    size_limit: None,
}];

impl ContentRecord for Notice {
    const COLLECTION: &'static str = "notices";
    const LABEL: &'static str = "Notice";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn attachments() -> &'static [AttachmentSlot] {
        ATTACHMENTS
    }

    fn toggleable() -> &'static [&'static str] {
        &["isPinned"]
    }

    fn sort() -> (&'static str, Direction) {
        ("startDate", Direction::Desc)
    }

    fn on_create(fields: &mut Fields) {
        // New notices are never born pinned.
        fields.insert("isPinned".to_string(), serde_json::Value::Bool(false));
        // A notice without a file still stores an empty URL, so readers
        // need no missing-field handling.
        fields
            .entry("fileUrl".to_string())
            .or_insert_with(|| serde_json::Value::String(String::new()));
    }
}
