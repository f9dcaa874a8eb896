use serde::{Deserialize, Serialize};

use crate::domain::{Arity, AttachmentSlot, ContentRecord, FieldKind, FieldSpec};
use crate::store::{DateValue, Fields};
use crate::uploader::INLINE_SIZE_LIMIT;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub title: String,
    pub year: String,
    #[serde(default)]
    pub description: String,
    pub file_url: String,
    pub status: ArchiveStatus,
    pub created_at: Option<DateValue>,
}

/// Shared by reports and minutes: created Active, archive is a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveStatus {
    Active,
    Archived,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::with_default("title", FieldKind::Text, "Annual Report"),
    FieldSpec::required("year", FieldKind::Text),
    FieldSpec::optional("description", FieldKind::Text),
];

const ATTACHMENTS: &[AttachmentSlot] = &[AttachmentSlot {
    name: "file",
    url_field: "fileUrl",
    arity: Arity::One,
    required: true,
    size_limit: Some(INLINE_SIZE_LIMIT),
}];

impl ContentRecord for Report {
    const COLLECTION: &'static str = "reports";
    const LABEL: &'static str = "Report";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn attachments() -> &'static [AttachmentSlot] {
        ATTACHMENTS
    }

    fn toggleable() -> &'static [&'static str] {
        &["status"]
    }

    fn on_create(fields: &mut Fields) {
        fields.insert("status".to_string(), serde_json::Value::String("Active".to_string()));
    }
}
