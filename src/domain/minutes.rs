use serde::{Deserialize, Serialize};

use crate::domain::report::ArchiveStatus;
use crate::domain::{Arity, AttachmentSlot, ContentRecord, FieldKind, FieldSpec};
use crate::store::{DateValue, Fields};
use crate::uploader::INLINE_SIZE_LIMIT;

/// Minutes of a committee meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Minutes {
    pub id: String,
    pub title: String,
    pub date: String,
    pub agenda: String,
    pub decisions: String,
    #[serde(default)]
    pub file_url: String,
    pub status: ArchiveStatus,
    pub created_at: Option<DateValue>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", FieldKind::Text),
    FieldSpec::required("date", FieldKind::Date),
    FieldSpec::required("agenda", FieldKind::Text),
    FieldSpec::required("decisions", FieldKind::Text),
];

const ATTACHMENTS: &[AttachmentSlot] = &[AttachmentSlot {
    name: "file",
    url_field: "fileUrl",
    arity: Arity::One,
    required: false,
    size_limit: Some(INLINE_SIZE_LIMIT),
}];

impl ContentRecord for Minutes {
    const COLLECTION: &'static str = "moms";
    const LABEL: &'static str = "Minutes of Meeting";

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
        fields
            .entry("fileUrl".to_string())
            .or_insert_with(|| serde_json::Value::String(String::new()));
    }
}
