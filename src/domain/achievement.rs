use serde::{Deserialize, Serialize};

use crate::domain::{Arity, AttachmentSlot, ContentRecord, FieldKind, FieldSpec};
use crate::store::DateValue;
use crate::uploader::INLINE_SIZE_LIMIT;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub file_url: String,
    pub created_at: Option<DateValue>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::with_default("title", FieldKind::Text, "Award"),
    FieldSpec::required("date", FieldKind::Date),
    FieldSpec::required("description", FieldKind::Text),
];

const ATTACHMENTS: &[AttachmentSlot] = &[AttachmentSlot {
    name: "file",
    url_field: "fileUrl",
    arity: Arity::One,
    required: true,
    size_limit: Some(INLINE_SIZE_LIMIT),
}];

impl ContentRecord for Achievement {
    const COLLECTION: &'static str = "achievements";
    const LABEL: &'static str = "Achievement";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn attachments() -> &'static [AttachmentSlot] {
        ATTACHMENTS
    }
}
