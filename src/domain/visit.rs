use serde::{Deserialize, Serialize};

use crate::domain::{Arity, AttachmentSlot, ContentRecord, FieldKind, FieldSpec};
use crate::store::{DateValue, Direction};
use crate::uploader::INLINE_SIZE_LIMIT;

/// Industrial visit. Requires both a permission-letter scan (size-gated)
/// and at least one photo; the two slots upload concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: String,
    pub visit_title: String,
    pub industry_name: String,
    pub date_of_visit: String,
    pub faculty_incharge: String,
    pub eligibility: String,
    pub report_url: String,
    pub photo_urls: Vec<String>,
    pub created_at: Option<DateValue>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("visitTitle", FieldKind::Text),
    FieldSpec::required("industryName", FieldKind::Text),
    FieldSpec::required("dateOfVisit", FieldKind::Date),
    FieldSpec::required("facultyIncharge", FieldKind::Text),
    FieldSpec::required("eligibility", FieldKind::Text),
];

const ATTACHMENTS: &[AttachmentSlot] = &[
    AttachmentSlot {
        name: "report",
        url_field: "reportUrl",
        arity: Arity::One,
        required: true,
        size_limit: Some(INLINE_SIZE_LIMIT),
    },
    AttachmentSlot {
        name: "photos",
        url_field: "photoUrls",
        arity: Arity::Many,
        required: true,
        size_limit: None,
    },
];

impl ContentRecord for Visit {
    const COLLECTION: &'static str = "industrialVisits";
    const LABEL: &'static str = "Industrial Visit";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn attachments() -> &'static [AttachmentSlot] {
        ATTACHMENTS
    }

    fn sort() -> (&'static str, Direction) {
        ("dateOfVisit", Direction::Desc)
    }
}
