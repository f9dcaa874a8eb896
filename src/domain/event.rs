use serde::{Deserialize, Serialize};

use crate::domain::{Arity, AttachmentSlot, ContentRecord, FieldKind, FieldSpec};
use crate::store::{DateValue, Fields};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub date: String,
    pub event_time: String,
    /// Composed from `date` + `event_time` at write; older documents may
    /// carry it in any of the three date encodings.
    pub date_time: Option<DateValue>,
    pub venue: String,
    pub eligibility: String,
    pub fee_type: FeeType,
    #[serde(default)]
    pub fee_amount: String,
    pub description: String,
    pub faculty_in_charge: String,
    #[serde(default)]
    pub speaker: String,
    pub status: EventStatus,
    pub poster_url: String,
    pub created_at: Option<DateValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Workshop,
    Seminar,
    #[serde(rename = "Guest Lecture")]
    GuestLecture,
    Visit,
    Competition,
    Webinar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Published,
    Draft,
    Completed,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeType {
    Free,
    Paid,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", FieldKind::Text),
    FieldSpec::with_default(
        "type",
        FieldKind::Enum(&["Workshop", "Seminar", "Guest Lecture", "Visit", "Competition", "Webinar"]),
        "Workshop",
    ),
    FieldSpec::required("date", FieldKind::Date),
    FieldSpec::required("eventTime", FieldKind::Time),
    FieldSpec::required("venue", FieldKind::Text),
    FieldSpec::required("eligibility", FieldKind::Text),
    FieldSpec::with_default("feeType", FieldKind::Enum(&["Free", "Paid"]), "Free"),
    FieldSpec::optional("feeAmount", FieldKind::Text),
    FieldSpec::required("description", FieldKind::Text),
    FieldSpec::required("facultyInCharge", FieldKind::Text),
    FieldSpec::optional("speaker", FieldKind::Text),
    FieldSpec::with_default(
        "status",
        FieldKind::Enum(&["Published", "Draft", "Completed", "Archived"]),
        "Published",
    ),
];

const ATTACHMENTS: &[AttachmentSlot] = &[AttachmentSlot {
    name: "poster",
    url_field: "posterUrl",
    arity: Arity::One,
    required: true,
    size_limit: None,
}];

impl ContentRecord for Event {
    const COLLECTION: &'static str = "events";
    const LABEL: &'static str = "Event";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn attachments() -> &'static [AttachmentSlot] {
        ATTACHMENTS
    }

    fn on_write(fields: &mut Fields) {
        // Free events always store amount "0" whatever the form carried.
        let paid = fields.get("feeType").and_then(|v| v.as_str()) == Some("Paid");
        if !paid {
            fields.insert("feeAmount".to_string(), serde_json::Value::String("0".to_string()));
        }

        // Single comparable instant for the public upcoming/past split.
        if let (Some(date), Some(time)) = (
            fields.get("date").and_then(|v| v.as_str()),
            fields.get("eventTime").and_then(|v| v.as_str()),
        ) {
            fields.insert(
                "dateTime".to_string(),
                serde_json::Value::String(format!("{}T{}", date, time)),
            );
        }
    }
}
