use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::store::{Direction, Document, Fields, CREATED_AT};

pub mod about;
pub mod achievement;
pub mod admin;
pub mod committee;
pub mod event;
pub mod gallery;
pub mod minutes;
pub mod notice;
pub mod report;
pub mod settings;
pub mod visit;

pub use about::AboutContent;
pub use achievement::Achievement;
pub use admin::{
    AdminAccount, AdminRole, PendingAdmin, RegistrationCode, ADMINS_COLLECTION, CODES_COLLECTION,
    PENDING_COLLECTION,
};
pub use committee::{CommitteeMember, CommitteeRole, CommitteeStatus};
pub use event::{Event, EventStatus, EventType, FeeType};
pub use gallery::{EventTag, GalleryAlbum};
pub use minutes::Minutes;
pub use notice::{Notice, NoticeCategory, NoticeVisibility};
pub use report::{ArchiveStatus, Report};
pub use settings::SiteSettings;
pub use visit::Visit;

/// Kind of a form field, mirroring the native input that produces it.
/// Enum fields carry their option list; membership is the only check
/// applied, the same constraint a select element enforces.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text,
    Date,
    Time,
    Number,
    Enum(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Applied when the form omits the field, matching the initial value a
    /// select or number input would have submitted anyway.
    pub default: Option<&'static str>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true, default: None }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false, default: None }
    }

    pub const fn with_default(name: &'static str, kind: FieldKind, default: &'static str) -> Self {
        Self { name, kind, required: false, default: Some(default) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    One,
    Many,
}

/// One file input of the admin form: where its uploaded URL(s) land in the
/// document, whether it is mandatory on create, and an optional pre-upload
/// size gate.
#[derive(Debug, Clone, Copy)]
pub struct AttachmentSlot {
    pub name: &'static str,
    pub url_field: &'static str,
    pub arity: Arity,
    pub required: bool,
    pub size_limit: Option<usize>,
}

/// A managed content type: its collection, form schema, attachment slots,
/// natural order, and the hooks that derive stored fields from the form.
/// Decoding from a raw document is explicit and can fail; a malformed
/// document is an error, never a panic.
pub trait ContentRecord: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;
    /// Human label used in notifications ("Event added successfully!").
    const LABEL: &'static str;

    fn fields() -> &'static [FieldSpec];

    fn attachments() -> &'static [AttachmentSlot] {
        &[]
    }

    /// Fields `toggle_field` may touch; anything else is rejected.
    fn toggleable() -> &'static [&'static str] {
        &[]
    }

    /// Per-type constraint on a toggle value beyond what decoding already
    /// enforces, checked against the stored document before the write.
    fn validate_toggle(_current: &Fields, _field: &str, _value: &serde_json::Value) -> Result<()> {
        Ok(())
    }

    fn sort() -> (&'static str, Direction) {
        (CREATED_AT, Direction::Desc)
    }

    fn supports_edit() -> bool {
        false
    }

    /// Runs on create only, after form coercion and URL merging, the
    /// place for created-state defaults (unpinned, Active, featured image).
    fn on_create(_fields: &mut Fields) {}

    /// Runs on create and edit: the place for derived fields that must
    /// track the form (composed date-times, fee normalization).
    fn on_write(_fields: &mut Fields) {}

    fn decode(doc: &Document) -> Result<Self> {
        decode_document(Self::COLLECTION, doc)
    }
}

/// A singleton document (site settings, about content): one fixed id,
/// get + merge-write only, no list semantics. `Default` is the empty state
/// served before the document first exists.
pub trait SingletonRecord: DeserializeOwned + Serialize + Default + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;
    const DOC_ID: &'static str;
    const LABEL: &'static str;

    fn fields() -> &'static [FieldSpec];

    fn attachments() -> &'static [AttachmentSlot] {
        &[]
    }

    fn decode(doc: &Document) -> Result<Self> {
        decode_singleton(Self::COLLECTION, doc)
    }
}

/// Decode a document into a typed record, injecting the store-assigned id
/// under `id`.
pub fn decode_document<T: DeserializeOwned>(collection: &str, doc: &Document) -> Result<T> {
    let mut merged = doc.fields.clone();
    merged.insert("id".to_string(), serde_json::Value::String(doc.id.clone()));
    serde_json::from_value(serde_json::Value::Object(merged)).map_err(|e| AppError::Decode {
        collection: collection.to_string(),
        reason: e.to_string(),
    })
}

/// Singletons live at a fixed id, so nothing is injected.
pub fn decode_singleton<T: DeserializeOwned>(collection: &str, doc: &Document) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(doc.fields.clone())).map_err(|e| {
        AppError::Decode { collection: collection.to_string(), reason: e.to_string() }
    })
}
