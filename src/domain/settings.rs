use serde::{Deserialize, Serialize};

use crate::domain::{Arity, AttachmentSlot, FieldKind, FieldSpec, SingletonRecord};
use crate::uploader::INLINE_SIZE_LIMIT;

/// Site-wide branding and link settings, a single merge-written document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default)]
    pub instagram_url: String,
    #[serde(default)]
    pub linkedin_url: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub college_url: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub updated_at: Option<crate::store::DateValue>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("instagramUrl", FieldKind::Text),
    FieldSpec::optional("linkedinUrl", FieldKind::Text),
    FieldSpec::optional("websiteUrl", FieldKind::Text),
    FieldSpec::optional("collegeUrl", FieldKind::Text),
];

const ATTACHMENTS: &[AttachmentSlot] = &[AttachmentSlot {
    name: "logo",
    url_field: "logoUrl",
    arity: Arity::One,
    required: false,
    size_limit: Some(INLINE_SIZE_LIMIT),
}];

impl SingletonRecord for SiteSettings {
    const COLLECTION: &'static str = "settings";
    const DOC_ID: &'static str = "main";
    const LABEL: &'static str = "Settings";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn attachments() -> &'static [AttachmentSlot] {
        ATTACHMENTS
    }
}
