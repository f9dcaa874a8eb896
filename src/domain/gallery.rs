use serde::{Deserialize, Serialize};

use crate::domain::{Arity, AttachmentSlot, ContentRecord, FieldKind, FieldSpec};
use crate::error::{AppError, Result};
use crate::store::{DateValue, Fields};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryAlbum {
    pub id: String,
    pub album_title: String,
    pub event_tag: EventTag,
    #[serde(default)]
    pub caption: String,
    pub photo_urls: Vec<String>,
    /// One of `photo_urls`, shown as the album preview; starts as the
    /// first uploaded photo and is mutable on its own.
    pub featured_image_url: String,
    pub created_at: Option<DateValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTag {
    Workshop,
    Visit,
    Seminar,
    Competition,
    Celebration,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("albumTitle", FieldKind::Text),
    FieldSpec::with_default(
        "eventTag",
        FieldKind::Enum(&["Workshop", "Visit", "Seminar", "Competition", "Celebration"]),
        "Workshop",
    ),
    FieldSpec::optional("caption", FieldKind::Text),
];

const ATTACHMENTS: &[AttachmentSlot] = &[AttachmentSlot {
    name: "photos",
    url_field: "photoUrls",
    arity: Arity::Many,
    required: true,
    size_limit: None,
}];

impl ContentRecord for GalleryAlbum {
    const COLLECTION: &'static str = "gallery";
    const LABEL: &'static str = "Album";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn attachments() -> &'static [AttachmentSlot] {
        ATTACHMENTS
    }

    fn toggleable() -> &'static [&'static str] {
        &["featuredImageUrl"]
    }

    // The featured image must stay one of the album's own photos.
    fn validate_toggle(current: &Fields, field: &str, value: &serde_json::Value) -> Result<()> {
        if field == "featuredImageUrl" {
            let member = current
                .get("photoUrls")
                .and_then(|v| v.as_array())
                .is_some_and(|urls| urls.iter().any(|url| url == value));
            if !member {
                return Err(AppError::Validation(
                    "The featured image must be one of the album's photos".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn on_create(fields: &mut Fields) {
        let first_photo = fields
            .get("photoUrls")
            .and_then(|v| v.as_array())
            .and_then(|urls| urls.first())
            .cloned();
        if let Some(url) = first_photo {
            fields.insert("featuredImageUrl".to_string(), url);
        }
    }
}
