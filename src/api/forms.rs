use axum::extract::Multipart;

use crate::content::{FileSet, FormValues};
use crate::domain::AttachmentSlot;
use crate::error::{AppError, Result};
use crate::uploader::UploadFile;

/// Split a multipart submission into text values and files. A part is a
/// file exactly when its name matches one of the type's attachment
/// slots; empty file parts (a form submitted with no file chosen) are
/// skipped so edit keeps the stored URL.
pub async fn parse_submission(
    mut multipart: Multipart,
    slots: &'static [AttachmentSlot],
) -> Result<(FormValues, FileSet)> {
    let mut values = FormValues::new();
    let mut files = FileSet::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed form: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(slot) = slots.iter().find(|s| s.name == name) {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("could not read {}: {}", filename, e)))?;
            if bytes.is_empty() {
                continue;
            }
            let mut file = UploadFile::new(filename, bytes.to_vec());
            file.content_type = content_type;
            files.entry(slot.name.to_string()).or_default().push(file);
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("could not read {}: {}", name, e)))?;
            values.insert(name, text);
        }
    }

    Ok((values, files))
}
