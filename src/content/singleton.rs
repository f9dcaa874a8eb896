use std::sync::Arc;

use crate::content::{FileSet, FormValues};
use crate::domain::{Arity, SingletonRecord};
use crate::error::{AppError, Result};
use crate::store::{value::DateValue, DocumentStore, Fields};
use crate::uploader::ObjectUploader;

/// Fixed-identity document editor for the two singleton types (site
/// settings, about content). There is no list, no delete, and no status:
/// just read-or-default and merge-write.
pub struct SingletonContent<T: SingletonRecord> {
    store: Arc<dyn DocumentStore>,
    uploader: Arc<dyn ObjectUploader>,
    _marker: std::marker::PhantomData<T>,
}

impl<T: SingletonRecord> SingletonContent<T> {
    pub fn new(store: Arc<dyn DocumentStore>, uploader: Arc<dyn ObjectUploader>) -> Self {
        Self { store, uploader, _marker: std::marker::PhantomData }
    }

    /// The singleton document, or the type's defaults when it has never
    /// been written.
    pub async fn get(&self) -> Result<T> {
        match self.store.get(T::COLLECTION, T::DOC_ID).await? {
            Some(doc) => T::decode(&doc),
            None => Ok(T::default()),
        }
    }

    /// Merge-write the form over whatever is stored. Absent files keep
    /// the stored URL; supplied ones are uploaded first, so a failed
    /// upload leaves the document untouched.
    pub async fn save(&self, values: &FormValues, mut files: FileSet) -> Result<T> {
        let mut fields = Fields::new();
        for spec in T::fields() {
            if let Some(value) = values.get(spec.name) {
                let trimmed = value.trim();
                fields.insert(
                    spec.name.to_string(),
                    serde_json::Value::String(trimmed.to_string()),
                );
            }
        }

        for slot in T::attachments() {
            let Some(slot_files) = files.remove(slot.name) else { continue };
            let Some(file) = slot_files.into_iter().next() else { continue };
            if let Some(limit) = slot.size_limit {
                file.check_size(limit)?;
            }
            let url = self.uploader.upload(file).await?;
            debug_assert!(matches!(slot.arity, Arity::One));
            fields.insert(slot.url_field.to_string(), serde_json::Value::String(url));
        }

        fields.insert(
            "updatedAt".to_string(),
            serde_json::to_value(DateValue::now()).map_err(|e| AppError::Internal(e.to_string()))?,
        );

        let doc = self
            .store
            .set(T::COLLECTION, T::DOC_ID, fields)
            .await
            .map_err(|err| match err {
                AppError::Store(msg) => AppError::Write(msg),
                other => other,
            })?;
        T::decode(&doc)
    }
}
