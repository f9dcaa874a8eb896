use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures_util::future::try_join_all;
use tokio::sync::Mutex;

use crate::domain::{Arity, AttachmentSlot, ContentRecord};
use crate::error::{AppError, Result};
use crate::store::{Document, DocumentStore, Fields, Query};
use crate::uploader::{ObjectUploader, UploadFile};

pub mod form;
pub mod notify;
pub mod singleton;

pub use form::FormValues;
pub use notify::{Notification, NotificationKind};
pub use singleton::SingletonContent;

/// Files from the submitted form, keyed by attachment slot name.
pub type FileSet = HashMap<String, Vec<UploadFile>>;

/// Fetch and decode a whole collection in its natural order. Shared by the
/// admin list and the public read views.
pub async fn fetch_all<T: ContentRecord>(store: &dyn DocumentStore) -> Result<Vec<T>> {
    let (field, direction) = T::sort();
    let documents = store
        .list(T::COLLECTION, Query::all().order_by(field, direction))
        .await?;
    documents.iter().map(T::decode).collect()
}

struct ViewState<T> {
    items: Vec<T>,
    loading: bool,
    notification: Option<Notification>,
    pending_confirm: HashSet<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            notification: None,
            pending_confirm: HashSet::new(),
        }
    }
}

/// The managed-collection console module for one content type: the list
/// snapshot, the loading flag, the transient notification, and the delete
/// confirmation state, plus the five operations every content type
/// repeats. Collaborators are injected so tests run against the in-memory
/// backends.
pub struct ManagedCollection<T: ContentRecord> {
    store: Arc<dyn DocumentStore>,
    uploader: Arc<dyn ObjectUploader>,
    state: Mutex<ViewState<T>>,
}

impl<T: ContentRecord> ManagedCollection<T> {
    pub fn new(store: Arc<dyn DocumentStore>, uploader: Arc<dyn ObjectUploader>) -> Self {
        Self { store, uploader, state: Mutex::new(ViewState::default()) }
    }

    /// Re-query the collection and replace the snapshot wholesale. The
    /// loading flag is up for the duration of the call, error included.
    pub async fn list(&self) -> Result<Vec<T>> {
        self.state.lock().await.loading = true;
        let fetched = fetch_all::<T>(self.store.as_ref()).await;

        let mut state = self.state.lock().await;
        state.loading = false;
        match fetched {
            Ok(items) => {
                state.items = items.clone();
                Ok(items)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn items(&self) -> Vec<T> {
        self.state.lock().await.items.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    /// The current notification, if it has not auto-dismissed yet.
    pub async fn notification(&self) -> Option<Notification> {
        let mut state = self.state.lock().await;
        if state.notification.as_ref().is_some_and(|n| !n.is_live()) {
            state.notification = None;
        }
        state.notification.clone()
    }

    pub async fn submit_create(&self, values: &FormValues, files: FileSet) -> Result<T> {
        match self.create_inner(values, files).await {
            Ok(item) => {
                self.refresh_after_write().await;
                self.notify(Notification::success(format!("{} added successfully!", T::LABEL)))
                    .await;
                Ok(item)
            }
            Err(err) => {
                self.notify(Notification::error(user_message(&err, T::LABEL))).await;
                Err(err)
            }
        }
    }

    pub async fn submit_edit(&self, id: &str, values: &FormValues, files: FileSet) -> Result<T> {
        match self.edit_inner(id, values, files).await {
            Ok(item) => {
                self.refresh_after_write().await;
                self.notify(Notification::success(format!("{} updated successfully!", T::LABEL)))
                    .await;
                Ok(item)
            }
            Err(err) => {
                self.notify(Notification::error(user_message(&err, T::LABEL))).await;
                Err(err)
            }
        }
    }

    /// Arm the confirmation affordance for one item.
    pub async fn begin_remove(&self, id: &str) {
        self.state.lock().await.pending_confirm.insert(id.to_string());
    }

    pub async fn cancel_remove(&self, id: &str) {
        self.state.lock().await.pending_confirm.remove(id);
    }

    pub async fn is_pending_confirm(&self, id: &str) -> bool {
        self.state.lock().await.pending_confirm.contains(id)
    }

    /// Delete after explicit confirmation. A call that was never armed via
    /// `begin_remove` is rejected before the store is touched.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let confirmed = self.state.lock().await.pending_confirm.remove(id);
        if !confirmed {
            return Err(AppError::Validation("Deletion has not been confirmed".to_string()));
        }

        match self.store.delete(T::COLLECTION, id).await {
            Ok(()) => {
                self.refresh_after_write().await;
                self.notify(Notification::success(format!("{} deleted successfully.", T::LABEL)))
                    .await;
                Ok(())
            }
            Err(err) => {
                let err = match err {
                    AppError::Store(msg) => AppError::Delete(msg),
                    other => other,
                };
                self.notify(Notification::error(format!("Failed to delete {}.", label_lower(T::LABEL))))
                    .await;
                Err(err)
            }
        }
    }

    /// Narrow update touching exactly one of the type's toggleable fields,
    /// with no file handling involved. The new value is validated against
    /// the record type before the write: a value the document would no
    /// longer decode with never reaches the store.
    pub async fn toggle_field(
        &self,
        id: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<T> {
        if !T::toggleable().contains(&field) {
            return Err(AppError::Validation(format!(
                "{} is not a toggleable field of {}",
                field,
                T::COLLECTION
            )));
        }

        let current = self
            .store
            .get(T::COLLECTION, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{}/{}", T::COLLECTION, id)))?;

        let mut preview = current.fields.clone();
        preview.insert(field.to_string(), value.clone());
        T::decode(&Document { id: current.id, fields: preview }).map_err(|_| {
            AppError::Validation(format!("{} is not a valid value for {}", value, field))
        })?;
        T::validate_toggle(&current.fields, field, &value)?;

        let mut fields = Fields::new();
        fields.insert(field.to_string(), value);

        match self.store.update(T::COLLECTION, id, fields).await {
            Ok(doc) => {
                let item = T::decode(&doc)?;
                self.refresh_after_write().await;
                self.notify(Notification::success(format!("{} status updated.", T::LABEL))).await;
                Ok(item)
            }
            Err(err) => {
                let err = match err {
                    AppError::Store(msg) => AppError::Update(msg),
                    other => other,
                };
                self.notify(Notification::error("Failed to update status.".to_string())).await;
                Err(err)
            }
        }
    }

    async fn create_inner(&self, values: &FormValues, files: FileSet) -> Result<T> {
        let mut fields = form::coerce_create::<T>(values)?;

        // Attachment arity and size are checked before any network call:
        // a validation failure must leave both collaborators untouched.
        for slot in T::attachments() {
            let supplied = files.get(slot.name).map(Vec::len).unwrap_or(0);
            if slot.required && supplied == 0 {
                return Err(AppError::Validation(format!(
                    "Please select a file for {}",
                    slot.name
                )));
            }
        }
        check_sizes(T::attachments(), &files)?;

        let uploaded = self.upload_all(T::attachments(), files).await?;
        merge_urls(&mut fields, &uploaded);

        T::on_write(&mut fields);
        T::on_create(&mut fields);

        let doc = self
            .store
            .insert(T::COLLECTION, fields)
            .await
            .map_err(write_error)?;
        T::decode(&doc)
    }

    async fn edit_inner(&self, id: &str, values: &FormValues, files: FileSet) -> Result<T> {
        if !T::supports_edit() {
            return Err(AppError::Validation(format!("{} does not support edit", T::COLLECTION)));
        }

        // An absent file means "keep the stored URL": only supplied slots
        // are uploaded and merged.
        check_sizes(T::attachments(), &files)?;
        let mut fields = form::coerce_edit::<T>(values)?;

        let uploaded = self.upload_all(T::attachments(), files).await?;
        merge_urls(&mut fields, &uploaded);

        T::on_write(&mut fields);

        let doc = self
            .store
            .update(T::COLLECTION, id, fields)
            .await
            .map_err(update_error)?;
        T::decode(&doc)
    }

    /// Upload every supplied file concurrently; the caller's document
    /// write happens strictly after all uploads resolve.
    async fn upload_all(
        &self,
        slots: &'static [AttachmentSlot],
        mut files: FileSet,
    ) -> Result<Vec<(&'static AttachmentSlot, Vec<String>)>> {
        let mut pending = Vec::new();
        for slot in slots {
            let Some(slot_files) = files.remove(slot.name) else { continue };
            if slot_files.is_empty() {
                continue;
            }
            let uploader = Arc::clone(&self.uploader);
            pending.push(async move {
                let urls =
                    try_join_all(slot_files.into_iter().map(|f| uploader.upload(f))).await?;
                Ok::<_, AppError>((slot, urls))
            });
        }
        try_join_all(pending).await
    }

    async fn refresh_after_write(&self) {
        if let Err(err) = self.list().await {
            tracing::warn!("post-write refresh of {} failed: {}", T::COLLECTION, err);
        }
    }

    async fn notify(&self, notification: Notification) {
        self.state.lock().await.notification = Some(notification);
    }
}

fn check_sizes(slots: &[AttachmentSlot], files: &FileSet) -> Result<()> {
    for slot in slots {
        let Some(limit) = slot.size_limit else { continue };
        for file in files.get(slot.name).into_iter().flatten() {
            file.check_size(limit)?;
        }
    }
    Ok(())
}

fn merge_urls(fields: &mut Fields, uploaded: &[(&AttachmentSlot, Vec<String>)]) {
    for (slot, urls) in uploaded {
        let value = match slot.arity {
            Arity::One => serde_json::Value::String(urls[0].clone()),
            Arity::Many => serde_json::Value::Array(
                urls.iter().cloned().map(serde_json::Value::String).collect(),
            ),
        };
        fields.insert(slot.url_field.to_string(), value);
    }
}

fn write_error(err: AppError) -> AppError {
    match err {
        AppError::Store(msg) => AppError::Write(msg),
        other => other,
    }
}

fn update_error(err: AppError) -> AppError {
    match err {
        AppError::Store(msg) => AppError::Update(msg),
        other => other,
    }
}

fn user_message(err: &AppError, label: &str) -> String {
    match err {
        AppError::Validation(msg) => msg.clone(),
        AppError::Upload(_) => "Image upload failed".to_string(),
        _ => format!("Failed to save {}. Please try again.", label_lower(label)),
    }
}

fn label_lower(label: &str) -> String {
    label.to_lowercase()
}
