use std::collections::HashMap;
use std::sync::Arc;

use chapterdesk::content::{FileSet, FormValues, ManagedCollection};
use chapterdesk::domain::{CommitteeMember, Event, GalleryAlbum, Notice, Report};
use chapterdesk::error::AppError;
use chapterdesk::store::{DocumentStore, MemoryDocumentStore, Query};
use chapterdesk::uploader::{MemoryUploader, UploadFile};
use chrono::{Duration, Utc};

fn form(pairs: &[(&str, &str)]) -> FormValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<_, _>>()
}

fn event_form() -> FormValues {
    let day = (Utc::now() + Duration::days(7)).date_naive().to_string();
    form(&[
        ("title", "Rust Workshop"),
        ("date", day.as_str()),
        ("eventTime", "10:00"),
        ("venue", "Lab 2"),
        ("eligibility", "All members"),
        ("description", "Hands-on introduction."),
        ("facultyInCharge", "Dr. Rao"),
    ])
}

fn poster() -> FileSet {
    let mut files = FileSet::new();
    files.insert(
        "poster".to_string(),
        vec![UploadFile::new("poster.png", vec![1u8; 128])],
    );
    files
}

#[tokio::test]
async fn create_without_mandatory_attachment_writes_nothing() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let events: ManagedCollection<Event> =
        ManagedCollection::new(store.clone(), uploader.clone());

    let err = events
        .submit_create(&event_form(), FileSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Nothing reached either collaborator.
    assert!(store.list("events", Query::all()).await?.is_empty());
    assert!(uploader.accepted().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn create_grows_list_by_one_with_uploaded_url() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let events: ManagedCollection<Event> =
        ManagedCollection::new(store.clone(), uploader.clone());

    let before = events.list().await?.len();
    let created = events.submit_create(&event_form(), poster()).await?;
    let after = events.list().await?;

    assert_eq!(after.len(), before + 1);
    // The snapshot tracks the refreshed list and the loading flag is down.
    assert_eq!(events.items().await.len(), after.len());
    assert!(!events.is_loading().await);
    assert!(created.poster_url.starts_with("https://cdn.example.test/"));
    assert!(created.poster_url.ends_with("poster.png"));
    assert_eq!(uploader.accepted().await, vec!["poster.png".to_string()]);
    Ok(())
}

#[tokio::test]
async fn failed_upload_means_no_document() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::failing());
    let events: ManagedCollection<Event> = ManagedCollection::new(store.clone(), uploader);

    let err = events.submit_create(&event_form(), poster()).await.unwrap_err();
    assert!(matches!(err, AppError::Upload(_)));
    assert!(store.list("events", Query::all()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn remove_requires_explicit_confirmation() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let events: ManagedCollection<Event> =
        ManagedCollection::new(store.clone(), uploader);

    let created = events.submit_create(&event_form(), poster()).await?;

    // Unconfirmed delete is refused and touches nothing.
    let err = events.remove(&created.id).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(events.list().await?.len(), 1);

    events.begin_remove(&created.id).await;
    assert!(events.is_pending_confirm(&created.id).await);
    events.remove(&created.id).await?;
    assert!(events.list().await?.iter().all(|e| e.id != created.id));
    Ok(())
}

#[tokio::test]
async fn cancelled_confirmation_disarms_delete() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let events: ManagedCollection<Event> = ManagedCollection::new(store, uploader);

    let created = events.submit_create(&event_form(), poster()).await?;
    events.begin_remove(&created.id).await;
    events.cancel_remove(&created.id).await;

    assert!(events.remove(&created.id).await.is_err());
    assert_eq!(events.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn toggle_is_idempotent() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let reports: ManagedCollection<Report> = ManagedCollection::new(store, uploader);

    let mut files = FileSet::new();
    files.insert(
        "file".to_string(),
        vec![UploadFile::new("report-2024.pdf", vec![1u8; 64])],
    );
    let created = reports
        .submit_create(
            &form(&[("year", "2024"), ("description", "Annual summary")]),
            files,
        )
        .await?;

    let once = reports
        .toggle_field(&created.id, "status", serde_json::json!("Archived"))
        .await?;
    let twice = reports
        .toggle_field(&created.id, "status", serde_json::json!("Archived"))
        .await?;
    assert_eq!(once.status, twice.status);

    let err = reports
        .toggle_field(&created.id, "year", serde_json::json!("2020"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn toggle_with_invalid_value_never_reaches_the_store() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let reports: ManagedCollection<Report> = ManagedCollection::new(store, uploader);

    let mut files = FileSet::new();
    files.insert(
        "file".to_string(),
        vec![UploadFile::new("report-2024.pdf", vec![1u8; 64])],
    );
    let created = reports
        .submit_create(&form(&[("year", "2024")]), files)
        .await?;

    // A value outside the status enum is refused before the write, so the
    // document stays decodable and the list keeps working.
    let err = reports
        .toggle_field(&created.id, "status", serde_json::json!("Bogus"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let listed = reports.list().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, created.status);
    Ok(())
}

#[tokio::test]
async fn featured_image_must_be_one_of_the_albums_photos() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let gallery: ManagedCollection<GalleryAlbum> = ManagedCollection::new(store, uploader);

    let mut files = FileSet::new();
    files.insert(
        "photos".to_string(),
        vec![
            UploadFile::new("one.jpg", vec![1u8; 32]),
            UploadFile::new("two.jpg", vec![1u8; 32]),
        ],
    );
    let created = gallery
        .submit_create(&form(&[("albumTitle", "Tech Fest 2025")]), files)
        .await?;
    assert_eq!(created.featured_image_url, created.photo_urls[0]);

    let switched = gallery
        .toggle_field(
            &created.id,
            "featuredImageUrl",
            serde_json::json!(created.photo_urls[1].clone()),
        )
        .await?;
    assert_eq!(switched.featured_image_url, created.photo_urls[1]);

    let err = gallery
        .toggle_field(
            &created.id,
            "featuredImageUrl",
            serde_json::json!("https://cdn.example.test/elsewhere/foreign.jpg"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn pinned_toggle_round_trips_through_notices() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let notices: ManagedCollection<Notice> = ManagedCollection::new(store, uploader);

    let created = notices
        .submit_create(
            &form(&[
                ("title", "Exam schedule"),
                ("content", "Check the board."),
                ("startDate", "2025-06-01"),
                ("endDate", "2025-06-30"),
            ]),
            FileSet::new(),
        )
        .await?;
    assert!(!created.is_pinned);

    let pinned = notices
        .toggle_field(&created.id, "isPinned", serde_json::json!(true))
        .await?;
    assert!(pinned.is_pinned);
    Ok(())
}

#[tokio::test]
async fn committee_lists_in_priority_order() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let committee: ManagedCollection<CommitteeMember> =
        ManagedCollection::new(store, uploader);

    for (name, priority) in [("thirty", "30"), ("ten", "10"), ("twenty", "20")] {
        let mut files = FileSet::new();
        files.insert(
            "profilePic".to_string(),
            vec![UploadFile::new("pic.png", vec![1u8; 32])],
        );
        committee
            .submit_create(
                &form(&[
                    ("name", name),
                    ("contact", "x@example.com"),
                    ("tenure", "2025-2026"),
                    ("priority", priority),
                ]),
                files,
            )
            .await?;
    }

    let priorities: Vec<i64> = committee.list().await?.iter().map(|m| m.priority).collect();
    assert_eq!(priorities, vec![10, 20, 30]);
    Ok(())
}

#[tokio::test]
async fn editing_a_member_keeps_the_stored_picture() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let committee: ManagedCollection<CommitteeMember> =
        ManagedCollection::new(store, uploader.clone());

    let mut files = FileSet::new();
    files.insert(
        "profilePic".to_string(),
        vec![UploadFile::new("original.png", vec![1u8; 32])],
    );
    let created = committee
        .submit_create(
            &form(&[
                ("name", "A. Person"),
                ("contact", "a@example.com"),
                ("tenure", "2025-2026"),
            ]),
            files,
        )
        .await?;

    // No replacement file: the URL from create survives the edit.
    let edited = committee
        .submit_edit(&created.id, &form(&[("name", "A. Renamed")]), FileSet::new())
        .await?;
    assert_eq!(edited.name, "A. Renamed");
    assert_eq!(edited.profile_pic_url, created.profile_pic_url);
    assert_eq!(uploader.accepted().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn types_without_edit_support_refuse_it() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let events: ManagedCollection<Event> = ManagedCollection::new(store, uploader);

    let created = events.submit_create(&event_form(), poster()).await?;
    let err = events
        .submit_edit(&created.id, &form(&[("venue", "Elsewhere")]), FileSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn oversize_attachment_is_rejected_before_upload() -> anyhow::Result<()> {
    let store: Arc<MemoryDocumentStore> = Arc::new(MemoryDocumentStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let reports: ManagedCollection<Report> =
        ManagedCollection::new(store.clone(), uploader.clone());

    let mut files = FileSet::new();
    files.insert(
        "file".to_string(),
        vec![UploadFile::new("huge.pdf", vec![0u8; 1024 * 1024 + 1])],
    );
    let err = reports
        .submit_create(&form(&[("year", "2024")]), files)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(uploader.accepted().await.is_empty());
    assert!(store.list("reports", Query::all()).await?.is_empty());
    Ok(())
}
