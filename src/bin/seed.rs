use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::Parser;
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use fake::Fake;

use chapterdesk::config::Settings;
use chapterdesk::content::{FileSet, FormValues, ManagedCollection};
use chapterdesk::domain::{
    AdminAccount, AdminRole, CommitteeMember, Event, Notice, RegistrationCode, Visit,
    ADMINS_COLLECTION, CODES_COLLECTION,
};
use chapterdesk::identity::IdentityProvider;
use chapterdesk::store::{value::DateValue, DocumentStore, Fields};
use chapterdesk::uploader::UploadFile;
use chapterdesk::{identity, store, uploader};

/// Seed the configured document store with a registration code, a
/// superadmin account, and sample content.
#[derive(Parser, Debug)]
#[command(name = "seed")]
struct Args {
    /// Number of events to create
    #[arg(long, default_value_t = 6)]
    events: usize,

    /// Number of notices to create
    #[arg(long, default_value_t = 4)]
    notices: usize,

    /// Number of committee members to create
    #[arg(long, default_value_t = 5)]
    committee: usize,

    /// Number of industrial visits to create
    #[arg(long, default_value_t = 3)]
    visits: usize,

    /// Registration code handed to new admins
    #[arg(long, default_value = "CHAPTER-2025")]
    code: String,

    /// Superadmin email
    #[arg(long, default_value = "admin@chapterdesk.local")]
    admin_email: String,

    /// Superadmin password
    #[arg(long, default_value = "admin123")]
    admin_password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting seeding...");

    let settings = Settings::new().unwrap_or_else(|_| Settings::default());
    let store = store::from_config(&settings.store)?;
    let uploader = uploader::from_config(&settings.uploader)?;
    let identity = identity::from_config(&settings.identity)?;

    println!("🔑 Creating registration code and superadmin...");

    let code = RegistrationCode { code: args.code.clone() };
    store
        .insert(CODES_COLLECTION, to_fields(&code)?)
        .await?;

    let user = identity
        .sign_up(&args.admin_email, &args.admin_password)
        .await?;
    let admin = AdminAccount {
        uid: user.uid.clone(),
        email: user.email.clone(),
        role: AdminRole::Superadmin,
        approved_at: Some(DateValue::now()),
    };
    store
        .set(ADMINS_COLLECTION, &user.uid, to_fields(&admin)?)
        .await?;
    println!(
        "  ✅ Superadmin {} / {} (code {})",
        args.admin_email, args.admin_password, args.code
    );

    // Content goes through the same submit path the console uses, so
    // attachments get real uploader URLs.
    let events: ManagedCollection<Event> =
        ManagedCollection::new(Arc::clone(&store), Arc::clone(&uploader));
    let notices: ManagedCollection<Notice> =
        ManagedCollection::new(Arc::clone(&store), Arc::clone(&uploader));
    let committee: ManagedCollection<CommitteeMember> =
        ManagedCollection::new(Arc::clone(&store), Arc::clone(&uploader));
    let visits: ManagedCollection<Visit> =
        ManagedCollection::new(Arc::clone(&store), Arc::clone(&uploader));

    println!("📅 Creating {} events...", args.events);
    for i in 0..args.events {
        // Half upcoming, half past.
        let offset = if i % 2 == 0 { 14 + i as i64 } else { -(14 + i as i64) };
        let day = (Utc::now() + Duration::days(offset)).date_naive();
        let values = form([
            ("title", Sentence(3..6).fake::<String>()),
            ("type", pick(&["Workshop", "Seminar", "Guest Lecture", "Competition"], i)),
            ("date", day.to_string()),
            ("eventTime", "10:00".to_string()),
            ("venue", "Main Auditorium".to_string()),
            ("eligibility", "All members".to_string()),
            ("description", Paragraph(2..4).fake::<String>()),
            ("facultyInCharge", Name().fake::<String>()),
        ]);
        events.submit_create(&values, poster("poster.png")).await?;
    }

    println!("📌 Creating {} notices...", args.notices);
    for i in 0..args.notices {
        let day = (Utc::now() - Duration::days(i as i64)).date_naive();
        let values = form([
            ("title", Sentence(3..6).fake::<String>()),
            ("content", Paragraph(1..3).fake::<String>()),
            ("category", pick(&["General", "Event", "Academic"], i)),
            ("startDate", day.to_string()),
            ("endDate", (day + Duration::days(30)).to_string()),
        ]);
        let notice = notices.submit_create(&values, FileSet::new()).await?;
        if i == 0 {
            notices
                .toggle_field(&notice.id, "isPinned", serde_json::json!(true))
                .await?;
        }
    }

    println!("👥 Creating {} committee members...", args.committee);
    for i in 0..args.committee {
        let values = form([
            ("name", Name().fake::<String>()),
            (
                "role",
                pick(&["Chairperson", "Vice Chairperson", "Secretary", "Treasurer", "Editor"], i),
            ),
            ("contact", format!("member{}@chapterdesk.local", i)),
            ("tenure", "2025-2026".to_string()),
            ("priority", ((i + 1) * 10).to_string()),
        ]);
        committee
            .submit_create(&values, poster_slot("profilePic", "profile.png"))
            .await?;
    }

    println!("🏭 Creating {} industrial visits...", args.visits);
    for i in 0..args.visits {
        let offset = if i % 2 == 0 { 21 } else { -21 };
        let day = (Utc::now() + Duration::days(offset)).date_naive();
        let values = form([
            ("visitTitle", Sentence(3..5).fake::<String>()),
            ("industryName", CompanyName().fake::<String>()),
            ("dateOfVisit", day.to_string()),
            ("facultyIncharge", Name().fake::<String>()),
            ("eligibility", "Final-year members".to_string()),
        ]);
        let mut files = poster_slot("report", "report.pdf");
        files.insert(
            "photos".to_string(),
            vec![
                UploadFile::new("photo-1.jpg", vec![0u8; 256]),
                UploadFile::new("photo-2.jpg", vec![0u8; 256]),
            ],
        );
        visits.submit_create(&values, files).await?;
    }

    println!("✨ Seeding complete!");
    Ok(())
}

fn form<const N: usize>(pairs: [(&str, String); N]) -> FormValues {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect::<HashMap<_, _>>()
}

fn pick(options: &[&str], i: usize) -> String {
    options[i % options.len()].to_string()
}

fn poster(filename: &str) -> FileSet {
    poster_slot("poster", filename)
}

fn poster_slot(slot: &str, filename: &str) -> FileSet {
    let mut files = FileSet::new();
    files.insert(
        slot.to_string(),
        vec![UploadFile::new(filename, vec![0u8; 512])],
    );
    files
}

fn to_fields<T: serde::Serialize>(value: &T) -> anyhow::Result<Fields> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => anyhow::bail!("expected object, got {}", other),
    }
}
