use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::store::{value, Direction, Document, DocumentStore, Fields, Query, CREATED_AT};

/// In-process document store used for local development, seeding, and
/// tests. Mirrors the remote store's contract exactly, including
/// server-assigned ids and `createdAt` stamps on insert.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, HashMap<String, Fields>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_filter(fields: &Fields, filter: &Option<(String, serde_json::Value)>) -> bool {
    match filter {
        Some((field, expected)) => fields.get(field) == Some(expected),
        None => true,
    }
}

/// Field comparison for order-by: numbers numerically, date-shaped values
/// as instants, everything else as strings. Missing fields sort last.
fn compare_field(a: Option<&serde_json::Value>, b: Option<&serde_json::Value>) -> Ordering {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => return Ordering::Equal,
    };

    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    if let (Some(x), Some(y)) = (value::parse_instant(a), value::parse_instant(b)) {
        return x.cmp(&y);
    }
    a.to_string().cmp(&b.to_string())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document { id: id.to_string(), fields: fields.clone() }))
    }

    async fn list(&self, collection: &str, query: Query) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        let mut documents: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, fields)| matches_filter(fields, &query.filter))
                    .map(|(id, fields)| Document { id: id.clone(), fields: fields.clone() })
                    .collect()
            })
            .unwrap_or_default();

        if let Some((field, direction)) = &query.order_by {
            documents.sort_by(|a, b| {
                let ord = compare_field(a.fields.get(field), b.fields.get(field));
                match direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }

        Ok(documents)
    }

    async fn insert(&self, collection: &str, mut fields: Fields) -> Result<Document> {
        let id = Uuid::new_v4().to_string();
        fields.insert(
            CREATED_AT.to_string(),
            serde_json::Value::String(Utc::now().to_rfc3339()),
        );

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields.clone());

        Ok(Document { id, fields })
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<Document> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        let merged = docs.entry(id.to_string()).or_default();
        for (key, val) in fields {
            merged.insert(key, val);
        }
        Ok(Document { id: id.to_string(), fields: merged.clone() })
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<Document> {
        use crate::error::AppError;

        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| AppError::NotFound(format!("{}/{}", collection, id)))?;

        for (key, val) in fields {
            existing.insert(key, val);
        }
        Ok(Document { id: id.to_string(), fields: existing.clone() })
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, serde_json::Value)]) -> Fields {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[tokio::test]
    async fn insert_assigns_id_and_created_at() {
        let store = MemoryDocumentStore::new();
        let doc = store
            .insert("notices", fields(&[("title", json!("Hello"))]))
            .await
            .unwrap();
        assert!(!doc.id.is_empty());
        assert!(doc.fields.contains_key(CREATED_AT));
    }

    #[tokio::test]
    async fn filter_and_order() {
        let store = MemoryDocumentStore::new();
        for (name, priority, status) in [("c", 30, "Active"), ("a", 10, "Active"), ("b", 20, "Past Committee")] {
            store
                .insert(
                    "committee",
                    fields(&[
                        ("name", json!(name)),
                        ("priority", json!(priority)),
                        ("status", json!(status)),
                    ]),
                )
                .await
                .unwrap();
        }

        let active = store
            .list(
                "committee",
                Query::all()
                    .filter("status", "Active")
                    .order_by("priority", Direction::Asc),
            )
            .await
            .unwrap();
        let names: Vec<_> = active.iter().map(|d| d.fields["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn update_is_partial_merge() {
        let store = MemoryDocumentStore::new();
        let doc = store
            .insert("reports", fields(&[("title", json!("Annual")), ("status", json!("Active"))]))
            .await
            .unwrap();

        let updated = store
            .update("reports", &doc.id, fields(&[("status", json!("Archived"))]))
            .await
            .unwrap();
        assert_eq!(updated.fields["title"], json!("Annual"));
        assert_eq!(updated.fields["status"], json!("Archived"));
    }

    #[tokio::test]
    async fn update_unknown_id_fails() {
        let store = MemoryDocumentStore::new();
        assert!(store.update("reports", "nope", Fields::new()).await.is_err());
    }
}
