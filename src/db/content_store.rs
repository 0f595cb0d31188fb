use async_trait::async_trait;

use crate::error::AppError;
use crate::models::content::{ContentRecord, EntityKind, RelationField};

/// Query interface over the system of record for site content.
///
/// The aggregator and page handlers only ever read; `insert` exists for
/// seeding and editorial tooling. The trait allows swapping MongoDB for
/// the in-memory store in tests and demo mode.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn insert(&self, record: ContentRecord) -> Result<(), AppError>;

    /// Free-text match (title or body, case-insensitive) across the given
    /// kinds. An empty needle falls through to the store's default
    /// matching, which is match-all.
    async fn query_by_kind(
        &self,
        kinds: &[EntityKind],
        text_match: &str,
    ) -> Result<Vec<ContentRecord>, AppError>;

    /// Records of the given kinds whose relation field references ANY of
    /// the supplied ids.
    async fn query_by_relation(
        &self,
        kinds: &[EntityKind],
        field: RelationField,
        match_any_of: &[String],
    ) -> Result<Vec<ContentRecord>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<ContentRecord>, AppError>;

    /// Batch lookup. Order of the result is store-defined; callers that
    /// care reorder by the requested ids.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<ContentRecord>, AppError>;
}

/// MongoDB implementation, backed by a single `content` collection.
#[cfg(feature = "ssr")]
pub struct MongoContentStore {
    collection: mongodb::Collection<ContentRecord>,
}

#[cfg(feature = "ssr")]
impl MongoContentStore {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("content"),
        }
    }

    async fn drain(
        &self,
        filter: mongodb::bson::Document,
    ) -> Result<Vec<ContentRecord>, AppError> {
        use futures::TryStreamExt;

        let mut cursor = self
            .collection
            .find(filter)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(record) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            records.push(record);
        }
        Ok(records)
    }
}

/// Escape regex metacharacters so the search term matches literally.
#[cfg(feature = "ssr")]
fn escape_regex(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if "\\.+*?()|[]{}^$".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(feature = "ssr")]
fn kind_names(kinds: &[EntityKind]) -> Vec<String> {
    kinds.iter().map(|k| k.to_string()).collect()
}

#[cfg(feature = "ssr")]
#[async_trait]
impl ContentStore for MongoContentStore {
    async fn insert(&self, record: ContentRecord) -> Result<(), AppError> {
        self.collection
            .insert_one(record)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn query_by_kind(
        &self,
        kinds: &[EntityKind],
        text_match: &str,
    ) -> Result<Vec<ContentRecord>, AppError> {
        use mongodb::bson::doc;

        let pattern = escape_regex(text_match);
        let filter = doc! {
            "kind": { "$in": kind_names(kinds) },
            "$or": [
                { "title": { "$regex": &pattern, "$options": "i" } },
                { "body": { "$regex": &pattern, "$options": "i" } },
            ],
        };
        self.drain(filter).await
    }

    async fn query_by_relation(
        &self,
        kinds: &[EntityKind],
        field: RelationField,
        match_any_of: &[String],
    ) -> Result<Vec<ContentRecord>, AppError> {
        use mongodb::bson::doc;

        let filter = doc! {
            "kind": { "$in": kind_names(kinds) },
            field.field_name(): { "$in": match_any_of },
        };
        self.drain(filter).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ContentRecord>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<ContentRecord>, AppError> {
        use mongodb::bson::doc;

        self.drain(doc! { "id": { "$in": ids } }).await
    }
}
