use async_trait::async_trait;

use crate::error::AppError;
use crate::models::note::Note;

/// Repository trait for user notes.
///
/// Cap enforcement and ownership checks live in the API layer; the
/// repository is plain storage.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn insert(&self, note: Note) -> Result<(), AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>, AppError>;

    /// Non-trashed notes for an owner, newest first.
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Note>, AppError>;

    /// Count of non-trashed notes, i.e. what the cap is measured against.
    async fn count_for_owner(&self, owner_id: &str) -> Result<usize, AppError>;

    async fn update_content(
        &self,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<(), AppError>;

    /// Move a note to trash. Trashed notes stop counting against the cap.
    async fn trash(&self, id: &str) -> Result<(), AppError>;
}

#[cfg(feature = "ssr")]
pub struct MongoNoteRepository {
    collection: mongodb::Collection<Note>,
}

#[cfg(feature = "ssr")]
impl MongoNoteRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("notes"),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl NoteRepository for MongoNoteRepository {
    async fn insert(&self, note: Note) -> Result<(), AppError> {
        self.collection
            .insert_one(note)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Note>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let filter = doc! {
            "owner_id": owner_id,
            "status": "private",
        };
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let mut cursor = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut notes = Vec::new();
        while let Some(note) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            notes.push(note);
        }
        Ok(notes)
    }

    async fn count_for_owner(&self, owner_id: &str) -> Result<usize, AppError> {
        use mongodb::bson::doc;

        let count = self
            .collection
            .count_documents(doc! { "owner_id": owner_id, "status": "private" })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(count as usize)
    }

    async fn update_content(
        &self,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<(), AppError> {
        use mongodb::bson::doc;

        self.collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": { "title": title, "content": content } },
            )
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn trash(&self, id: &str) -> Result<(), AppError> {
        use mongodb::bson::doc;

        self.collection
            .update_one(doc! { "id": id }, doc! { "$set": { "status": "trash" } })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
