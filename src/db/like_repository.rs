use async_trait::async_trait;

use crate::error::AppError;
use crate::models::like::Like;

/// Repository trait for professor likes.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn insert(&self, like: Like) -> Result<(), AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Like>, AppError>;

    /// The like for one (owner, professor) pair, if any. The API layer
    /// uses this to keep the pair unique.
    async fn find_for_pair(
        &self,
        owner_id: &str,
        professor_id: &str,
    ) -> Result<Option<Like>, AppError>;

    async fn count_for_professor(&self, professor_id: &str) -> Result<u64, AppError>;

    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[cfg(feature = "ssr")]
pub struct MongoLikeRepository {
    collection: mongodb::Collection<Like>,
}

#[cfg(feature = "ssr")]
impl MongoLikeRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("likes"),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl LikeRepository for MongoLikeRepository {
    async fn insert(&self, like: Like) -> Result<(), AppError> {
        self.collection
            .insert_one(like)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Like>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_for_pair(
        &self,
        owner_id: &str,
        professor_id: &str,
    ) -> Result<Option<Like>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "owner_id": owner_id, "professor_id": professor_id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn count_for_professor(&self, professor_id: &str) -> Result<u64, AppError> {
        use mongodb::bson::doc;

        self.collection
            .count_documents(doc! { "professor_id": professor_id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        use mongodb::bson::doc;

        self.collection
            .delete_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
