//! In-memory store implementations backing demo mode and the test suite.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::db::content_store::ContentStore;
use crate::db::like_repository::LikeRepository;
use crate::db::note_repository::NoteRepository;
use crate::error::AppError;
use crate::models::content::{ContentRecord, EntityKind, RelationField};
use crate::models::like::Like;
use crate::models::note::{Note, NoteStatus};

#[derive(Default)]
pub struct InMemoryContentStore {
    records: Mutex<Vec<ContentRecord>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn text_matches(record: &ContentRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    record.title.to_lowercase().contains(&needle)
        || record.body.to_lowercase().contains(&needle)
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn insert(&self, record: ContentRecord) -> Result<(), AppError> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    async fn query_by_kind(
        &self,
        kinds: &[EntityKind],
        text_match: &str,
    ) -> Result<Vec<ContentRecord>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| kinds.contains(&r.kind) && text_matches(r, text_match))
            .cloned()
            .collect())
    }

    async fn query_by_relation(
        &self,
        kinds: &[EntityKind],
        field: RelationField,
        match_any_of: &[String],
    ) -> Result<Vec<ContentRecord>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                let refs = match field {
                    RelationField::RelatedPrograms => &r.related_program_ids,
                    RelationField::RelatedCampuses => &r.related_campus_ids,
                };
                kinds.contains(&r.kind) && refs.iter().any(|id| match_any_of.contains(id))
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ContentRecord>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<ContentRecord>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: Mutex<Vec<Note>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn insert(&self, note: Note) -> Result<(), AppError> {
        self.notes.lock().unwrap().push(note);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>, AppError> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Note>, AppError> {
        let mut notes: Vec<Note> = self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.owner_id == owner_id && n.status == NoteStatus::Private)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn count_for_owner(&self, owner_id: &str) -> Result<usize, AppError> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.owner_id == owner_id && n.status == NoteStatus::Private)
            .count())
    }

    async fn update_content(
        &self,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<(), AppError> {
        let mut notes = self.notes.lock().unwrap();
        if let Some(note) = notes.iter_mut().find(|n| n.id == id) {
            note.title = title.to_string();
            note.content = content.to_string();
        }
        Ok(())
    }

    async fn trash(&self, id: &str) -> Result<(), AppError> {
        let mut notes = self.notes.lock().unwrap();
        if let Some(note) = notes.iter_mut().find(|n| n.id == id) {
            note.status = NoteStatus::Trash;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryLikeRepository {
    likes: Mutex<Vec<Like>>,
}

impl InMemoryLikeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn insert(&self, like: Like) -> Result<(), AppError> {
        self.likes.lock().unwrap().push(like);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Like>, AppError> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn find_for_pair(
        &self,
        owner_id: &str,
        professor_id: &str,
    ) -> Result<Option<Like>, AppError> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.owner_id == owner_id && l.professor_id == professor_id)
            .cloned())
    }

    async fn count_for_professor(&self, professor_id: &str) -> Result<u64, AppError> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.professor_id == professor_id)
            .count() as u64)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.likes.lock().unwrap().retain(|l| l.id != id);
        Ok(())
    }
}
