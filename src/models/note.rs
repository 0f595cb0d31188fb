use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many non-trashed notes a single owner may hold.
pub const NOTE_LIMIT: usize = 5;

/// Message shown when the cap is hit; also the body of the
/// `limit_exceeded` error.
pub const NOTE_LIMIT_MESSAGE: &str = "You have reached your note limit.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
    /// The only status a live note can have; never publicly visible.
    Private,
    /// Deleted notes are trashed, not destroyed, and stop counting
    /// against the owner's cap.
    Trash,
}

/// A user-owned private document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub owner_id: String,
    pub status: NoteStatus,
    pub created_at: DateTime<Utc>,
}

/// Wire representation returned by the note endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePayload {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl From<&Note> for NotePayload {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }
}

/// Body of `POST /api/v1/note` and `POST /api/v1/note/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRequest {
    pub title: String,
    pub content: String,
}

/// Body of a successful `DELETE /api/v1/note/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDeleteResponse {
    /// Non-trashed notes the owner still holds; the client clears its
    /// limit message when this drops below the cap.
    pub user_note_count: usize,
}
