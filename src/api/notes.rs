use chrono::Utc;
use uuid::Uuid;

use crate::auth::models::AuthenticatedUser;
use crate::db::note_repository::NoteRepository;
use crate::error::AppError;
use crate::models::note::{
    Note, NoteDeleteResponse, NotePayload, NoteRequest, NoteStatus, NOTE_LIMIT,
    NOTE_LIMIT_MESSAGE,
};

/// Strip markup from user-supplied note fields before they are stored.
fn sanitize(input: &str) -> String {
    ammonia::Builder::empty().clean(input).to_string()
}

/// Core creation logic — separated from the HTTP layer for testability.
///
/// Enforces the per-owner cap: an owner holding `NOTE_LIMIT` non-trashed
/// notes gets a limit error and nothing is persisted.
pub async fn process_create_note(
    repo: &dyn NoteRepository,
    user: &AuthenticatedUser,
    request: NoteRequest,
) -> Result<NotePayload, AppError> {
    if request.title.trim().is_empty() && request.content.trim().is_empty() {
        return Err(AppError::Validation("Note is empty".into()));
    }

    if repo.count_for_owner(&user.user_id).await? >= NOTE_LIMIT {
        return Err(AppError::LimitExceeded(NOTE_LIMIT_MESSAGE.into()));
    }

    let note = Note {
        id: Uuid::new_v4().to_string(),
        title: sanitize(&request.title),
        content: sanitize(&request.content),
        owner_id: user.user_id.clone(),
        status: NoteStatus::Private,
        created_at: Utc::now(),
    };
    let payload = NotePayload::from(&note);
    repo.insert(note).await?;
    Ok(payload)
}

/// Fetch a note and require the caller to own it.
async fn owned_note(
    repo: &dyn NoteRepository,
    user: &AuthenticatedUser,
    note_id: &str,
) -> Result<Note, AppError> {
    let note = repo
        .find_by_id(note_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No note with id {note_id}")))?;

    if note.owner_id != user.user_id {
        return Err(AppError::Forbidden(
            "You do not have permission to modify that note".into(),
        ));
    }
    Ok(note)
}

pub async fn process_update_note(
    repo: &dyn NoteRepository,
    user: &AuthenticatedUser,
    note_id: &str,
    request: NoteRequest,
) -> Result<NotePayload, AppError> {
    let note = owned_note(repo, user, note_id).await?;

    let title = sanitize(&request.title);
    let content = sanitize(&request.content);
    repo.update_content(&note.id, &title, &content).await?;

    Ok(NotePayload {
        id: note.id,
        title,
        content,
    })
}

/// Trash (not destroy) the note, and report how many live notes the
/// owner still holds so the client can clear its limit message.
pub async fn process_delete_note(
    repo: &dyn NoteRepository,
    user: &AuthenticatedUser,
    note_id: &str,
) -> Result<NoteDeleteResponse, AppError> {
    let note = owned_note(repo, user, note_id).await?;
    repo.trash(&note.id).await?;

    Ok(NoteDeleteResponse {
        user_note_count: repo.count_for_owner(&user.user_id).await?,
    })
}

pub async fn process_list_notes(
    repo: &dyn NoteRepository,
    user: &AuthenticatedUser,
) -> Result<Vec<NotePayload>, AppError> {
    let notes = repo.list_for_owner(&user.user_id).await?;
    Ok(notes.iter().map(NotePayload::from).collect())
}

// --- HTTP layer ---

/// Verify the anti-forgery token and require a signed-in user.
#[cfg(feature = "ssr")]
fn require_user(
    state: &crate::state::AppState,
    jar: &axum_extra::extract::CookieJar,
    headers: &axum::http::HeaderMap,
) -> Result<AuthenticatedUser, AppError> {
    let session = crate::auth::session::verify_request(jar, headers, &state.session_secret)?;
    session
        .user
        .ok_or_else(|| AppError::Auth("Only signed-in users can manage notes".into()))
}

/// `GET /api/v1/note`
#[cfg(feature = "ssr")]
pub async fn list_notes_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
    headers: axum::http::HeaderMap,
) -> Result<axum::Json<Vec<NotePayload>>, AppError> {
    let user = require_user(&state, &jar, &headers)?;
    let notes = process_list_notes(state.notes.as_ref(), &user).await?;
    Ok(axum::Json(notes))
}

/// `POST /api/v1/note`
#[cfg(feature = "ssr")]
pub async fn create_note_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
    headers: axum::http::HeaderMap,
    axum::Json(request): axum::Json<NoteRequest>,
) -> Result<axum::Json<NotePayload>, AppError> {
    let user = require_user(&state, &jar, &headers)?;
    let payload = process_create_note(state.notes.as_ref(), &user, request).await?;
    Ok(axum::Json(payload))
}

/// `POST /api/v1/note/{id}`
#[cfg(feature = "ssr")]
pub async fn update_note_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Path(id): axum::extract::Path<String>,
    jar: axum_extra::extract::CookieJar,
    headers: axum::http::HeaderMap,
    axum::Json(request): axum::Json<NoteRequest>,
) -> Result<axum::Json<NotePayload>, AppError> {
    let user = require_user(&state, &jar, &headers)?;
    let payload = process_update_note(state.notes.as_ref(), &user, &id, request).await?;
    Ok(axum::Json(payload))
}

/// `DELETE /api/v1/note/{id}`
#[cfg(feature = "ssr")]
pub async fn delete_note_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    axum::extract::Path(id): axum::extract::Path<String>,
    jar: axum_extra::extract::CookieJar,
    headers: axum::http::HeaderMap,
) -> Result<axum::Json<NoteDeleteResponse>, AppError> {
    let user = require_user(&state, &jar, &headers)?;
    let response = process_delete_note(state.notes.as_ref(), &user, &id).await?;
    Ok(axum::Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::InMemoryNoteRepository;

    fn user(id: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.into(),
            display_name: "Test User".into(),
        }
    }

    fn request(title: &str, content: &str) -> NoteRequest {
        NoteRequest {
            title: title.into(),
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn create_returns_client_payload() {
        let repo = InMemoryNoteRepository::new();
        let payload = process_create_note(&repo, &user("u1"), request("Errands", "Buy books"))
            .await
            .unwrap();
        assert_eq!(payload.title, "Errands");
        assert_eq!(repo.count_for_owner("u1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_sanitizes_markup() {
        let repo = InMemoryNoteRepository::new();
        let payload = process_create_note(
            &repo,
            &user("u1"),
            request("<b>Plans</b>", "meet <script>alert(1)</script> at noon"),
        )
        .await
        .unwrap();
        assert_eq!(payload.title, "Plans");
        assert!(!payload.content.contains("script"));
        assert!(payload.content.contains("at noon"));
    }

    #[tokio::test]
    async fn sixth_note_is_rejected_and_not_persisted() {
        let repo = InMemoryNoteRepository::new();
        let owner = user("u1");
        for i in 0..NOTE_LIMIT {
            process_create_note(&repo, &owner, request(&format!("n{i}"), "body"))
                .await
                .unwrap();
        }

        let result = process_create_note(&repo, &owner, request("n6", "body")).await;
        match result {
            Err(AppError::LimitExceeded(msg)) => assert_eq!(msg, NOTE_LIMIT_MESSAGE),
            other => panic!("Expected LimitExceeded, got {other:?}"),
        }
        assert_eq!(repo.count_for_owner("u1").await.unwrap(), NOTE_LIMIT);
    }

    #[tokio::test]
    async fn cap_is_per_owner() {
        let repo = InMemoryNoteRepository::new();
        for i in 0..NOTE_LIMIT {
            process_create_note(&repo, &user("u1"), request(&format!("n{i}"), "b"))
                .await
                .unwrap();
        }
        // A different owner is unaffected.
        assert!(process_create_note(&repo, &user("u2"), request("n", "b"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn trashing_frees_capacity_and_reports_count() {
        let repo = InMemoryNoteRepository::new();
        let owner = user("u1");
        let mut last_id = String::new();
        for i in 0..NOTE_LIMIT {
            let payload = process_create_note(&repo, &owner, request(&format!("n{i}"), "b"))
                .await
                .unwrap();
            last_id = payload.id;
        }

        let response = process_delete_note(&repo, &owner, &last_id).await.unwrap();
        assert_eq!(response.user_note_count, NOTE_LIMIT - 1);

        // Capacity is available again.
        assert!(process_create_note(&repo, &owner, request("again", "b"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn update_rewrites_fields_and_keeps_ownership() {
        let repo = InMemoryNoteRepository::new();
        let owner = user("u1");
        let created = process_create_note(&repo, &owner, request("Old", "old body"))
            .await
            .unwrap();

        let updated = process_update_note(
            &repo,
            &owner,
            &created.id,
            request("New", "new <i>body</i>"),
        )
        .await
        .unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.content, "new body");

        let stored = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.owner_id, "u1");
        assert_eq!(stored.status, NoteStatus::Private);
    }

    #[tokio::test]
    async fn foreign_note_cannot_be_updated_or_deleted() {
        let repo = InMemoryNoteRepository::new();
        let created = process_create_note(&repo, &user("u1"), request("Mine", "b"))
            .await
            .unwrap();

        let intruder = user("u2");
        assert!(matches!(
            process_update_note(&repo, &intruder, &created.id, request("x", "y")).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            process_delete_note(&repo, &intruder, &created.id).await,
            Err(AppError::Forbidden(_))
        ));
        // Note is untouched.
        let stored = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Mine");
        assert_eq!(stored.status, NoteStatus::Private);
    }

    #[tokio::test]
    async fn missing_note_is_not_found() {
        let repo = InMemoryNoteRepository::new();
        assert!(matches!(
            process_delete_note(&repo, &user("u1"), "no-such-id").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_returns_only_live_notes_newest_first() {
        let repo = InMemoryNoteRepository::new();
        let owner = user("u1");
        let first = process_create_note(&repo, &owner, request("first", "b"))
            .await
            .unwrap();
        let second = process_create_note(&repo, &owner, request("second", "b"))
            .await
            .unwrap();
        process_delete_note(&repo, &owner, &first.id).await.unwrap();

        let notes = process_list_notes(&repo, &owner).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, second.id);
    }

    #[tokio::test]
    async fn blank_note_is_invalid() {
        let repo = InMemoryNoteRepository::new();
        assert!(matches!(
            process_create_note(&repo, &user("u1"), request("  ", "")).await,
            Err(AppError::Validation(_))
        ));
    }
}
