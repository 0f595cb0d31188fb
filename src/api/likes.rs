use uuid::Uuid;

use crate::auth::models::AuthenticatedUser;
use crate::db::content_store::ContentStore;
use crate::db::like_repository::LikeRepository;
use crate::error::AppError;
use crate::models::content::EntityKind;
use crate::models::like::{
    Like, LikeCreateRequest, LikeCreateResponse, LikeDeleteRequest, LikeDeleteResponse,
    LikeStatus,
};

/// Core creation logic — separated from the HTTP layer for testability.
///
/// The referenced id must resolve to a professor record, and the
/// (owner, professor) pair must not already hold a like.
pub async fn process_create_like(
    likes: &dyn LikeRepository,
    content: &dyn ContentStore,
    user: &AuthenticatedUser,
    request: LikeCreateRequest,
) -> Result<LikeCreateResponse, AppError> {
    let record = content
        .find_by_id(&request.professor_id)
        .await?
        .filter(|r| r.kind == EntityKind::Professor)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No professor with id {}",
                request.professor_id
            ))
        })?;

    if likes
        .find_for_pair(&user.user_id, &record.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "You have already liked this professor".into(),
        ));
    }

    let like = Like {
        id: Uuid::new_v4().to_string(),
        owner_id: user.user_id.clone(),
        professor_id: record.id,
    };
    let id = like.id.clone();
    likes.insert(like).await?;

    Ok(LikeCreateResponse { id })
}

/// Deletion is permitted only to the like's owner.
pub async fn process_delete_like(
    likes: &dyn LikeRepository,
    user: &AuthenticatedUser,
    request: LikeDeleteRequest,
) -> Result<LikeDeleteResponse, AppError> {
    let like = likes
        .find_by_id(&request.like)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No like with id {}", request.like)))?;

    if like.owner_id != user.user_id {
        return Err(AppError::Forbidden(
            "You do not have permission to delete that".into(),
        ));
    }

    likes.delete(&like.id).await?;
    Ok(LikeDeleteResponse {
        message: "Like deleted".to_string(),
    })
}

/// Like state for one professor as seen by the (possibly anonymous)
/// viewer; renders the like box.
pub async fn process_like_status(
    likes: &dyn LikeRepository,
    viewer: Option<&AuthenticatedUser>,
    professor_id: &str,
) -> Result<LikeStatus, AppError> {
    let own = match viewer {
        Some(user) => likes.find_for_pair(&user.user_id, professor_id).await?,
        None => None,
    };

    Ok(LikeStatus {
        exists: own.is_some(),
        like_id: own.map(|l| l.id),
        like_count: likes.count_for_professor(professor_id).await?,
    })
}

// --- HTTP layer ---

#[cfg(feature = "ssr")]
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatusQuery {
    pub professor_id: String,
}

/// `GET /api/v1/manage-like?professorId=`
#[cfg(feature = "ssr")]
pub async fn like_status_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
    headers: axum::http::HeaderMap,
    axum::extract::Query(params): axum::extract::Query<LikeStatusQuery>,
) -> Result<axum::Json<LikeStatus>, AppError> {
    let session =
        crate::auth::session::verify_request(&jar, &headers, &state.session_secret)?;
    let status = process_like_status(
        state.likes.as_ref(),
        session.user.as_ref(),
        &params.professor_id,
    )
    .await?;
    Ok(axum::Json(status))
}

/// `POST /api/v1/manage-like`
#[cfg(feature = "ssr")]
pub async fn create_like_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
    headers: axum::http::HeaderMap,
    axum::Json(request): axum::Json<LikeCreateRequest>,
) -> Result<axum::Json<LikeCreateResponse>, AppError> {
    let session =
        crate::auth::session::verify_request(&jar, &headers, &state.session_secret)?;
    let user = session
        .user
        .ok_or_else(|| AppError::Auth("Only signed-in users can create a like".into()))?;

    let response = process_create_like(
        state.likes.as_ref(),
        state.content_store.as_ref(),
        &user,
        request,
    )
    .await?;
    Ok(axum::Json(response))
}

/// `DELETE /api/v1/manage-like`
#[cfg(feature = "ssr")]
pub async fn delete_like_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
    headers: axum::http::HeaderMap,
    axum::Json(request): axum::Json<LikeDeleteRequest>,
) -> Result<axum::Json<LikeDeleteResponse>, AppError> {
    let session =
        crate::auth::session::verify_request(&jar, &headers, &state.session_secret)?;
    let user = session
        .user
        .ok_or_else(|| AppError::Auth("Only signed-in users can delete a like".into()))?;

    let response = process_delete_like(state.likes.as_ref(), &user, request).await?;
    Ok(axum::Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{InMemoryContentStore, InMemoryLikeRepository};
    use crate::models::content::ContentRecord;

    fn user(id: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.into(),
            display_name: "Test User".into(),
        }
    }

    async fn store_with_professor(id: &str) -> InMemoryContentStore {
        let store = InMemoryContentStore::new();
        store
            .insert(ContentRecord {
                id: id.into(),
                kind: EntityKind::Professor,
                title: "Dr. Vivian Chen".into(),
                slug: "vivian-chen".into(),
                body: String::new(),
                excerpt: None,
                author_name: None,
                image_url: None,
                event_date: None,
                related_program_ids: vec![],
                related_campus_ids: vec![],
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn create_and_count() {
        let likes = InMemoryLikeRepository::new();
        let content = store_with_professor("prof-1").await;

        let response = process_create_like(
            &likes,
            &content,
            &user("u1"),
            LikeCreateRequest {
                professor_id: "prof-1".into(),
            },
        )
        .await
        .unwrap();
        assert!(!response.id.is_empty());
        assert_eq!(likes.count_for_professor("prof-1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn second_like_for_same_pair_is_rejected() {
        let likes = InMemoryLikeRepository::new();
        let content = store_with_professor("prof-1").await;
        let owner = user("u1");
        let request = LikeCreateRequest {
            professor_id: "prof-1".into(),
        };

        process_create_like(&likes, &content, &owner, request.clone())
            .await
            .unwrap();
        let second = process_create_like(&likes, &content, &owner, request).await;

        assert!(matches!(second, Err(AppError::Conflict(_))));
        assert_eq!(likes.count_for_professor("prof-1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn same_professor_different_owners_both_like() {
        let likes = InMemoryLikeRepository::new();
        let content = store_with_professor("prof-1").await;
        let request = LikeCreateRequest {
            professor_id: "prof-1".into(),
        };

        process_create_like(&likes, &content, &user("u1"), request.clone())
            .await
            .unwrap();
        process_create_like(&likes, &content, &user("u2"), request)
            .await
            .unwrap();
        assert_eq!(likes.count_for_professor("prof-1").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn liking_a_non_professor_record_is_not_found() {
        let likes = InMemoryLikeRepository::new();
        let content = InMemoryContentStore::new();
        content
            .insert(ContentRecord {
                id: "prog-1".into(),
                kind: EntityKind::Program,
                title: "Biology".into(),
                slug: "biology".into(),
                body: String::new(),
                excerpt: None,
                author_name: None,
                image_url: None,
                event_date: None,
                related_program_ids: vec![],
                related_campus_ids: vec![],
            })
            .await
            .unwrap();

        let result = process_create_like(
            &likes,
            &content,
            &user("u1"),
            LikeCreateRequest {
                professor_id: "prog-1".into(),
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_forbidden_and_like_remains() {
        let likes = InMemoryLikeRepository::new();
        let content = store_with_professor("prof-1").await;
        let created = process_create_like(
            &likes,
            &content,
            &user("u1"),
            LikeCreateRequest {
                professor_id: "prof-1".into(),
            },
        )
        .await
        .unwrap();

        let result = process_delete_like(
            &likes,
            &user("u2"),
            LikeDeleteRequest {
                like: created.id.clone(),
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(likes.find_by_id(&created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn owner_can_delete_own_like() {
        let likes = InMemoryLikeRepository::new();
        let content = store_with_professor("prof-1").await;
        let owner = user("u1");
        let created = process_create_like(
            &likes,
            &content,
            &owner,
            LikeCreateRequest {
                professor_id: "prof-1".into(),
            },
        )
        .await
        .unwrap();

        process_delete_like(&likes, &owner, LikeDeleteRequest { like: created.id })
            .await
            .unwrap();
        assert_eq!(likes.count_for_professor("prof-1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn status_reflects_viewer_and_totals() {
        let likes = InMemoryLikeRepository::new();
        let content = store_with_professor("prof-1").await;
        let owner = user("u1");
        let created = process_create_like(
            &likes,
            &content,
            &owner,
            LikeCreateRequest {
                professor_id: "prof-1".into(),
            },
        )
        .await
        .unwrap();

        let own = process_like_status(&likes, Some(&owner), "prof-1")
            .await
            .unwrap();
        assert!(own.exists);
        assert_eq!(own.like_id.as_deref(), Some(created.id.as_str()));
        assert_eq!(own.like_count, 1);

        let anonymous = process_like_status(&likes, None, "prof-1").await.unwrap();
        assert!(!anonymous.exists);
        assert!(anonymous.like_id.is_none());
        assert_eq!(anonymous.like_count, 1);
    }
}
