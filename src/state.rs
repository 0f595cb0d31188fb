use std::sync::Arc;

use crate::db::content_store::ContentStore;
use crate::db::like_repository::LikeRepository;
use crate::db::note_repository::NoteRepository;

/// Shared server state behind every API handler.
#[derive(Clone)]
pub struct AppState {
    pub content_store: Arc<dyn ContentStore>,
    pub notes: Arc<dyn NoteRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub session_secret: String,
    pub leptos_options: leptos::prelude::LeptosOptions,
}

impl axum::extract::FromRef<AppState> for leptos::prelude::LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}
