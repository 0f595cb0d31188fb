use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use quadrangle::auth::session::NONCE_HEADER;
use quadrangle::db::content_store::ContentStore;
use quadrangle::db::like_repository::LikeRepository;
use quadrangle::db::memory::{
    InMemoryContentStore, InMemoryLikeRepository, InMemoryNoteRepository,
};
use quadrangle::db::note_repository::NoteRepository;
use quadrangle::state::AppState;

/// In-memory application wired exactly like the production router's
/// API surface, minus SSR page rendering.
pub struct TestEnv {
    pub content_store: Arc<InMemoryContentStore>,
    pub router: Router,
}

impl TestEnv {
    pub fn start() -> Self {
        let content_store = Arc::new(InMemoryContentStore::new());
        let notes = Arc::new(InMemoryNoteRepository::new());
        let likes = Arc::new(InMemoryLikeRepository::new());

        let leptos_options = leptos::prelude::LeptosOptions::builder()
            .output_name("quadrangle")
            .build();

        let app_state = AppState {
            content_store: content_store.clone() as Arc<dyn ContentStore>,
            notes: notes as Arc<dyn NoteRepository>,
            likes: likes as Arc<dyn LikeRepository>,
            session_secret: "test-secret".to_string(),
            leptos_options,
        };

        let router = Router::new()
            .route(
                "/api/v1/search",
                get(quadrangle::api::search::search_handler),
            )
            .route(
                "/api/v1/note",
                get(quadrangle::api::notes::list_notes_handler)
                    .post(quadrangle::api::notes::create_note_handler),
            )
            .route(
                "/api/v1/note/{id}",
                post(quadrangle::api::notes::update_note_handler)
                    .delete(quadrangle::api::notes::delete_note_handler),
            )
            .route(
                "/api/v1/manage-like",
                get(quadrangle::api::likes::like_status_handler)
                    .post(quadrangle::api::likes::create_like_handler)
                    .delete(quadrangle::api::likes::delete_like_handler),
            )
            .route(
                "/api/auth/session",
                get(quadrangle::auth::session::session_handler),
            )
            .route(
                "/api/auth/login",
                post(quadrangle::auth::demo_auth::login_handler),
            )
            .route(
                "/api/auth/logout",
                post(quadrangle::auth::demo_auth::logout_handler),
            )
            .with_state(app_state);

        Self {
            content_store,
            router,
        }
    }

    /// `TestServer` with cookie persistence, failing on error statuses.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// `TestServer` that tolerates error statuses (for rejection tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .build(self.router.clone())
    }

    /// Startup handshake: mints the session cookie and returns the
    /// nonce the server expects on subsequent calls.
    pub async fn handshake(&self, server: &axum_test::TestServer) -> String {
        let response = server.get("/api/auth/session").await;
        let body: serde_json::Value = response.json();
        body["nonce"]
            .as_str()
            .expect("session handshake should return a nonce")
            .to_string()
    }

    /// Demo login; returns the rotated nonce for the signed-in session.
    pub async fn login(
        &self,
        server: &axum_test::TestServer,
        nonce: &str,
        username: &str,
    ) -> String {
        let response = server
            .post("/api/auth/login")
            .add_header(NONCE_HEADER, nonce)
            .json(&serde_json::json!({
                "username": username,
                "password": username,
            }))
            .await;
        let body: serde_json::Value = response.json();
        body["nonce"]
            .as_str()
            .expect("login should return a fresh nonce")
            .to_string()
    }

    /// Handshake plus login as the `student` demo account.
    pub async fn login_student(&self, server: &axum_test::TestServer) -> String {
        let nonce = self.handshake(server).await;
        self.login(server, &nonce, "student").await
    }

    pub async fn seed_demo_content(&self) {
        quadrangle::demo_seeder::seed_demo_content(self.content_store.as_ref())
            .await
            .expect("demo seeding should succeed");
    }
}
