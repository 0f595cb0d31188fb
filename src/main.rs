#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::routing::{get, post};
    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use quadrangle::app::App;
    use quadrangle::db::content_store::{ContentStore, MongoContentStore};
    use quadrangle::db::like_repository::{LikeRepository, MongoLikeRepository};
    use quadrangle::db::memory::{
        InMemoryContentStore, InMemoryLikeRepository, InMemoryNoteRepository,
    };
    use quadrangle::db::note_repository::{MongoNoteRepository, NoteRepository};
    use quadrangle::{api, auth};
    use std::sync::Arc;
    use tower_http::services::ServeDir;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quadrangle=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting Quadrangle server...");

    let app_config = quadrangle::config::AppConfig::load().expect("Failed to load configuration");

    // Leptos options come from Cargo.toml metadata
    let conf = get_configuration(None).unwrap();
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.to_string();

    let (content_store, notes, likes): (
        Arc<dyn ContentStore>,
        Arc<dyn NoteRepository>,
        Arc<dyn LikeRepository>,
    ) = if app_config.demo_mode {
        tracing::info!("Running in demo mode with in-memory stores");
        let store = Arc::new(InMemoryContentStore::new());
        quadrangle::demo_seeder::seed_demo_content(store.as_ref())
            .await
            .expect("Failed to seed demo content");
        (
            store,
            Arc::new(InMemoryNoteRepository::new()),
            Arc::new(InMemoryLikeRepository::new()),
        )
    } else {
        let mongo_client = mongodb::Client::with_uri_str(&app_config.mongodb_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let db = mongo_client.database(&app_config.mongodb_database);
        tracing::info!("Connected to MongoDB at {}", app_config.mongodb_uri);
        (
            Arc::new(MongoContentStore::new(&db)),
            Arc::new(MongoNoteRepository::new(&db)),
            Arc::new(MongoLikeRepository::new(&db)),
        )
    };

    let app_state = quadrangle::state::AppState {
        content_store,
        notes,
        likes,
        session_secret: app_config.session_secret.clone(),
        leptos_options: leptos_options.clone(),
    };

    let routes = generate_route_list(App);

    let app = Router::new()
        .route("/api/v1/search", get(api::search::search_handler))
        .route(
            "/api/v1/note",
            get(api::notes::list_notes_handler).post(api::notes::create_note_handler),
        )
        .route(
            "/api/v1/note/{id}",
            post(api::notes::update_note_handler).delete(api::notes::delete_note_handler),
        )
        .route(
            "/api/v1/manage-like",
            get(api::likes::like_status_handler)
                .post(api::likes::create_like_handler)
                .delete(api::likes::delete_like_handler),
        )
        .route(
            "/api/auth/session",
            get(auth::session::session_handler),
        )
        .route("/api/auth/login", post(auth::demo_auth::login_handler))
        .route("/api/auth/logout", post(auth::demo_auth::logout_handler))
        .leptos_routes(&app_state, routes, {
            move || quadrangle::app::App()
        })
        .fallback_service(ServeDir::new(&site_root))
        .with_state(app_state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}

// Client-side initialization lives in lib.rs::hydrate().
#[cfg(not(feature = "ssr"))]
fn main() {}
