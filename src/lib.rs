pub mod app;
pub mod error;
pub mod models {
    pub mod content;
    pub mod like;
    pub mod note;
    pub mod search;
}
pub mod db {
    pub mod content_store;
    pub mod like_repository;
    pub mod memory;
    pub mod note_repository;
}
pub mod search {
    pub mod aggregator;
}
pub mod rendering {
    pub mod excerpt;
}
pub mod auth {
    pub mod demo_auth;
    pub mod models;
    pub mod session;
}
pub mod api {
    pub mod errors;
    pub mod likes;
    pub mod notes;
    pub mod search;
}
pub mod components {
    pub mod campus_map;
    pub mod hero_slider;
    pub mod like_box;
    pub mod mobile_menu;
    pub mod notes_panel;
    pub mod search_overlay;
    pub mod session;
}

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod demo_seeder;
#[cfg(feature = "ssr")]
pub mod state;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
