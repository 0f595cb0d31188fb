use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::session::NONCE_HEADER;
use crate::components::session::use_session;
use crate::models::like::{LikeCreateRequest, LikeCreateResponse, LikeDeleteRequest, LikeStatus};

/// What a toggle press should send to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeAction {
    Create,
    Delete { like_id: String },
}

/// Like-box state machine. The displayed state flips only after the
/// server confirms, so a failed request leaves the box as it was.
#[derive(Debug, Clone, Default)]
pub struct LikeModel {
    loaded: bool,
    like_id: Option<String>,
    count: u64,
    pending: bool,
}

impl LikeModel {
    pub fn loaded(&mut self, status: LikeStatus) {
        self.loaded = true;
        self.like_id = status.like_id.filter(|_| status.exists);
        self.count = status.like_count;
    }

    pub fn is_liked(&self) -> bool {
        self.like_id.is_some()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns the action to issue, or `None` when a press must be
    /// ignored (state not yet loaded, or a request already in flight).
    pub fn toggle_requested(&mut self) -> Option<LikeAction> {
        if !self.loaded || self.pending {
            return None;
        }
        self.pending = true;
        match &self.like_id {
            Some(id) => Some(LikeAction::Delete {
                like_id: id.clone(),
            }),
            None => Some(LikeAction::Create),
        }
    }

    pub fn create_confirmed(&mut self, like_id: String) {
        self.like_id = Some(like_id);
        self.count += 1;
        self.pending = false;
    }

    pub fn delete_confirmed(&mut self) {
        self.like_id = None;
        self.count = self.count.saturating_sub(1);
        self.pending = false;
    }

    pub fn request_failed(&mut self) {
        self.pending = false;
    }
}

async fn fetch_status(professor_id: &str, nonce: &str) -> Result<Option<LikeStatus>, String> {
    if nonce.is_empty() {
        // Session handshake not finished yet; the resource reruns once
        // the nonce lands.
        return Ok(None);
    }
    let response = reqwest::Client::new()
        .get("/api/v1/manage-like")
        .query(&[("professorId", professor_id)])
        .header(NONCE_HEADER, nonce)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("could not load likes ({})", response.status()));
    }
    response
        .json::<LikeStatus>()
        .await
        .map(Some)
        .map_err(|e| e.to_string())
}

/// Heart button plus count for one professor.
#[component]
pub fn LikeBox(professor_id: String) -> impl IntoView {
    let session = use_session();
    let model = RwSignal::new(LikeModel::default());
    let error = RwSignal::new(None::<String>);

    let status = LocalResource::new({
        let professor_id = professor_id.clone();
        move || {
            let nonce = session.nonce();
            let professor_id = professor_id.clone();
            async move { fetch_status(&professor_id, &nonce).await }
        }
    });

    Effect::new(move |_| {
        if let Some(loaded) = status.get() {
            match &loaded {
                Ok(Some(s)) => {
                    let s = s.clone();
                    model.update(|m| m.loaded(s));
                }
                Ok(None) => {}
                Err(e) => error.set(Some(e.clone())),
            }
        }
    });

    let toggle = move |_| {
        if !session.authenticated() {
            error.set(Some("Sign in to like professors.".to_string()));
            return;
        }
        let mut action = None;
        model.update(|m| action = m.toggle_requested());
        let Some(action) = action else {
            return;
        };
        let nonce = session.nonce();
        let professor_id = professor_id.clone();
        spawn_local(async move {
            match action {
                LikeAction::Create => {
                    let result = reqwest::Client::new()
                        .post("/api/v1/manage-like")
                        .header(NONCE_HEADER, nonce)
                        .json(&LikeCreateRequest { professor_id })
                        .send()
                        .await;
                    match result {
                        Ok(response) if response.status().is_success() => {
                            match response.json::<LikeCreateResponse>().await {
                                Ok(body) => {
                                    error.set(None);
                                    model.update(|m| m.create_confirmed(body.id));
                                }
                                Err(err) => {
                                    model.update(|m| m.request_failed());
                                    error.set(Some(err.to_string()));
                                }
                            }
                        }
                        Ok(response) => {
                            model.update(|m| m.request_failed());
                            error.set(Some(format!("like failed ({})", response.status())));
                        }
                        Err(err) => {
                            model.update(|m| m.request_failed());
                            error.set(Some(err.to_string()));
                        }
                    }
                }
                LikeAction::Delete { like_id } => {
                    let result = reqwest::Client::new()
                        .delete("/api/v1/manage-like")
                        .header(NONCE_HEADER, nonce)
                        .json(&LikeDeleteRequest { like: like_id })
                        .send()
                        .await;
                    match result {
                        Ok(response) if response.status().is_success() => {
                            error.set(None);
                            model.update(|m| m.delete_confirmed());
                        }
                        Ok(response) => {
                            model.update(|m| m.request_failed());
                            error.set(Some(format!("unlike failed ({})", response.status())));
                        }
                        Err(err) => {
                            model.update(|m| m.request_failed());
                            error.set(Some(err.to_string()));
                        }
                    }
                }
            }
        });
    };

    view! {
        <div class="like-box" id="like-box">
            <button
                class=move || {
                    if model.get().is_liked() { "like-button like-button--liked" } else { "like-button" }
                }
                on:click=toggle
                disabled=move || model.get().is_pending()
            >
                {move || if model.get().is_liked() { "Liked" } else { "Like" }}
            </button>
            <span class="like-count">{move || model.get().count()}</span>
            {move || error.get().map(|e| view! { <span class="like-box__error">{e}</span> })}
        </div>
    }
}
