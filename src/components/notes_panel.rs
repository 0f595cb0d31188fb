use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Deserialize;

use crate::auth::session::NONCE_HEADER;
use crate::components::session::use_session;
use crate::models::note::{NotePayload, NoteRequest, NoteDeleteResponse, NOTE_LIMIT};

/// Matches the removal CSS transition; the row leaves the list once the
/// fade has finished.
const REMOVE_DELAY_MS: u64 = 401;
/// Delay before the entering class flips so the insert transition runs.
const ENTER_KICKOFF_MS: u64 = 30;
const ENTER_SETTLE_MS: u64 = 450;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowPhase {
    Entering,
    Opening,
    Settled,
    Removing,
}

impl RowPhase {
    fn css_class(self) -> &'static str {
        match self {
            RowPhase::Entering => "note-item note-item--entering",
            RowPhase::Opening => "note-item note-item--entering note-item--open",
            RowPhase::Settled => "note-item",
            RowPhase::Removing => "note-item note-item--fade-out",
        }
    }
}

#[derive(Clone)]
struct NoteRow {
    note: RwSignal<NotePayload>,
    phase: RwSignal<RowPhase>,
    editing: RwSignal<bool>,
}

impl NoteRow {
    fn settled(note: NotePayload) -> Self {
        Self {
            note: RwSignal::new(note),
            phase: RwSignal::new(RowPhase::Settled),
            editing: RwSignal::new(false),
        }
    }

    fn entering(note: NotePayload) -> Self {
        Self {
            note: RwSignal::new(note),
            phase: RwSignal::new(RowPhase::Entering),
            editing: RwSignal::new(false),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Reads the structured error body, falling back to the status line.
async fn api_error(response: reqwest::Response) -> ErrorDetail {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => ErrorDetail {
            code: "internal".to_string(),
            message: format!("request failed ({status})"),
        },
    }
}

/// Signed-in notes dashboard: create, inline-edit, and delete, capped
/// at [`NOTE_LIMIT`] live notes per owner.
#[component]
pub fn NotesPanel() -> impl IntoView {
    let session = use_session();
    let rows = RwSignal::new(Vec::<NoteRow>::new());
    let limit_message = RwSignal::new(None::<String>);
    let load_error = RwSignal::new(None::<String>);

    // Fetch the list whenever the session handshake (or a login)
    // lands on an authenticated user.
    Effect::new(move |_| {
        if !session.authenticated() {
            rows.set(Vec::new());
            return;
        }
        let nonce = session.nonce();
        spawn_local(async move {
            let result = reqwest::Client::new()
                .get("/api/v1/note")
                .header(NONCE_HEADER, nonce)
                .send()
                .await;
            match result {
                Ok(response) if response.status().is_success() => {
                    match response.json::<Vec<NotePayload>>().await {
                        Ok(notes) => {
                            load_error.set(None);
                            rows.set(notes.into_iter().map(NoteRow::settled).collect());
                        }
                        Err(err) => load_error.set(Some(err.to_string())),
                    }
                }
                Ok(response) => {
                    load_error.set(Some(api_error(response).await.message));
                }
                Err(err) => load_error.set(Some(err.to_string())),
            }
        });
    });

    view! {
        <section class="notes-panel">
            <h1>"My Notes"</h1>
            {move || {
                load_error.get().map(|e| view! { <p class="notes-panel__error">{e}</p> })
            }}
            <Show
                when=move || session.authenticated()
                fallback=move || view! { <LoginForm /> }
            >
                <NoteComposer rows=rows limit_message=limit_message />
                <p
                    class="notes-panel__limit-message"
                    style:display=move || {
                        if limit_message.get().is_some() { "block" } else { "none" }
                    }
                >
                    {move || limit_message.get().unwrap_or_default()}
                </p>
                <ul class="min-list" id="my-notes">
                    <For
                        each=move || rows.get()
                        key=|row| row.note.get_untracked().id
                        let:row
                    >
                        <NoteItem row=row rows=rows limit_message=limit_message />
                    </For>
                </ul>
            </Show>
        </section>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let session = use_session();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let user = username.get_untracked();
        let pass = password.get_untracked();
        pending.set(true);
        spawn_local(async move {
            match session.login(user, pass).await {
                Ok(()) => error.set(None),
                Err(err) => error.set(Some(err)),
            }
            pending.set(false);
        });
    };

    view! {
        <form class="login-form" on:submit=submit>
            <p>"Sign in to keep private notes."</p>
            {move || error.get().map(|e| view! { <p class="login-form__error">{e}</p> })}
            <label for="login-username">"Username"</label>
            <input
                type="text"
                id="login-username"
                on:input=move |ev| username.set(event_target_value(&ev))
                prop:value=username
            />
            <label for="login-password">"Password"</label>
            <input
                type="password"
                id="login-password"
                on:input=move |ev| password.set(event_target_value(&ev))
                prop:value=password
            />
            <button type="submit" disabled=move || pending.get()>
                {move || if pending.get() { "Signing in..." } else { "Sign in" }}
            </button>
        </form>
    }
}

#[component]
fn NoteComposer(
    rows: RwSignal<Vec<NoteRow>>,
    limit_message: RwSignal<Option<String>>,
) -> impl IntoView {
    let session = use_session();
    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let pending = RwSignal::new(false);
    let compose_error = RwSignal::new(None::<String>);

    let create = move |_| {
        let request = NoteRequest {
            title: title.get_untracked(),
            content: content.get_untracked(),
        };
        let nonce = session.nonce();
        pending.set(true);
        spawn_local(async move {
            let result = reqwest::Client::new()
                .post("/api/v1/note")
                .header(NONCE_HEADER, nonce)
                .json(&request)
                .send()
                .await;
            pending.set(false);
            match result {
                Ok(response) if response.status().is_success() => {
                    match response.json::<NotePayload>().await {
                        Ok(note) => {
                            compose_error.set(None);
                            title.set(String::new());
                            content.set(String::new());
                            let row = NoteRow::entering(note);
                            let phase = row.phase;
                            rows.update(|r| r.insert(0, row));
                            // Two-step class flip drives the insert
                            // transition, then the helper classes drop.
                            set_timeout(
                                move || phase.set(RowPhase::Opening),
                                Duration::from_millis(ENTER_KICKOFF_MS),
                            );
                            set_timeout(
                                move || phase.set(RowPhase::Settled),
                                Duration::from_millis(ENTER_SETTLE_MS),
                            );
                        }
                        Err(err) => compose_error.set(Some(err.to_string())),
                    }
                }
                Ok(response) => {
                    let detail = api_error(response).await;
                    if detail.code == "limit_exceeded" {
                        limit_message.set(Some(detail.message));
                    } else {
                        compose_error.set(Some(detail.message));
                    }
                }
                Err(err) => compose_error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <div class="new-note">
            <h2>"Create New Note"</h2>
            {move || {
                compose_error.get().map(|e| view! { <p class="new-note__error">{e}</p> })
            }}
            <input
                type="text"
                id="new-note-title"
                placeholder="Title"
                on:input=move |ev| title.set(event_target_value(&ev))
                prop:value=title
            />
            <textarea
                id="new-note-body"
                placeholder="Your note here..."
                on:input=move |ev| content.set(event_target_value(&ev))
                prop:value=content
            ></textarea>
            <button
                class="submit-note"
                on:click=create
                disabled=move || pending.get()
            >
                "Save Note"
            </button>
        </div>
    }
}

#[component]
fn NoteItem(
    row: NoteRow,
    rows: RwSignal<Vec<NoteRow>>,
    limit_message: RwSignal<Option<String>>,
) -> impl IntoView {
    let session = use_session();
    let note = row.note;
    let phase = row.phase;
    let editing = row.editing;
    let draft_title = RwSignal::new(String::new());
    let draft_content = RwSignal::new(String::new());
    let row_error = RwSignal::new(None::<String>);

    let begin_edit = move |_| {
        let current = note.get_untracked();
        draft_title.set(current.title);
        draft_content.set(current.content);
        editing.set(true);
    };

    let save = move |_| {
        let id = note.get_untracked().id;
        let request = NoteRequest {
            title: draft_title.get_untracked(),
            content: draft_content.get_untracked(),
        };
        let nonce = session.nonce();
        spawn_local(async move {
            let result = reqwest::Client::new()
                .post(format!("/api/v1/note/{id}"))
                .header(NONCE_HEADER, nonce)
                .json(&request)
                .send()
                .await;
            match result {
                Ok(response) if response.status().is_success() => {
                    match response.json::<NotePayload>().await {
                        Ok(updated) => {
                            row_error.set(None);
                            note.set(updated);
                            editing.set(false);
                        }
                        Err(err) => row_error.set(Some(err.to_string())),
                    }
                }
                Ok(response) => row_error.set(Some(api_error(response).await.message)),
                Err(err) => row_error.set(Some(err.to_string())),
            }
        });
    };

    let delete = move |_| {
        let id = note.get_untracked().id;
        let nonce = session.nonce();
        spawn_local(async move {
            let result = reqwest::Client::new()
                .delete(format!("/api/v1/note/{id}"))
                .header(NONCE_HEADER, nonce)
                .send()
                .await;
            match result {
                Ok(response) if response.status().is_success() => {
                    match response.json::<NoteDeleteResponse>().await {
                        Ok(body) => {
                            if body.user_note_count < NOTE_LIMIT {
                                limit_message.set(None);
                            }
                            phase.set(RowPhase::Removing);
                            set_timeout(
                                move || {
                                    rows.update(|r| {
                                        r.retain(|candidate| {
                                            candidate.note.get_untracked().id != id
                                        });
                                    });
                                },
                                Duration::from_millis(REMOVE_DELAY_MS),
                            );
                        }
                        Err(err) => row_error.set(Some(err.to_string())),
                    }
                }
                Ok(response) => row_error.set(Some(api_error(response).await.message)),
                Err(err) => row_error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <li class=move || phase.get().css_class()>
            {move || row_error.get().map(|e| view! { <p class="note-item__error">{e}</p> })}
            <Show
                when=move || editing.get()
                fallback=move || {
                    view! {
                        <h3>{move || note.get().title}</h3>
                        <p>{move || note.get().content}</p>
                        <div class="note-item__actions">
                            <button class="edit-note" on:click=begin_edit>
                                "Edit"
                            </button>
                            <button class="delete-note" on:click=delete>
                                "Delete"
                            </button>
                        </div>
                    }
                }
            >
                <input
                    type="text"
                    class="note-title-field"
                    on:input=move |ev| draft_title.set(event_target_value(&ev))
                    prop:value=draft_title
                />
                <textarea
                    class="note-body-field"
                    on:input=move |ev| draft_content.set(event_target_value(&ev))
                    prop:value=draft_content
                ></textarea>
                <div class="note-item__actions">
                    <button class="update-note" on:click=save>
                        "Save"
                    </button>
                    <button class="cancel-edit" on:click=move |_| editing.set(false)>
                        "Cancel"
                    </button>
                </div>
            </Show>
        </li>
    }
}
