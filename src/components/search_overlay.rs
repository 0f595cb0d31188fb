use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::session::NONCE_HEADER;
use crate::components::session::use_session;
use crate::models::content::EntityKind;
use crate::models::search::SearchResultSet;

/// Pause after the last keystroke before a query is issued.
pub const DEBOUNCE_MS: u64 = 750;
/// Focus grab is deferred until the opening transition has settled.
pub const FOCUS_DELAY_MS: u64 = 300;

/// What the input handler should do after a field change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDirective {
    /// Restart the debounce timer for the new value.
    Schedule,
    /// Cancel any pending timer and clear displayed results.
    Clear,
    /// Value did not change (navigation keys etc.).
    Ignore,
}

/// Overlay state machine, kept free of DOM and timer concerns so the
/// debounce and staleness rules can be tested directly.
///
/// Each issued query gets a sequence number; only the response matching
/// the most recently issued number is accepted. Anything else is a
/// stale response from an abandoned keystroke and is dropped.
#[derive(Debug, Default)]
pub struct SearchOverlayModel {
    open: bool,
    previous_value: String,
    next_seq: u64,
    pending_seq: Option<u64>,
}

impl SearchOverlayModel {
    pub fn open(&mut self) {
        self.open = true;
        self.previous_value.clear();
        self.pending_seq = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.pending_seq = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn input_changed(&mut self, value: &str) -> InputDirective {
        if value == self.previous_value {
            return InputDirective::Ignore;
        }
        self.previous_value = value.to_owned();
        if value.trim().is_empty() {
            self.pending_seq = None;
            InputDirective::Clear
        } else {
            InputDirective::Schedule
        }
    }

    /// The debounce timer elapsed: issue a query for the current value.
    pub fn timer_fired(&mut self) -> (u64, String) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending_seq = Some(seq);
        (seq, self.previous_value.clone())
    }

    /// Whether the response for `seq` should be rendered.
    pub fn accepts(&mut self, seq: u64) -> bool {
        if self.pending_seq == Some(seq) {
            self.pending_seq = None;
            true
        } else {
            false
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending_seq.is_some()
    }
}

async fn fetch_results(term: &str, nonce: &str) -> Result<SearchResultSet, String> {
    let response = reqwest::Client::new()
        .get("/api/v1/search")
        .query(&[("term", term)])
        .header(NONCE_HEADER, nonce)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("search failed ({})", response.status()));
    }
    response
        .json::<SearchResultSet>()
        .await
        .map_err(|e| e.to_string())
}

fn text_input_focused() -> bool {
    document()
        .active_element()
        .map(|el| {
            let tag = el.tag_name();
            tag == "INPUT" || tag == "TEXTAREA"
        })
        .unwrap_or(false)
}

/// Full-screen search overlay. The `open` signal is owned by the header
/// so any trigger element can toggle it.
#[component]
pub fn SearchOverlay(open: RwSignal<bool>) -> impl IntoView {
    let session = use_session();
    let model = StoredValue::new(SearchOverlayModel::default());
    let timer: StoredValue<Option<TimeoutHandle>, LocalStorage> = StoredValue::new_local(None);
    let (field, set_field) = signal(String::new());
    let (results, set_results) = signal(None::<SearchResultSet>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(false);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let clear_timer = move || {
        timer.update_value(|t| {
            if let Some(handle) = t.take() {
                handle.clear();
            }
        });
    };

    let run_query = move |seq: u64, term: String| {
        let nonce = session.nonce();
        spawn_local(async move {
            let outcome = fetch_results(&term, &nonce).await;
            let mut accepted = false;
            model.update_value(|m| accepted = m.accepts(seq));
            if !accepted {
                return;
            }
            set_loading.set(false);
            match outcome {
                Ok(set) => {
                    set_error.set(None);
                    set_results.set(Some(set));
                }
                // Keep the previous result set visible alongside the error.
                Err(err) => set_error.set(Some(err)),
            }
        });
    };

    let on_input = move |ev| {
        let value = event_target_value(&ev);
        set_field.set(value.clone());
        let mut directive = InputDirective::Ignore;
        model.update_value(|m| directive = m.input_changed(&value));
        match directive {
            InputDirective::Schedule => {
                clear_timer();
                set_loading.set(true);
                let scheduled = set_timeout_with_handle(
                    move || {
                        let mut issued = (0, String::new());
                        model.update_value(|m| issued = m.timer_fired());
                        let (seq, term) = issued;
                        run_query(seq, term);
                    },
                    Duration::from_millis(DEBOUNCE_MS),
                );
                if let Ok(handle) = scheduled {
                    timer.set_value(Some(handle));
                }
            }
            InputDirective::Clear => {
                clear_timer();
                set_loading.set(false);
                set_results.set(None);
                set_error.set(None);
            }
            InputDirective::Ignore => {}
        }
    };

    // Open/close side effects. Focus is grabbed after the CSS
    // transition so the field does not lose it mid-animation.
    Effect::new(move |_| {
        if open.get() {
            model.update_value(|m| m.open());
            set_field.set(String::new());
            set_results.set(None);
            set_error.set(None);
            set_loading.set(false);
            set_timeout(
                move || {
                    if let Some(input) = input_ref.get_untracked() {
                        let _ = input.focus();
                    }
                },
                Duration::from_millis(FOCUS_DELAY_MS),
            );
        } else {
            model.update_value(|m| m.close());
            clear_timer();
        }
    });

    // Escape closes; "s" opens unless the visitor is typing somewhere.
    Effect::new(move |_| {
        window_event_listener(leptos::ev::keydown, move |ev| {
            let key = ev.key();
            if key == "Escape" && open.get_untracked() {
                open.set(false);
            } else if key == "s" && !open.get_untracked() && !text_input_focused() {
                ev.prevent_default();
                open.set(true);
            }
        });
    });

    view! {
        <div class=move || {
            if open.get() { "search-overlay search-overlay--active" } else { "search-overlay" }
        }>
            <div class="search-overlay__top">
                <label class="sr-only" for="search-term">"Search"</label>
                <input
                    node_ref=input_ref
                    type="text"
                    id="search-term"
                    class="search-term"
                    placeholder="What are you looking for?"
                    autocomplete="off"
                    on:input=on_input
                    prop:value=field
                />
                <button
                    class="search-overlay__close"
                    on:click=move |_| open.set(false)
                >
                    "Close search"
                </button>
            </div>
            <div class="search-overlay__results" id="search-overlay__results">
                {move || {
                    error
                        .get()
                        .map(|e| view! { <p class="search-overlay__error">"Search error: " {e}</p> })
                }}
                {move || loading.get().then(|| view! { <div class="spinner-loader"></div> })}
                {move || results.get().map(render_results)}
            </div>
        </div>
    }
}

fn render_results(set: SearchResultSet) -> impl IntoView {
    view! {
        <div class="search-results">
            <div class="row">
                <div class="one-third">
                    <h2 class="search-overlay__section-title">"General Information"</h2>
                    {if set.general_info.is_empty() {
                        view! { <p>"No general information matches that search."</p> }
                            .into_any()
                    } else {
                        view! {
                            <ul class="link-list min-list">
                                {set
                                    .general_info
                                    .into_iter()
                                    .map(|item| {
                                        let byline = (item.entity_kind == EntityKind::Post)
                                            .then(|| {
                                                item.author_name.clone().map(|name| {
                                                    view! {
                                                        <span class="search-overlay__byline">
                                                            " by " {name}
                                                        </span>
                                                    }
                                                })
                                            })
                                            .flatten();
                                        view! {
                                            <li>
                                                <a href=item.permalink>{item.title}</a>
                                                {byline}
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any()
                    }}
                </div>
                <div class="one-third">
                    <h2 class="search-overlay__section-title">"Programs"</h2>
                    {if set.programs.is_empty() {
                        view! {
                            <p>
                                "No programs match that search. "
                                <a href="/programs">"View all programs"</a>
                            </p>
                        }
                        .into_any()
                    } else {
                        view! {
                            <ul class="link-list min-list">
                                {set
                                    .programs
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <li>
                                                <a href=item.permalink>{item.title}</a>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any()
                    }}
                    <h2 class="search-overlay__section-title">"Professors"</h2>
                    {if set.professors.is_empty() {
                        view! {
                            <p>
                                "No professors match that search. "
                                <a href="/professors">"View all professors"</a>
                            </p>
                        }
                        .into_any()
                    } else {
                        view! {
                            <ul class="professor-card-list">
                                {set
                                    .professors
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <li class="professor-card__list-item">
                                                <a class="professor-card" href=item.permalink>
                                                    {item
                                                        .image_url
                                                        .map(|src| {
                                                            view! {
                                                                <img
                                                                    class="professor-card__image"
                                                                    src=src
                                                                    alt=""
                                                                />
                                                            }
                                                        })}
                                                    <span class="professor-card__name">
                                                        {item.title}
                                                    </span>
                                                </a>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any()
                    }}
                </div>
                <div class="one-third">
                    <h2 class="search-overlay__section-title">"Campuses"</h2>
                    {if set.campuses.is_empty() {
                        view! {
                            <p>
                                "No campuses match that search. "
                                <a href="/campuses">"View all campuses"</a>
                            </p>
                        }
                        .into_any()
                    } else {
                        view! {
                            <ul class="link-list min-list">
                                {set
                                    .campuses
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <li>
                                                <a href=item.permalink>{item.title}</a>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any()
                    }}
                    <h2 class="search-overlay__section-title">"Events"</h2>
                    {if set.events.is_empty() {
                        view! {
                            <p>
                                "No events match that search. "
                                <a href="/events">"View all events"</a>
                            </p>
                        }
                        .into_any()
                    } else {
                        view! {
                            <ul class="event-card-list">
                                {set
                                    .events
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <li class="event-summary">
                                                <a class="event-summary__date" href=item.permalink.clone()>
                                                    <span class="event-summary__month">{item.month}</span>
                                                    <span class="event-summary__day">{item.day}</span>
                                                </a>
                                                <div class="event-summary__content">
                                                    <h3 class="event-summary__title">
                                                        <a href=item.permalink>{item.title}</a>
                                                    </h3>
                                                    <p>{item.description}</p>
                                                </div>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any()
                    }}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_typing_yields_one_query_for_final_value() {
        let mut model = SearchOverlayModel::default();
        model.open();

        assert_eq!(model.input_changed("b"), InputDirective::Schedule);
        assert_eq!(model.input_changed("bi"), InputDirective::Schedule);
        assert_eq!(model.input_changed("bio"), InputDirective::Schedule);

        // Only the last scheduled timer survives; it fires once.
        let (seq, term) = model.timer_fired();
        assert_eq!(term, "bio");
        assert!(model.accepts(seq));
        assert!(!model.has_pending());
    }

    #[test]
    fn unchanged_value_is_ignored() {
        let mut model = SearchOverlayModel::default();
        model.open();
        assert_eq!(model.input_changed("bio"), InputDirective::Schedule);
        // Arrow keys and similar fire input-adjacent events without
        // changing the value.
        assert_eq!(model.input_changed("bio"), InputDirective::Ignore);
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut model = SearchOverlayModel::default();
        model.open();

        model.input_changed("bio");
        let (first, _) = model.timer_fired();

        model.input_changed("biology");
        let (second, _) = model.timer_fired();

        // The response for the abandoned query arrives late.
        assert!(!model.accepts(first));
        assert!(model.accepts(second));
    }

    #[test]
    fn emptied_field_clears_and_invalidates_in_flight() {
        let mut model = SearchOverlayModel::default();
        model.open();

        model.input_changed("bio");
        let (seq, _) = model.timer_fired();

        assert_eq!(model.input_changed(""), InputDirective::Clear);
        assert!(!model.accepts(seq));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut model = SearchOverlayModel::default();
        model.open();
        assert_eq!(model.input_changed("   "), InputDirective::Clear);
    }

    #[test]
    fn closing_invalidates_in_flight_and_reopening_clears_field() {
        let mut model = SearchOverlayModel::default();
        model.open();

        model.input_changed("bio");
        let (seq, _) = model.timer_fired();
        model.close();
        assert!(!model.is_open());
        assert!(!model.accepts(seq));

        model.open();
        assert!(model.is_open());
        // The field restarts blank, so retyping the same term schedules.
        assert_eq!(model.input_changed("bio"), InputDirective::Schedule);
    }

    #[test]
    fn responses_are_single_use() {
        let mut model = SearchOverlayModel::default();
        model.open();
        model.input_changed("bio");
        let (seq, _) = model.timer_fired();
        assert!(model.accepts(seq));
        assert!(!model.accepts(seq));
    }
}
