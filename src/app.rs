use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Stylesheet, Title};
use leptos_router::components::*;
use leptos_router::hooks::use_params_map;
use leptos_router::path;

use crate::components::campus_map::{CampusMap, CampusPin};
use crate::components::hero_slider::{HeroSlide, HeroSlider};
use crate::components::mobile_menu::MobileMenu;
use crate::components::notes_panel::NotesPanel;
use crate::components::search_overlay::SearchOverlay;
use crate::components::session::SessionContext;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionContext::new();
    provide_context(session);
    Effect::new(move |_| session.load());

    let search_open = RwSignal::new(false);

    view! {
        <Stylesheet id="leptos" href="/pkg/quadrangle.css"/>
        <Title text="Quadrangle University"/>

        <Router>
            <div class=move || {
                if search_open.get() { "site site--scroll-locked" } else { "site" }
            }>
                <header class="site-header">
                    <a class="site-header__logo" href="/">
                        "Quadrangle University"
                    </a>
                    <MobileMenu />
                    <button
                        class="search-trigger"
                        on:click=move |_| search_open.set(true)
                    >
                        "Search"
                    </button>
                </header>
                <SearchOverlay open=search_open />
                <main>
                    <Routes fallback=|| view! { "Page not found." }.into_view()>
                        <Route path=path!("/") view=HomePage/>
                        <Route path=path!("/my-notes") view=NotesPage/>
                        <Route path=path!("/programs") view=ProgramsPage/>
                        <Route path=path!("/professors") view=ProfessorsPage/>
                        <Route path=path!("/professors/:id") view=ProfessorPage/>
                        <Route path=path!("/campuses") view=CampusesPage/>
                        <Route path=path!("/events") view=EventsPage/>
                        <Route path=path!("/blog") view=BlogPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    let slides = vec![
        HeroSlide {
            image_url: "/images/hero-quad.jpg".into(),
            headline: "Fall registration is open".into(),
            permalink: "/programs".into(),
        },
        HeroSlide {
            image_url: "/images/hero-library.jpg".into(),
            headline: "Meet our faculty".into(),
            permalink: "/professors".into(),
        },
        HeroSlide {
            image_url: "/images/hero-river.jpg".into(),
            headline: "Three campuses, one university".into(),
            permalink: "/campuses".into(),
        },
    ];

    view! {
        <HeroSlider slides=slides />
        <section class="page-section">
            <h1>"Welcome to Quadrangle University"</h1>
            <p>"Programs, professors, campuses and events, all in one place."</p>
        </section>
    }
}

#[component]
fn ProgramsPage() -> impl IntoView {
    view! {
        <section class="page-section">
            <h1>"Programs"</h1>
            <p>"Browse our degree programs, or press \"s\" to search the catalog."</p>
        </section>
    }
}

#[component]
fn ProfessorsPage() -> impl IntoView {
    view! {
        <section class="page-section">
            <h1>"Professors"</h1>
            <ul class="archive-list">
                <li>
                    <a href="/professors/vivian-chen">"Dr. Vivian Chen"</a>
                </li>
                <li>
                    <a href="/professors/marcus-webb">"Dr. Marcus Webb"</a>
                </li>
                <li>
                    <a href="/professors/ana-silva">"Dr. Ana Silva"</a>
                </li>
            </ul>
        </section>
    }
}

#[component]
fn EventsPage() -> impl IntoView {
    view! {
        <section class="page-section">
            <h1>"Events"</h1>
            <p>"Upcoming events across all three campuses."</p>
        </section>
    }
}

#[component]
fn BlogPage() -> impl IntoView {
    view! {
        <section class="page-section">
            <h1>"Blog"</h1>
            <p>"News and stories from around the university."</p>
        </section>
    }
}

#[component]
fn NotesPage() -> impl IntoView {
    view! { <NotesPanel /> }
}

#[component]
fn ProfessorPage() -> impl IntoView {
    let params = use_params_map();
    let id = move || params.get().get("id").unwrap_or_default();

    view! {
        <section class="page-section">
            <h1>"Professor"</h1>
            <crate::components::like_box::LikeBox professor_id=id() />
        </section>
    }
}

#[component]
fn CampusesPage() -> impl IntoView {
    let pins = vec![
        CampusPin {
            title: "Hilltop".into(),
            permalink: "/campuses/hilltop".into(),
            lat: 45.512,
            lng: -122.685,
        },
        CampusPin {
            title: "Riverside".into(),
            permalink: "/campuses/riverside".into(),
            lat: 45.473,
            lng: -122.671,
        },
        CampusPin {
            title: "Downtown".into(),
            permalink: "/campuses/downtown".into(),
            lat: 45.523,
            lng: -122.676,
        },
    ];

    view! {
        <section class="page-section">
            <h1>"Our Campuses"</h1>
            <CampusMap pins=pins />
        </section>
    }
}
