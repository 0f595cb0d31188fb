use leptos::prelude::*;

/// Hamburger toggle for the site navigation on small screens.
#[component]
pub fn MobileMenu() -> impl IntoView {
    let open = RwSignal::new(false);

    view! {
        <button
            class=move || {
                if open.get() {
                    "site-header__menu-trigger site-header__menu-trigger--active"
                } else {
                    "site-header__menu-trigger"
                }
            }
            aria-expanded=move || open.get().to_string()
            on:click=move |_| open.update(|o| *o = !*o)
        >
            <span class="site-header__menu-trigger-bar"></span>
            "Menu"
        </button>
        <nav class=move || {
            if open.get() {
                "site-header__menu site-header__menu--active"
            } else {
                "site-header__menu"
            }
        }>
            <ul class="nav-list">
                <li>
                    <a href="/programs">"Programs"</a>
                </li>
                <li>
                    <a href="/professors">"Professors"</a>
                </li>
                <li>
                    <a href="/campuses">"Campuses"</a>
                </li>
                <li>
                    <a href="/events">"Events"</a>
                </li>
                <li>
                    <a href="/blog">"Blog"</a>
                </li>
                <li>
                    <a href="/my-notes">"My Notes"</a>
                </li>
            </ul>
        </nav>
    }
}
