use std::time::Duration;

use leptos::prelude::*;

/// Auto-advance cadence.
const SLIDE_INTERVAL_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroSlide {
    pub image_url: String,
    pub headline: String,
    pub permalink: String,
}

pub fn next_slide(current: usize, slide_count: usize) -> usize {
    if slide_count == 0 {
        0
    } else {
        (current + 1) % slide_count
    }
}

/// Rotating hero banner with bullet navigation.
#[component]
pub fn HeroSlider(slides: Vec<HeroSlide>) -> impl IntoView {
    let slide_count = slides.len();
    let current = RwSignal::new(0usize);

    // Interval starts client-side only; cleared with the component.
    Effect::new(move |prev: Option<()>| {
        if prev.is_none() {
            let started = set_interval_with_handle(
                move || current.update(|i| *i = next_slide(*i, slide_count)),
                Duration::from_millis(SLIDE_INTERVAL_MS),
            );
            if let Ok(handle) = started {
                on_cleanup(move || handle.clear());
            }
        }
    });

    let bullets = (0..slide_count)
        .map(|index| {
            view! {
                <button
                    class=move || {
                        if current.get() == index {
                            "hero-slider__bullet hero-slider__bullet--active"
                        } else {
                            "hero-slider__bullet"
                        }
                    }
                    on:click=move |_| current.set(index)
                >
                    <span class="sr-only">{format!("Slide {}", index + 1)}</span>
                </button>
            }
        })
        .collect_view();

    let rendered_slides = slides
        .into_iter()
        .enumerate()
        .map(|(index, slide)| {
            view! {
                <div
                    class=move || {
                        if current.get() == index {
                            "hero-slider__slide hero-slider__slide--active"
                        } else {
                            "hero-slider__slide"
                        }
                    }
                    style:background-image=format!("url({})", slide.image_url)
                >
                    <h2 class="hero-slider__headline">
                        <a href=slide.permalink>{slide.headline}</a>
                    </h2>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="hero-slider">
            {rendered_slides}
            <div class="hero-slider__bullets">{bullets}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_around() {
        assert_eq!(next_slide(0, 3), 1);
        assert_eq!(next_slide(2, 3), 0);
    }

    #[test]
    fn empty_slider_stays_put() {
        assert_eq!(next_slide(0, 0), 0);
    }
}
