use leptos::prelude::*;

/// One marker on the campus map.
#[derive(Debug, Clone, PartialEq)]
pub struct CampusPin {
    pub title: String,
    pub permalink: String,
    pub lat: f64,
    pub lng: f64,
}

/// Percent position of a pin inside the map viewport, derived from the
/// bounding box of all pins with a small margin so edge markers stay
/// visible. Latitude grows northward, so the y axis is inverted.
pub fn project(pins: &[CampusPin], pin: &CampusPin) -> (f64, f64) {
    const MARGIN: f64 = 10.0;
    const SPAN: f64 = 100.0 - 2.0 * MARGIN;

    let axis = |value: f64, min: f64, max: f64| {
        if (max - min).abs() < f64::EPSILON {
            50.0
        } else {
            MARGIN + SPAN * (value - min) / (max - min)
        }
    };

    let lat_min = pins.iter().map(|p| p.lat).fold(f64::INFINITY, f64::min);
    let lat_max = pins.iter().map(|p| p.lat).fold(f64::NEG_INFINITY, f64::max);
    let lng_min = pins.iter().map(|p| p.lng).fold(f64::INFINITY, f64::min);
    let lng_max = pins.iter().map(|p| p.lng).fold(f64::NEG_INFINITY, f64::max);

    let x = axis(pin.lng, lng_min, lng_max);
    let y = 100.0 - axis(pin.lat, lat_min, lat_max);
    (x, y)
}

/// Schematic campus map rendered from marker data; no map SDK.
#[component]
pub fn CampusMap(pins: Vec<CampusPin>) -> impl IntoView {
    let markers = pins
        .iter()
        .map(|pin| {
            let (x, y) = project(&pins, pin);
            view! {
                <a
                    class="campus-map__pin"
                    href=pin.permalink.clone()
                    style=format!("left: {x:.1}%; top: {y:.1}%;")
                >
                    <span class="campus-map__pin-dot"></span>
                    <span class="campus-map__pin-label">{pin.title.clone()}</span>
                </a>
            }
        })
        .collect_view();

    view! { <div class="campus-map">{markers}</div> }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(title: &str, lat: f64, lng: f64) -> CampusPin {
        CampusPin {
            title: title.into(),
            permalink: format!("/campuses/{}", title.to_lowercase()),
            lat,
            lng,
        }
    }

    #[test]
    fn corners_map_to_margins_with_inverted_latitude() {
        let pins = vec![pin("North", 45.0, -122.0), pin("South", 44.0, -121.0)];

        // Northernmost, westernmost pin lands top-left.
        let (x, y) = project(&pins, &pins[0]);
        assert!((x - 10.0).abs() < 1e-9);
        assert!((y - 10.0).abs() < 1e-9);

        let (x, y) = project(&pins, &pins[1]);
        assert!((x - 90.0).abs() < 1e-9);
        assert!((y - 90.0).abs() < 1e-9);
    }

    #[test]
    fn single_pin_centers() {
        let pins = vec![pin("Main", 45.0, -122.0)];
        let (x, y) = project(&pins, &pins[0]);
        assert!((x - 50.0).abs() < 1e-9);
        assert!((y - 50.0).abs() < 1e-9);
    }
}
