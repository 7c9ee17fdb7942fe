//! HTML fragments for the shared map tooltip, plus the generated hop badge
//! icon. The map library accepts raw HTML strings, so these builders return
//! markup directly (escaping the few interpolated names).

use crate::config;

const PERSON_SVG: &str = r##"<svg fill="#000000" width="28" height="28" viewBox="0 0 32 32" xmlns="http://www.w3.org/2000/svg"><path d="M16 15.503A5.041 5.041 0 1 0 16 5.42a5.041 5.041 0 0 0 0 10.083zm0 2.215c-6.703 0-11 3.699-11 5.5v3.363h22v-3.363c0-2.178-4.068-5.5-11-5.5z"/></svg>"##;

const PLANE_SVG: &str = r##"<svg width="28" height="28" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path fill="#000" d="M21 16v-2l-8-5V3.5a1.5 1.5 0 0 0-3 0V9l-8 5v2l8-2.5V19l-2 1.5V22l3.5-1 3.5 1v-1.5L13 19v-5.5z"/></svg>"##;

const TRAIN_SVG: &str = r##"<svg width="28" height="28" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><rect x="2" y="6" width="20" height="10" rx="2" fill="#000"/><circle cx="7" cy="18" r="1.5" fill="#000"/><circle cx="17" cy="18" r="1.5" fill="#000"/><rect x="5" y="8" width="6" height="4" fill="#fff"/></svg>"##;

const CAR_SVG: &str = r##"<svg width="16" height="16" viewBox="0 0 16 16" xmlns="http://www.w3.org/2000/svg"><path fill="#000" d="M4 9a1 1 0 1 1-2 0 1 1 0 0 1 2 0m10 0a1 1 0 1 1-2 0 1 1 0 0 1 2 0M6 8a1 1 0 0 0 0 2h4a1 1 0 1 0 0-2zM2.52 3.515A2.5 2.5 0 0 1 4.82 2h6.362c1 0 1.904.596 2.298 1.515l.792 1.848c.075.175.21.319.38.404.5.25.855.715.965 1.262l.335 1.679q.05.242.049.49v.413c0 .814-.39 1.543-1 1.997V13.5a.5.5 0 0 1-.5.5h-2a.5.5 0 0 1-.5-.5v-1.338c-1.292.048-2.745.088-4 .088s-2.708-.04-4-.088V13.5a.5.5 0 0 1-.5.5h-2a.5.5 0 0 1-.5-.5v-1.892c-.61-.454-1-1.183-1-1.997v-.413a2.5 2.5 0 0 1 .049-.49l.335-1.68c.11-.546.465-1.012.964-1.261a.8.8 0 0 0 .381-.404z"/></svg>"##;

/// `"2h 30m"`, or `"N/A"` when the planner could not price the leg.
pub fn format_travel_hours(hours: Option<f64>) -> String {
    match hours {
        Some(h) if h.is_finite() && h >= 0.0 => {
            let whole = h.floor() as i64;
            let minutes = ((h * 60.0).floor() as i64) % 60;
            format!("{whole}h {minutes}m")
        }
        _ => "N/A".to_string(),
    }
}

/// Hover content for an origin marker: name, attendee count, person icon.
pub fn origin_tooltip(name: &str, attendees: u32) -> String {
    format!(
        "<div class=\"tooltip origin-tooltip\">\
           <div class=\"tooltip-title\">{}</div>\
           <div class=\"tooltip-row\"><span class=\"count\">{attendees}</span>{PERSON_SVG}</div>\
         </div>",
        escape(name),
    )
}

/// Hover content for a route polyline: origin, venue, travel time. The
/// configured fixed pair swaps the plane icon for a train.
pub fn route_tooltip(
    origin_name: &str,
    venue_name: &str,
    travel_hours: Option<f64>,
    fixed_pair: bool,
) -> String {
    let icon = if fixed_pair { TRAIN_SVG } else { PLANE_SVG };
    format!(
        "<div class=\"tooltip route-tooltip\">\
           <div class=\"tooltip-row\"><span>{}</span>{icon}<span>{}</span></div>\
           <div class=\"tooltip-row\"><b>Travel Hours</b><b>{}</b></div>\
         </div>",
        escape(origin_name),
        escape(venue_name),
        format_travel_hours(travel_hours),
    )
}

/// Hover content for a computed driving leg: distance and estimated CO₂ at
/// the configured emission factor.
pub fn leg_tooltip(distance_meters: Option<f64>) -> String {
    let (km_str, co2_str) = match distance_meters {
        Some(m) if m.is_finite() && m >= 0.0 => {
            let km = m / 1000.0;
            (
                format!("{km:.1} km"),
                format!("{:.1} kg CO2", km * config::CO2_KG_PER_KM),
            )
        }
        _ => ("N/A".to_string(), "N/A".to_string()),
    };
    format!(
        "<div class=\"tooltip leg-tooltip\">{CAR_SVG}<b>{km_str}</b><b class=\"co2\">{co2_str}</b></div>"
    )
}

/// Circle-plus-code SVG icon for an intermediate hop, as a data URL.
pub fn hop_badge_data_url(code: &str, size: u32) -> String {
    let half = size / 2;
    let radius = half.saturating_sub(3);
    let text_y = half + 5;
    let svg = format!(
        "<?xml version='1.0' encoding='UTF-8'?>\
         <svg xmlns='http://www.w3.org/2000/svg' width='{size}' height='{size}' viewBox='0 0 {size} {size}'>\
           <circle cx='{half}' cy='{half}' r='{radius}' fill='#ffffff' stroke='#a43ef7' stroke-width='3'/>\
           <text x='{half}' y='{text_y}' font-family='Arial, Helvetica, sans-serif' font-weight='700' font-size='12' text-anchor='middle' fill='#111'>{}</text>\
         </svg>",
        escape(code),
    );
    format!("data:image/svg+xml;utf8,{}", encode_svg(&svg))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Percent-encode the characters that break `utf8` data URLs.
fn encode_svg(svg: &str) -> String {
    let mut out = String::with_capacity(svg.len());
    for c in svg.chars() {
        match c {
            '#' => out.push_str("%23"),
            '%' => out.push_str("%25"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '"' => out.push_str("%22"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_hours_formatting() {
        assert_eq!(format_travel_hours(Some(2.5)), "2h 30m");
        assert_eq!(format_travel_hours(Some(0.0)), "0h 0m");
        assert_eq!(format_travel_hours(Some(10.999)), "10h 59m");
        assert_eq!(format_travel_hours(None), "N/A");
        assert_eq!(format_travel_hours(Some(f64::NAN)), "N/A");
        assert_eq!(format_travel_hours(Some(-1.0)), "N/A");
    }

    #[test]
    fn origin_tooltip_contains_name_and_count() {
        let html = origin_tooltip("Zurich", 12);
        assert!(html.contains("Zurich"));
        assert!(html.contains(">12<"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn route_tooltip_time_or_na() {
        let html = route_tooltip("A", "Geneva", Some(2.25), false);
        assert!(html.contains("A"));
        assert!(html.contains("Geneva"));
        assert!(html.contains("2h 15m"));

        let html = route_tooltip("A", "Geneva", None, false);
        assert!(html.contains("N/A"));
    }

    #[test]
    fn route_tooltip_swaps_icon_for_fixed_pair() {
        let train = route_tooltip("Zurich", "Geneva", Some(3.0), true);
        let plane = route_tooltip("Zurich", "Berlin", Some(3.0), false);
        assert!(train.contains("<rect"));
        assert!(!plane.contains("<rect"));
    }

    #[test]
    fn leg_tooltip_distance_and_co2() {
        let html = leg_tooltip(Some(123_456.0));
        assert!(html.contains("123.5 km"));
        // 123.456 km * 0.192 kg/km
        assert!(html.contains("23.7 kg CO2"));

        let html = leg_tooltip(None);
        assert!(html.contains("N/A"));
    }

    #[test]
    fn tooltip_escapes_names() {
        let html = origin_tooltip("<script>", 1);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn embedded_icons_keep_their_hex_fill_attributes() {
        assert!(PERSON_SVG.contains(r##"fill="#000000""##));
        for svg in [PLANE_SVG, TRAIN_SVG, CAR_SVG] {
            assert!(svg.starts_with("<svg"));
            assert!(svg.contains(r##""#000""##) || svg.contains(r##"fill="#000""##));
        }
    }

    #[test]
    fn hop_badge_is_a_data_url_without_raw_angle_brackets() {
        let url = hop_badge_data_url("LHR", 34);
        assert!(url.starts_with("data:image/svg+xml;utf8,"));
        assert!(url.contains("LHR"));
        assert!(!url[24..].contains('<'));
    }
}
