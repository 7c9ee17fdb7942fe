//! The narrow drawing capability the planner needs from a map library.
//!
//! The overlay manager only ever talks to [`MapSurface`]; the production
//! implementation forwards to `meeting_map.js`, and tests substitute a
//! recording fake. Handles are opaque ids minted by the surface.

use serde::Serialize;
use shared::{Bounds, LatLng};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(pub u32);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    pub position: LatLng,
    pub opacity: f64,
    pub title: Option<String>,
    pub clickable: bool,
    pub z_index: i32,
    pub icon: MarkerIcon,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MarkerIcon {
    /// Fixed pin for attendee starting locations.
    OriginPin,
    /// Default pin for candidate venues.
    VenuePin,
    /// Generated circle-plus-code badge for intermediate itinerary hops.
    HopBadge { data_url: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSpec {
    pub stroke_color: String,
    pub stroke_opacity: f64,
    pub stroke_weight: f64,
    pub z_index: i32,
}

pub trait MapSurface {
    fn create_marker(&mut self, spec: &MarkerSpec) -> MarkerId;
    fn set_marker_opacity(&mut self, id: MarkerId, opacity: f64);
    fn remove_marker(&mut self, id: MarkerId);
    fn create_polyline(&mut self, points: &[LatLng], spec: &LineSpec) -> LineId;
    fn remove_polyline(&mut self, id: LineId);
    fn fit_bounds(&mut self, bounds: &Bounds);
    fn pan_to(&mut self, position: LatLng);
    fn set_view(&mut self, center: LatLng, zoom: f64);
    fn open_tooltip(&mut self, html: &str, position: LatLng);
    fn close_tooltip(&mut self);
}

#[wasm_bindgen(module = "/meeting_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    pub fn init_map();
    #[wasm_bindgen(js_name = createMarker)]
    fn create_marker_js(spec: JsValue) -> u32;
    #[wasm_bindgen(js_name = setMarkerOpacity)]
    fn set_marker_opacity_js(id: u32, opacity: f64);
    #[wasm_bindgen(js_name = removeMarker)]
    fn remove_marker_js(id: u32);
    #[wasm_bindgen(js_name = createPolyline)]
    fn create_polyline_js(points: JsValue, spec: JsValue) -> u32;
    #[wasm_bindgen(js_name = removePolyline)]
    fn remove_polyline_js(id: u32);
    #[wasm_bindgen(js_name = fitBounds)]
    fn fit_bounds_js(bounds: JsValue);
    #[wasm_bindgen(js_name = panTo)]
    fn pan_to_js(lat: f64, lng: f64);
    #[wasm_bindgen(js_name = setView)]
    fn set_view_js(lat: f64, lng: f64, zoom: f64);
    #[wasm_bindgen(js_name = openTooltip)]
    fn open_tooltip_js(html: &str, lat: f64, lng: f64);
    #[wasm_bindgen(js_name = closeTooltip)]
    fn close_tooltip_js();
}

/// Production surface backed by the Leaflet wrapper in `meeting_map.js`.
#[derive(Default)]
pub struct JsSurface;

impl MapSurface for JsSurface {
    fn create_marker(&mut self, spec: &MarkerSpec) -> MarkerId {
        let value = serde_wasm_bindgen::to_value(spec).unwrap_or(JsValue::NULL);
        MarkerId(create_marker_js(value))
    }

    fn set_marker_opacity(&mut self, id: MarkerId, opacity: f64) {
        set_marker_opacity_js(id.0, opacity);
    }

    fn remove_marker(&mut self, id: MarkerId) {
        remove_marker_js(id.0);
    }

    fn create_polyline(&mut self, points: &[LatLng], spec: &LineSpec) -> LineId {
        let points = serde_wasm_bindgen::to_value(points).unwrap_or(JsValue::NULL);
        let spec = serde_wasm_bindgen::to_value(spec).unwrap_or(JsValue::NULL);
        LineId(create_polyline_js(points, spec))
    }

    fn remove_polyline(&mut self, id: LineId) {
        remove_polyline_js(id.0);
    }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        if bounds.is_empty() {
            return;
        }
        if let Ok(value) = serde_wasm_bindgen::to_value(bounds) {
            fit_bounds_js(value);
        }
    }

    fn pan_to(&mut self, position: LatLng) {
        pan_to_js(position.lat, position.lng);
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) {
        set_view_js(center.lat, center.lng, zoom);
    }

    fn open_tooltip(&mut self, html: &str, position: LatLng) {
        open_tooltip_js(html, position.lat, position.lng);
    }

    fn close_tooltip(&mut self) {
        close_tooltip_js();
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum SurfaceCall {
        CreateMarker(MarkerSpec2),
        SetMarkerOpacity(u32, f64),
        RemoveMarker(u32),
        CreatePolyline(u32, Vec<LatLng>),
        RemovePolyline(u32),
        FitBounds(Bounds),
        PanTo(LatLng),
        SetView(LatLng, f64),
        OpenTooltip(String, LatLng),
        CloseTooltip,
    }

    /// Cloneable summary of a marker spec for assertions.
    #[derive(Debug, Clone, PartialEq)]
    pub struct MarkerSpec2 {
        pub id: u32,
        pub position: LatLng,
        pub opacity: f64,
        pub clickable: bool,
        pub hop_badge: bool,
    }

    /// Recording fake: mints sequential ids and tracks live overlays.
    #[derive(Default)]
    pub struct FakeSurface {
        next_id: u32,
        pub calls: Vec<SurfaceCall>,
        pub live_markers: Vec<u32>,
        pub live_lines: Vec<u32>,
        pub line_points: std::collections::HashMap<u32, Vec<LatLng>>,
        pub tooltip_open: bool,
    }

    impl FakeSurface {
        fn mint(&mut self) -> u32 {
            self.next_id += 1;
            self.next_id
        }
    }

    impl MapSurface for FakeSurface {
        fn create_marker(&mut self, spec: &MarkerSpec) -> MarkerId {
            let id = self.mint();
            self.live_markers.push(id);
            self.calls.push(SurfaceCall::CreateMarker(MarkerSpec2 {
                id,
                position: spec.position,
                opacity: spec.opacity,
                clickable: spec.clickable,
                hop_badge: matches!(spec.icon, MarkerIcon::HopBadge { .. }),
            }));
            MarkerId(id)
        }

        fn set_marker_opacity(&mut self, id: MarkerId, opacity: f64) {
            self.calls.push(SurfaceCall::SetMarkerOpacity(id.0, opacity));
        }

        fn remove_marker(&mut self, id: MarkerId) {
            self.live_markers.retain(|m| *m != id.0);
            self.calls.push(SurfaceCall::RemoveMarker(id.0));
        }

        fn create_polyline(&mut self, points: &[LatLng], _spec: &LineSpec) -> LineId {
            let id = self.mint();
            self.live_lines.push(id);
            self.line_points.insert(id, points.to_vec());
            self.calls
                .push(SurfaceCall::CreatePolyline(id, points.to_vec()));
            LineId(id)
        }

        fn remove_polyline(&mut self, id: LineId) {
            self.live_lines.retain(|l| *l != id.0);
            self.line_points.remove(&id.0);
            self.calls.push(SurfaceCall::RemovePolyline(id.0));
        }

        fn fit_bounds(&mut self, bounds: &Bounds) {
            self.calls.push(SurfaceCall::FitBounds(*bounds));
        }

        fn pan_to(&mut self, position: LatLng) {
            self.calls.push(SurfaceCall::PanTo(position));
        }

        fn set_view(&mut self, center: LatLng, zoom: f64) {
            self.calls.push(SurfaceCall::SetView(center, zoom));
        }

        fn open_tooltip(&mut self, html: &str, position: LatLng) {
            self.tooltip_open = true;
            self.calls
                .push(SurfaceCall::OpenTooltip(html.to_string(), position));
        }

        fn close_tooltip(&mut self) {
            self.tooltip_open = false;
            self.calls.push(SurfaceCall::CloseTooltip);
        }
    }
}
