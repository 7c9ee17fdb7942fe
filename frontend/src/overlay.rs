//! Overlay lifecycle manager: the one owner of every marker, polyline and
//! tooltip attached to the map.
//!
//! All mutation goes through three entry points: [`OverlayManager::rebuild_markers`]
//! for structural changes (origins or venues replaced),
//! [`OverlayManager::apply_selection`] for selection changes, and
//! [`OverlayManager::apply_leg_result`] for asynchronous driving-leg
//! completions. A generation counter is bumped by every entry point that
//! invalidates in-flight work; continuations carry the generation they were
//! issued under and are dropped on mismatch, which settles the race between
//! teardown/reselection and a leg fetch still in flight.

use std::collections::HashMap;

use shared::{offices, Bounds, LatLng, LegRequest, LegResponse, Origin, Venue};

use crate::config;
use crate::route::{self, RouteKind};
use crate::surface::{LineId, LineSpec, MapSurface, MarkerIcon, MarkerId, MarkerSpec};
use crate::tooltip;

const ROUTE_LINE: LineSpec = LineSpec {
    stroke_color: String::new(),
    stroke_opacity: 0.9,
    stroke_weight: 5.0,
    z_index: 500,
};

const LEG_LINE: LineSpec = LineSpec {
    stroke_color: String::new(),
    stroke_opacity: 0.95,
    stroke_weight: 4.0,
    z_index: 900,
};

const ROUTE_COLOR: &str = "#a43ef7";
const HOP_BADGE_SIZE: u32 = 34;

/// Identifies the overlay a hover event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKey {
    Marker(MarkerId),
    Line(LineId),
}

/// A first-leg fetch the caller should spawn; the generation must be handed
/// back with the result.
#[derive(Debug, Clone)]
pub struct LegFetch {
    pub generation: u64,
    pub origin_name: String,
    pub request: LegRequest,
}

struct VenueMarker {
    venue_id: String,
    marker: MarkerId,
    position: LatLng,
}

struct RouteEntry {
    line: LineId,
    waypoints: Vec<LatLng>,
    tooltip_html: String,
}

pub struct OverlayManager<S: MapSurface> {
    surface: S,
    generation: u64,
    origin_markers: Vec<MarkerId>,
    venue_markers: Vec<VenueMarker>,
    route_lines: HashMap<String, RouteEntry>,
    leg_lines: Vec<LineId>,
    hop_markers: Vec<MarkerId>,
    tooltip_html: HashMap<OverlayKey, String>,
    hovered: Option<OverlayKey>,
}

impl<S: MapSurface> OverlayManager<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            generation: 0,
            origin_markers: Vec::new(),
            venue_markers: Vec::new(),
            route_lines: HashMap::new(),
            leg_lines: Vec::new(),
            hop_markers: Vec::new(),
            tooltip_html: HashMap::new(),
            hovered: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Venue id behind a clicked marker, if it is a venue marker.
    pub fn venue_for_marker(&self, marker: MarkerId) -> Option<&str> {
        self.venue_markers
            .iter()
            .find(|vm| vm.marker == marker)
            .map(|vm| vm.venue_id.as_str())
    }

    /// Structural pass: origins or venues were replaced. Rebuilds every
    /// persistent marker and fits the view. Venues without an address-book
    /// entry are skipped and contribute nothing to the fit.
    pub fn rebuild_markers(&mut self, origins: &[Origin], venues: &[Venue]) {
        self.generation += 1;
        self.clear_route_overlays();
        self.clear_markers();

        let mut bounds = Bounds::new();

        for origin in origins {
            let position = origin.position();
            let marker = self.surface.create_marker(&MarkerSpec {
                position,
                opacity: 1.0,
                title: Some(origin.name.clone()),
                clickable: false,
                z_index: 600,
                icon: MarkerIcon::OriginPin,
            });
            self.tooltip_html.insert(
                OverlayKey::Marker(marker),
                tooltip::origin_tooltip(&origin.name, origin.num_attendees),
            );
            bounds.extend(position);
            self.origin_markers.push(marker);
        }

        for venue in venues {
            let Some(office) = offices::lookup(&venue.event_location) else {
                crate::debug_log(&format!(
                    "no address for venue {:?}, not rendering it",
                    venue.event_location
                ));
                continue;
            };
            let position = office.position();
            let marker = self.surface.create_marker(&MarkerSpec {
                position,
                opacity: config::VENUE_MARKER_OPACITY,
                title: Some(venue.event_location.clone()),
                clickable: true,
                z_index: 500,
                icon: MarkerIcon::VenuePin,
            });
            bounds.extend(position);
            self.venue_markers.push(VenueMarker {
                venue_id: venue.id.clone(),
                marker,
                position,
            });
        }

        let total = self.origin_markers.len() + self.venue_markers.len();
        if total > 1 {
            self.surface.fit_bounds(&bounds);
        } else if total == 1 {
            if let Some(center) = bounds.center() {
                self.surface.set_view(center, config::SINGLE_MARKER_ZOOM);
            }
        }
    }

    /// Selection pass: markers unchanged, selection possibly different.
    /// Returns the first-leg fetches the caller should spawn.
    pub fn apply_selection(
        &mut self,
        origins: &[Origin],
        venues: &[Venue],
        selected_id: Option<&str>,
    ) -> Vec<LegFetch> {
        // any in-flight leg belongs to the previous selection now
        self.generation += 1;
        self.clear_route_overlays();

        for vm in &self.venue_markers {
            let selected = selected_id == Some(vm.venue_id.as_str());
            let opacity = if selected {
                1.0
            } else {
                config::VENUE_MARKER_OPACITY
            };
            self.surface.set_marker_opacity(vm.marker, opacity);
            if selected {
                self.surface.pan_to(vm.position);
            }
        }

        let Some(selected_id) = selected_id else {
            return Vec::new();
        };
        let Some(venue) = venues.iter().find(|v| v.id == selected_id) else {
            return Vec::new();
        };
        let Some(office) = offices::lookup(&venue.event_location) else {
            crate::debug_log(&format!(
                "selected venue {:?} has no address, nothing to draw",
                venue.event_location
            ));
            return Vec::new();
        };
        let venue_pos = office.position();

        let mut bounds = Bounds::new();
        let mut fetches = Vec::new();

        for origin in origins {
            let resolved = route::resolve(origin, venue, venue_pos);

            let line = self.draw_route_line(&resolved.points);
            let html = tooltip::route_tooltip(
                &origin.name,
                &venue.event_location,
                venue.travel_hours_for(&origin.name),
                resolved.kind == RouteKind::FixedPair,
            );
            self.tooltip_html.insert(OverlayKey::Line(line), html.clone());

            for badge in &resolved.badges {
                let marker = self.surface.create_marker(&MarkerSpec {
                    position: badge.position,
                    opacity: 1.0,
                    title: None,
                    clickable: false,
                    z_index: 1000,
                    icon: MarkerIcon::HopBadge {
                        data_url: tooltip::hop_badge_data_url(&badge.code, HOP_BADGE_SIZE),
                    },
                });
                self.hop_markers.push(marker);
            }

            if let Some(request) = resolved.first_leg {
                fetches.push(LegFetch {
                    generation: self.generation,
                    origin_name: origin.name.clone(),
                    request,
                });
            }

            self.route_lines.insert(
                origin.name.clone(),
                RouteEntry {
                    line,
                    waypoints: resolved.waypoints,
                    tooltip_html: html,
                },
            );

            bounds.extend(origin.position());
            bounds.extend(venue_pos);
        }

        // best-effort fit once all synchronous draws are issued
        if !self.route_lines.is_empty() && !bounds.is_empty() {
            self.surface.fit_bounds(&bounds);
        }

        fetches
    }

    /// Completion of a first-leg fetch. A stale generation means the
    /// selection changed (or the map was torn down) while the fetch was in
    /// flight; the result is dropped without touching any overlay. Decode
    /// failures keep the already-drawn arc.
    pub fn apply_leg_result(&mut self, generation: u64, origin_name: &str, leg: &LegResponse) {
        if generation != self.generation {
            return;
        }
        let Ok(computed) = shared::geometry::decode_polyline(&leg.polyline) else {
            crate::debug_log(&format!(
                "undecodable leg polyline for {origin_name:?}, keeping arc"
            ));
            return;
        };
        if computed.is_empty() {
            return;
        }
        let Some(entry) = self.route_lines.get(origin_name) else {
            return;
        };

        let rebuilt = route::splice_first_leg(&computed, &entry.waypoints);
        let html = entry.tooltip_html.clone();
        let waypoints = entry.waypoints.clone();

        let old_line = entry.line;
        self.surface.remove_polyline(old_line);
        self.drop_tooltip_for(OverlayKey::Line(old_line));

        let line = self.draw_route_line(&rebuilt);
        self.tooltip_html.insert(OverlayKey::Line(line), html.clone());
        self.route_lines.insert(
            origin_name.to_string(),
            RouteEntry {
                line,
                waypoints,
                tooltip_html: html,
            },
        );

        let leg_line = self.surface.create_polyline(
            &computed,
            &LineSpec {
                stroke_color: ROUTE_COLOR.to_string(),
                ..LEG_LINE
            },
        );
        self.tooltip_html.insert(
            OverlayKey::Line(leg_line),
            tooltip::leg_tooltip(leg.distance_meters),
        );
        self.leg_lines.push(leg_line);
    }

    /// Hover entered or moved over an overlay: open or reposition the shared
    /// tooltip. Overlays without registered content are ignored.
    pub fn hover(&mut self, key: OverlayKey, position: LatLng) {
        if let Some(html) = self.tooltip_html.get(&key) {
            let html = html.clone();
            self.surface.open_tooltip(&html, position);
            self.hovered = Some(key);
        }
    }

    /// Hover left an overlay. Only the currently-hovered overlay may close
    /// the shared tooltip, so stale leave events cannot blank a fresh hover.
    pub fn leave(&mut self, key: OverlayKey) {
        if self.hovered == Some(key) {
            self.surface.close_tooltip();
            self.hovered = None;
        }
    }

    /// Release every overlay. Safe to call with fetches still in flight:
    /// the generation bump turns their completions into no-ops.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.clear_route_overlays();
        self.clear_markers();
    }

    fn draw_route_line(&mut self, points: &[LatLng]) -> LineId {
        self.surface.create_polyline(
            points,
            &LineSpec {
                stroke_color: ROUTE_COLOR.to_string(),
                ..ROUTE_LINE
            },
        )
    }

    fn clear_route_overlays(&mut self) {
        let entries: Vec<RouteEntry> = self.route_lines.drain().map(|(_, e)| e).collect();
        for entry in entries {
            self.surface.remove_polyline(entry.line);
            drop_tooltip(&mut self.tooltip_html, &mut self.hovered, &mut self.surface, OverlayKey::Line(entry.line));
        }
        for line in std::mem::take(&mut self.leg_lines) {
            self.surface.remove_polyline(line);
            drop_tooltip(&mut self.tooltip_html, &mut self.hovered, &mut self.surface, OverlayKey::Line(line));
        }
        for marker in std::mem::take(&mut self.hop_markers) {
            self.surface.remove_marker(marker);
        }
    }

    fn clear_markers(&mut self) {
        for marker in std::mem::take(&mut self.origin_markers) {
            self.surface.remove_marker(marker);
            drop_tooltip(&mut self.tooltip_html, &mut self.hovered, &mut self.surface, OverlayKey::Marker(marker));
        }
        for vm in std::mem::take(&mut self.venue_markers) {
            self.surface.remove_marker(vm.marker);
            drop_tooltip(&mut self.tooltip_html, &mut self.hovered, &mut self.surface, OverlayKey::Marker(vm.marker));
        }
    }

    fn drop_tooltip_for(&mut self, key: OverlayKey) {
        drop_tooltip(&mut self.tooltip_html, &mut self.hovered, &mut self.surface, key);
    }
}

/// Remove an overlay's tooltip content; close the shared tooltip if it is
/// currently showing that overlay.
fn drop_tooltip<S: MapSurface>(
    tooltip_html: &mut HashMap<OverlayKey, String>,
    hovered: &mut Option<OverlayKey>,
    surface: &mut S,
    key: OverlayKey,
) {
    tooltip_html.remove(&key);
    if *hovered == Some(key) {
        surface.close_tooltip();
        *hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::{FakeSurface, SurfaceCall};
    use shared::geometry::encode_polyline;
    use std::collections::HashMap as Map;

    fn origin(name: &str, lat: f64, lng: f64, attendees: u32) -> Origin {
        Origin {
            name: name.to_string(),
            coordinates: [lat, lng],
            num_attendees: attendees,
        }
    }

    fn venue(id: &str, key: &str) -> Venue {
        let mut v: Venue =
            serde_json::from_value(serde_json::json!({ "event_location": key })).unwrap();
        v.id = id.to_string();
        v
    }

    fn manager() -> OverlayManager<FakeSurface> {
        OverlayManager::new(FakeSurface::default())
    }

    #[test]
    fn rebuild_creates_one_marker_per_renderable_entity() {
        let mut mgr = manager();
        let origins = vec![origin("A", 50.0, 8.0, 3), origin("B", 48.0, 2.0, 2)];
        // "Atlantis" has no address-book entry and must be skipped
        let venues = vec![
            venue("v1", "Geneva"),
            venue("v2", "Atlantis"),
            venue("v3", "Paris"),
        ];
        mgr.rebuild_markers(&origins, &venues);

        // |O| + |V| - 1 markers
        assert_eq!(mgr.surface().live_markers.len(), 4);

        // the missing venue must not stretch the fitted bounds
        let fit = mgr
            .surface()
            .calls
            .iter()
            .find_map(|c| match c {
                SurfaceCall::FitBounds(b) => Some(*b),
                _ => None,
            })
            .expect("fit issued");
        assert!(fit.max_lat <= 52.6);
    }

    #[test]
    fn rebuild_with_single_marker_centers_instead_of_fitting() {
        let mut mgr = manager();
        mgr.rebuild_markers(&[origin("A", 10.0, 20.0, 1)], &[]);
        assert!(mgr
            .surface()
            .calls
            .iter()
            .any(|c| matches!(c, SurfaceCall::SetView(p, z)
                if *p == LatLng::new(10.0, 20.0) && *z == config::SINGLE_MARKER_ZOOM)));
        assert!(!mgr
            .surface()
            .calls
            .iter()
            .any(|c| matches!(c, SurfaceCall::FitBounds(_))));
    }

    #[test]
    fn rebuild_replaces_previous_markers_without_leaks() {
        let mut mgr = manager();
        mgr.rebuild_markers(&[origin("A", 1.0, 1.0, 1)], &[venue("v1", "Geneva")]);
        mgr.rebuild_markers(&[origin("B", 2.0, 2.0, 1)], &[venue("v1", "Paris")]);
        assert_eq!(mgr.surface().live_markers.len(), 2);
    }

    #[test]
    fn selection_draws_an_arc_polyline_per_origin() {
        let mut mgr = manager();
        let origins = vec![origin("A", 0.0, 0.0, 3)];
        let venues = vec![venue("v1", "Geneva")];
        mgr.rebuild_markers(&origins, &venues);
        let fetches = mgr.apply_selection(&origins, &venues, Some("v1"));

        assert!(fetches.is_empty());
        assert_eq!(mgr.surface().live_lines.len(), 1);
        let line = mgr.surface().live_lines[0];
        let points = &mgr.surface().line_points[&line];
        assert_eq!(points.len(), 81);
        assert_eq!(points[0], LatLng::new(0.0, 0.0));
        let geneva = shared::offices::lookup("Geneva").unwrap().position();
        assert_eq!(*points.last().unwrap(), geneva);
    }

    #[test]
    fn selecting_then_clearing_restores_pre_selection_state() {
        let mut mgr = manager();
        let origins = vec![origin("A", 0.0, 0.0, 3), origin("B", 10.0, 10.0, 2)];
        let venues = vec![venue("v1", "Geneva"), venue("v2", "Paris")];
        mgr.rebuild_markers(&origins, &venues);
        let markers_before = mgr.surface().live_markers.clone();

        mgr.apply_selection(&origins, &venues, Some("v1"));
        assert!(!mgr.surface().live_lines.is_empty());

        mgr.apply_selection(&origins, &venues, None);
        assert_eq!(mgr.surface().live_markers, markers_before);
        assert!(mgr.surface().live_lines.is_empty());
        assert!(!mgr.surface().tooltip_open);
    }

    #[test]
    fn selection_updates_marker_opacity_and_pans() {
        let mut mgr = manager();
        let origins = vec![origin("A", 0.0, 0.0, 1)];
        let venues = vec![venue("v1", "Geneva"), venue("v2", "Paris")];
        mgr.rebuild_markers(&origins, &venues);
        mgr.apply_selection(&origins, &venues, Some("v2"));

        let paris = shared::offices::lookup("Paris").unwrap().position();
        let opacities: Map<u32, f64> = mgr
            .surface()
            .calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::SetMarkerOpacity(id, o) => Some((*id, *o)),
                _ => None,
            })
            .collect();
        // one venue at full opacity, one dimmed
        assert!(opacities.values().any(|o| *o == 1.0));
        assert!(opacities.values().any(|o| *o == config::VENUE_MARKER_OPACITY));
        assert!(mgr
            .surface()
            .calls
            .iter()
            .any(|c| matches!(c, SurfaceCall::PanTo(p) if *p == paris)));
    }

    #[test]
    fn selecting_unrenderable_venue_draws_nothing() {
        let mut mgr = manager();
        let origins = vec![origin("A", 0.0, 0.0, 1)];
        let venues = vec![venue("v1", "Atlantis")];
        mgr.rebuild_markers(&origins, &venues);
        let fetches = mgr.apply_selection(&origins, &venues, Some("v1"));
        assert!(fetches.is_empty());
        assert!(mgr.surface().live_lines.is_empty());
    }

    #[test]
    fn itinerary_selection_requests_first_leg_and_draws_hop_badges() {
        let mut mgr = manager();
        let origins = vec![origin("London", 51.5074, -0.1278, 4)];
        let mut v = venue("v1", "Geneva");
        v.attendee_routes.insert(
            "London".to_string(),
            vec![shared::Hop {
                code: "LYS".to_string(),
                latitude: 45.7256,
                longitude: 5.0811,
            }],
        );
        let venues = vec![v];
        mgr.rebuild_markers(&origins, &venues);
        let fetches = mgr.apply_selection(&origins, &venues, Some("v1"));

        assert_eq!(fetches.len(), 1);
        assert_eq!(fetches[0].origin_name, "London");
        assert_eq!(fetches[0].generation, mgr.generation());
        assert_eq!(fetches[0].request.origin, LatLng::new(51.5074, -0.1278));

        let badges = mgr
            .surface()
            .calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::CreateMarker(m) if m.hop_badge))
            .count();
        assert_eq!(badges, 1);
    }

    #[test]
    fn stale_leg_result_is_dropped_entirely() {
        let mut mgr = manager();
        let origins = vec![origin("London", 51.5074, -0.1278, 4)];
        let mut v = venue("v1", "Geneva");
        v.attendee_routes.insert(
            "London".to_string(),
            vec![shared::Hop {
                code: "LYS".to_string(),
                latitude: 45.7256,
                longitude: 5.0811,
            }],
        );
        let venues = vec![v];
        mgr.rebuild_markers(&origins, &venues);
        let fetches = mgr.apply_selection(&origins, &venues, Some("v1"));
        let stale = fetches[0].generation;

        // selection changes before the fetch lands
        mgr.apply_selection(&origins, &venues, None);
        let lines_before = mgr.surface().live_lines.clone();

        let leg = LegResponse {
            polyline: encode_polyline(&[
                LatLng::new(51.5074, -0.1278),
                LatLng::new(45.7256, 5.0811),
            ]),
            distance_meters: Some(900_000.0),
            duration_seconds: Some(32_000.0),
        };
        mgr.apply_leg_result(stale, "London", &leg);
        assert_eq!(mgr.surface().live_lines, lines_before);
    }

    #[test]
    fn fresh_leg_result_replaces_first_segment_and_adds_leg_overlay() {
        let mut mgr = manager();
        let origins = vec![origin("London", 51.5074, -0.1278, 4)];
        let mut v = venue("v1", "Geneva");
        v.attendee_routes.insert(
            "London".to_string(),
            vec![shared::Hop {
                code: "LYS".to_string(),
                latitude: 45.7256,
                longitude: 5.0811,
            }],
        );
        let venues = vec![v];
        mgr.rebuild_markers(&origins, &venues);
        let fetches = mgr.apply_selection(&origins, &venues, Some("v1"));
        assert_eq!(mgr.surface().live_lines.len(), 1);

        let computed = vec![
            LatLng::new(51.5074, -0.1278),
            LatLng::new(48.0, 2.0),
            LatLng::new(45.7256, 5.0811),
        ];
        let leg = LegResponse {
            polyline: encode_polyline(&computed),
            distance_meters: Some(900_000.0),
            duration_seconds: Some(32_000.0),
        };
        mgr.apply_leg_result(fetches[0].generation, "London", &leg);

        // rebuilt main line plus the distinct leg overlay
        assert_eq!(mgr.surface().live_lines.len(), 2);
        let main = mgr.route_lines.get("London").unwrap().line;
        let main_points = &mgr.surface().line_points[&main.0];
        assert!((main_points[1].lat - 48.0).abs() < 1e-4);
        let geneva = shared::offices::lookup("Geneva").unwrap().position();
        assert_eq!(*main_points.last().unwrap(), geneva);
    }

    #[test]
    fn undecodable_leg_polyline_keeps_the_arc() {
        let mut mgr = manager();
        let origins = vec![origin("London", 51.5074, -0.1278, 4)];
        let mut v = venue("v1", "Geneva");
        v.attendee_routes.insert(
            "London".to_string(),
            vec![shared::Hop {
                code: "LYS".to_string(),
                latitude: 45.7256,
                longitude: 5.0811,
            }],
        );
        let venues = vec![v];
        mgr.rebuild_markers(&origins, &venues);
        let fetches = mgr.apply_selection(&origins, &venues, Some("v1"));
        let lines_before = mgr.surface().live_lines.clone();

        let leg = LegResponse {
            polyline: "_p~iF".to_string(), // truncated
            distance_meters: None,
            duration_seconds: None,
        };
        mgr.apply_leg_result(fetches[0].generation, "London", &leg);
        assert_eq!(mgr.surface().live_lines, lines_before);
    }

    #[test]
    fn hover_opens_and_leave_closes_the_shared_tooltip() {
        let mut mgr = manager();
        let origins = vec![origin("A", 0.0, 0.0, 3)];
        let venues = vec![venue("v1", "Geneva")];
        mgr.rebuild_markers(&origins, &venues);
        mgr.apply_selection(&origins, &venues, Some("v1"));

        let line = mgr.route_lines.get("A").unwrap().line;
        mgr.hover(OverlayKey::Line(line), LatLng::new(20.0, 3.0));
        assert!(mgr.surface().tooltip_open);
        let html = mgr
            .surface()
            .calls
            .iter()
            .rev()
            .find_map(|c| match c {
                SurfaceCall::OpenTooltip(html, _) => Some(html.clone()),
                _ => None,
            })
            .unwrap();
        assert!(html.contains("A"));
        assert!(html.contains("Geneva"));

        // a stale leave for some other overlay must not close it
        mgr.leave(OverlayKey::Marker(MarkerId(9999)));
        assert!(mgr.surface().tooltip_open);

        mgr.leave(OverlayKey::Line(line));
        assert!(!mgr.surface().tooltip_open);
    }

    #[test]
    fn hover_on_unknown_overlay_is_ignored() {
        let mut mgr = manager();
        mgr.hover(OverlayKey::Line(LineId(42)), LatLng::new(0.0, 0.0));
        assert!(!mgr.surface().tooltip_open);
    }

    #[test]
    fn teardown_releases_everything_even_with_fetch_in_flight() {
        let mut mgr = manager();
        let origins = vec![origin("London", 51.5074, -0.1278, 4)];
        let mut v = venue("v1", "Geneva");
        v.attendee_routes.insert(
            "London".to_string(),
            vec![shared::Hop {
                code: "LYS".to_string(),
                latitude: 45.7256,
                longitude: 5.0811,
            }],
        );
        let venues = vec![v];
        mgr.rebuild_markers(&origins, &venues);
        let fetches = mgr.apply_selection(&origins, &venues, Some("v1"));

        let line = mgr.route_lines.get("London").unwrap().line;
        mgr.hover(OverlayKey::Line(line), LatLng::new(48.0, 2.0));

        mgr.teardown();
        assert!(mgr.surface().live_markers.is_empty());
        assert!(mgr.surface().live_lines.is_empty());
        assert!(!mgr.surface().tooltip_open);

        // the in-flight completion arriving after teardown is a no-op
        let leg = LegResponse {
            polyline: encode_polyline(&[LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)]),
            distance_meters: Some(1_000.0),
            duration_seconds: Some(60.0),
        };
        mgr.apply_leg_result(fetches[0].generation, "London", &leg);
        assert!(mgr.surface().live_lines.is_empty());
    }

    #[test]
    fn venue_marker_click_resolves_to_its_id() {
        let mut mgr = manager();
        let venues = vec![venue("v1", "Geneva"), venue("v2", "Paris")];
        mgr.rebuild_markers(&[], &venues);
        let second = mgr.venue_markers[1].marker;
        assert_eq!(mgr.venue_for_marker(second), Some("v2"));
        assert_eq!(mgr.venue_for_marker(MarkerId(9999)), None);
    }
}
