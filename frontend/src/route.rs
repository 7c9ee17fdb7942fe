//! Route resolution for one (origin, venue) pair.
//!
//! Precedence: configured fixed pair (straight segment) → itinerary hops
//! (concatenated arcs, driving polyline spliced in for the first leg once it
//! arrives) → synthetic arc. Everything here is synchronous; the first-leg
//! fetch itself lives in [`crate::leg`] and its result is applied through
//! [`splice_first_leg`].

use shared::geometry::arc_points;
use shared::{LatLng, LegRequest, Origin, Venue};

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    FixedPair,
    Itinerary,
    Arc,
}

/// A hop that gets its own badge marker (it coincides with neither endpoint).
#[derive(Debug, Clone, PartialEq)]
pub struct HopBadge {
    pub position: LatLng,
    pub code: String,
}

#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub kind: RouteKind,
    /// Path to draw immediately.
    pub points: Vec<LatLng>,
    /// Intermediate hops deserving a badge marker.
    pub badges: Vec<HopBadge>,
    /// First driving leg to resolve remotely, if the route has hops.
    pub first_leg: Option<LegRequest>,
    /// Waypoints (endpoints included) kept around so a later leg result can
    /// rebuild the path.
    pub waypoints: Vec<LatLng>,
}

/// Resolve the path for one origin against the selected venue. Total: any
/// unusable hop data degrades to the synthetic arc for this origin only.
pub fn resolve(origin: &Origin, venue: &Venue, venue_pos: LatLng) -> ResolvedRoute {
    let start = origin.position();

    if config::is_fixed_pair(&origin.name, &venue.event_location) {
        return ResolvedRoute {
            kind: RouteKind::FixedPair,
            points: vec![start, venue_pos],
            badges: Vec::new(),
            first_leg: None,
            waypoints: vec![start, venue_pos],
        };
    }

    if let Some(hops) = venue.routes_for(&origin.name) {
        let usable: Vec<_> = hops
            .iter()
            .filter(|h| h.latitude.is_finite() && h.longitude.is_finite())
            .collect();
        if !usable.is_empty() {
            // waypoints are origin + hops + venue, with endpoint duplicates
            // (within the join epsilon) collapsed
            let mut waypoints = vec![start];
            let mut badges = Vec::new();
            for hop in &usable {
                let pos = hop.position();
                if pos.near(start, config::JOIN_EPS_DEG) || pos.near(venue_pos, config::JOIN_EPS_DEG)
                {
                    continue;
                }
                waypoints.push(pos);
                badges.push(HopBadge {
                    position: pos,
                    code: hop.code.to_uppercase().chars().take(5).collect(),
                });
            }
            waypoints.push(venue_pos);

            if waypoints.len() >= 2 {
                let points = concat_arc_segments(&waypoints);
                let first_leg = (waypoints.len() > 2).then(|| LegRequest {
                    origin: waypoints[0],
                    destination: waypoints[1],
                });
                return ResolvedRoute {
                    kind: RouteKind::Itinerary,
                    points,
                    badges,
                    first_leg,
                    waypoints,
                };
            }
        }
    }

    let points = arc_points(start, venue_pos, config::ARC_SAMPLES, config::ARC_OFFSET_FACTOR);
    ResolvedRoute {
        kind: RouteKind::Arc,
        waypoints: vec![start, venue_pos],
        badges: Vec::new(),
        first_leg: None,
        points,
    }
}

/// Concatenate arc segments between consecutive waypoints, dropping the
/// duplicated shared vertex at every inner join.
pub fn concat_arc_segments(waypoints: &[LatLng]) -> Vec<LatLng> {
    let mut path = Vec::new();
    for (i, pair) in waypoints.windows(2).enumerate() {
        let seg = arc_points(pair[0], pair[1], config::ARC_SAMPLES, config::ARC_OFFSET_FACTOR);
        if i == 0 {
            path.extend(seg);
        } else {
            path.extend(seg.into_iter().skip(1));
        }
    }
    path
}

/// Rebuild a hop path with a remotely-computed first leg in place of the
/// first arc segment. The join vertex is deduplicated by proximity.
pub fn splice_first_leg(computed: &[LatLng], waypoints: &[LatLng]) -> Vec<LatLng> {
    if computed.is_empty() || waypoints.len() < 2 {
        return concat_arc_segments(waypoints);
    }

    let mut path = computed.to_vec();
    let rest = &waypoints[1..];
    for (i, pair) in rest.windows(2).enumerate() {
        let seg = arc_points(pair[0], pair[1], config::ARC_SAMPLES, config::ARC_OFFSET_FACTOR);
        if i == 0 {
            match (path.last().copied(), seg.first().copied()) {
                (Some(last), Some(first)) if last.near(first, config::JOIN_EPS_DEG) => {
                    path.extend(seg.into_iter().skip(1));
                }
                _ => path.extend(seg),
            }
        } else {
            path.extend(seg.into_iter().skip(1));
        }
    }
    path
}
