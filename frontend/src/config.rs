//! Planner tuning knobs. These are configuration, not business logic: the
//! emission factor and the fixed-pair list in particular have no single
//! authoritative source and are expected to be edited here.

/// Average car emission factor applied to driving legs, kg CO₂ per km.
pub const CO2_KG_PER_KM: f64 = 0.192;

/// Origin/venue pairs drawn as a literal straight rail segment instead of an
/// arc, matched in either direction.
pub const FIXED_PAIRS: &[(&str, &str)] = &[("Zurich", "Geneva")];

/// Samples per synthetic arc; the drawn arc has `ARC_SAMPLES + 1` points.
pub const ARC_SAMPLES: usize = 80;

/// Perpendicular control-point offset as a fraction of the chord length.
pub const ARC_OFFSET_FACTOR: f64 = 0.25;

/// Proximity threshold (degrees) for joining path segments and for deciding
/// whether a hop coincides with an endpoint.
pub const JOIN_EPS_DEG: f64 = 1e-4;

/// Opacity of a venue marker that is not selected.
pub const VENUE_MARKER_OPACITY: f64 = 0.75;

/// Zoom applied when the view centers on a single marker.
pub const SINGLE_MARKER_ZOOM: f64 = 6.0;

/// True when the (origin, venue) pair is configured as a fixed straight
/// segment, in either direction.
pub fn is_fixed_pair(origin_name: &str, venue_key: &str) -> bool {
    FIXED_PAIRS.iter().any(|(a, b)| {
        (origin_name == *a && venue_key == *b) || (origin_name == *b && venue_key == *a)
    })
}
