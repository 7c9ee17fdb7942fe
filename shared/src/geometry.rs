//! Pure route-geometry helpers: arc interpolation, encoded polylines and
//! great-circle distances. Everything here is stateless and wrap-safe across
//! the antimeridian.

use thiserror::Error;

use crate::LatLng;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Resolution of the standard encoded-polyline format.
const POLYLINE_SCALE: f64 = 1e5;

#[derive(Debug, Error, PartialEq)]
pub enum PolylineError {
    #[error("encoded polyline truncated mid-value")]
    Truncated,
    #[error("invalid byte {0:#x} in encoded polyline")]
    InvalidByte(u8),
    #[error("encoded polyline value overflows")]
    Overflow,
}

/// Normalize a longitude into `[-180, 180]`. In-range values pass through
/// bit-exact so arc endpoints stay exact.
pub fn normalize_lng(lng: f64) -> f64 {
    if (-180.0..=180.0).contains(&lng) {
        return lng;
    }
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Points along a quadratic Bezier arc from `a` to `b`, `num_points + 1` of
/// them including both endpoints.
///
/// The longitude delta is wrapped to `[-180, 180]` first so the arc always
/// takes the short way across the antimeridian, and the control point is the
/// perpendicular offset from the midpoint scaled by
/// `|offset_factor| * distance(a, b)` in degree space, flipped if needed so
/// the bulge always points toward increasing latitude regardless of the
/// factor's sign. Identical endpoints yield `num_points + 1` copies of `a`.
pub fn arc_points(a: LatLng, b: LatLng, num_points: usize, offset_factor: f64) -> Vec<LatLng> {
    if num_points == 0 {
        return vec![a];
    }

    let mut dx = b.lng - a.lng;
    if dx > 180.0 {
        dx -= 360.0;
    }
    if dx < -180.0 {
        dx += 360.0;
    }
    let dy = b.lat - a.lat;

    let plen = (dx * dx + dy * dy).sqrt();
    if plen == 0.0 {
        return vec![a; num_points + 1];
    }

    // midpoint in continuous (unwrapped) longitude space
    let mx = a.lng + dx / 2.0;
    let my = (a.lat + b.lat) / 2.0;

    // unit perpendicular, forced to bulge northward
    let mut px = -dy / plen;
    let mut py = dx / plen;
    if py <= 0.0 {
        px = -px;
        py = -py;
    }

    let offset = plen * offset_factor.abs();
    let control_lng = mx + px * offset;
    let control_lat = my + py * offset;

    // b's longitude unwrapped so interpolation stays in continuous space
    let b_lng = a.lng + dx;

    let mut points = Vec::with_capacity(num_points + 1);
    for i in 0..num_points {
        let t = i as f64 / num_points as f64;
        let u = 1.0 - t;
        let lat = u * u * a.lat + 2.0 * u * t * control_lat + t * t * b.lat;
        let lng_raw = u * u * a.lng + 2.0 * u * t * control_lng + t * t * b_lng;
        points.push(LatLng::new(lat, normalize_lng(lng_raw)));
    }
    // the interpolation drifts by an ulp or two at t=1; pin the endpoint
    points.push(LatLng::new(b.lat, normalize_lng(b.lng)));
    points
}

/// Decode a standard encoded polyline into points at 1e-5 degree resolution.
/// An empty string decodes to an empty sequence.
pub fn decode_polyline(encoded: &str) -> Result<Vec<LatLng>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0usize;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat += decode_value(bytes, &mut index)?;
        lng += decode_value(bytes, &mut index)?;
        points.push(LatLng::new(
            lat as f64 / POLYLINE_SCALE,
            lng as f64 / POLYLINE_SCALE,
        ));
    }
    Ok(points)
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut shift = 0u32;
    let mut result: u64 = 0;
    loop {
        let byte = *bytes.get(*index).ok_or(PolylineError::Truncated)?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidByte(byte));
        }
        *index += 1;
        // a real coordinate delta fits in well under 60 bits
        if shift > 60 {
            return Err(PolylineError::Overflow);
        }
        let chunk = (byte - 63) as u64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    let value = if result & 1 == 1 {
        !(result >> 1) as i64
    } else {
        (result >> 1) as i64
    };
    Ok(value)
}

/// Encode points into the standard encoded-polyline format. Inverse of
/// [`decode_polyline`] up to 1e-5 rounding.
pub fn encode_polyline(points: &[LatLng]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;
    for p in points {
        let lat = (p.lat * POLYLINE_SCALE).round() as i64;
        let lng = (p.lng * POLYLINE_SCALE).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }
    out
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = ((value << 1) ^ (value >> 63)) as u64;
    loop {
        let mut chunk = (v & 0x1f) as u8;
        v >>= 5;
        if v > 0 {
            chunk |= 0x20;
        }
        out.push((chunk + 63) as char);
        if v == 0 {
            break;
        }
    }
}

/// Great-circle distance in meters, longitude-wrap-safe.
pub fn haversine_meters(p1: LatLng, p2: LatLng) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let mut dlng = (p2.lng - p1.lng).to_radians();
    if dlng > std::f64::consts::PI {
        dlng -= 2.0 * std::f64::consts::PI;
    }
    if dlng < -std::f64::consts::PI {
        dlng += 2.0 * std::f64::consts::PI;
    }
    let dlat = lat2 - lat1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Cumulative great-circle length of a point sequence in meters.
pub fn path_length_meters(points: &[LatLng]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_meters(w[0], w[1]))
        .sum()
}
