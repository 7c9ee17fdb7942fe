pub mod geometry;
pub mod offices;

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A geographic point. Field names match the map surface wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are within `eps` degrees of `other`.
    pub fn near(self, other: Self, eps: f64) -> bool {
        (self.lat - other.lat).abs() < eps && (self.lng - other.lng).abs() < eps
    }
}

/// An attendee starting location, as pasted into the setup form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Origin {
    pub name: String,
    /// `[lat, lng]`, matching the setup JSON shape.
    pub coordinates: [f64; 2],
    #[serde(rename = "numAttendees", alias = "num_attendees", default)]
    pub num_attendees: u32,
}

impl Origin {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.coordinates[0], self.coordinates[1])
    }
}

/// One intermediate waypoint of an itinerary (typically an airport).
/// Upstream planners are sloppy about number vs string coordinates, so both
/// are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hop {
    #[serde(
        rename = "airport_code",
        alias = "airportCode",
        alias = "code",
        default
    )]
    pub code: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: f64,
}

impl Hop {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Co2Entry {
    pub per_attendee: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
}

/// A candidate meeting venue as returned by the recommendation service.
///
/// `id` is injected client-side after the round response is parsed; the
/// service itself only identifies venues by `event_location`, which doubles
/// as the address-book key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub id: String,
    pub event_location: String,
    #[serde(default)]
    pub event_dates: Option<DateRange>,
    #[serde(default)]
    pub event_span: Option<DateRange>,
    #[serde(default)]
    pub total_co2: Option<f64>,
    #[serde(default)]
    pub average_travel_hours: Option<f64>,
    #[serde(default)]
    pub median_travel_hours: Option<f64>,
    #[serde(default)]
    pub min_travel_hours: Option<f64>,
    #[serde(default)]
    pub max_travel_hours: Option<f64>,
    /// Travel hours per origin name; `None` when the planner could not price
    /// a leg.
    #[serde(default)]
    pub attendee_travel_hours: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub attendee_co2: HashMap<String, Co2Entry>,
    /// Itinerary hops per origin name, in travel order.
    #[serde(default)]
    pub attendee_routes: HashMap<String, Vec<Hop>>,
    #[serde(default, alias = "totalScore")]
    pub total_score: Option<f64>,
}

impl Venue {
    pub fn travel_hours_for(&self, origin_name: &str) -> Option<f64> {
        self.attendee_travel_hours
            .get(origin_name)
            .copied()
            .flatten()
    }

    pub fn routes_for(&self, origin_name: &str) -> Option<&[Hop]> {
        self.attendee_routes
            .get(origin_name)
            .map(Vec::as_slice)
            .filter(|hops| !hops.is_empty())
    }
}

/// Request to the routing relay: one driving leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegRequest {
    pub origin: LatLng,
    pub destination: LatLng,
}

/// Response from the routing relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegResponse {
    pub polyline: String,
    #[serde(rename = "distanceMeters", default)]
    pub distance_meters: Option<f64>,
    #[serde(rename = "durationSeconds", default)]
    pub duration_seconds: Option<f64>,
}

/// A latitude/longitude box accumulated marker by marker, used for view
/// fitting. Starts empty; `extend` grows it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lng: f64::INFINITY,
            max_lng: f64::NEG_INFINITY,
        }
    }

    pub fn extend(&mut self, p: LatLng) {
        self.min_lat = self.min_lat.min(p.lat);
        self.max_lat = self.max_lat.max(p.lat);
        self.min_lng = self.min_lng.min(p.lng);
        self.max_lng = self.max_lng.max(p.lng);
    }

    pub fn is_empty(&self) -> bool {
        self.min_lat > self.max_lat || self.min_lng > self.max_lng
    }

    pub fn center(&self) -> Option<LatLng> {
        if self.is_empty() {
            return None;
        }
        Some(LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        ))
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

fn lenient_f64<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(de)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {s:?}"))),
    }
}
