//! Handlers for the two proxied endpoints: venue recommendation rounds and
//! single driving legs.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use shared::{LegRequest, LegResponse};

use crate::error::ProxyError;
use crate::ranking::rank_round;
use crate::AppState;

const SAMPLE_ROUND: &str = include_str!("../data/sample_round.json");

const LEG_FIELD_MASK: &str =
    "routes.polyline.encodedPolyline,routes.distanceMeters,routes.duration";

/// POST `/api/round`: forward the origin set to the recommendation service
/// (or serve the bundled sample round), then rank and cap the venues.
pub async fn round_handler(
    State(state): State<AppState>,
    Json(origins): Json<Value>,
) -> Result<Json<Value>, ProxyError> {
    let mut payload = match &state.config.plan_target {
        None => {
            tracing::debug!("serving bundled sample round");
            serde_json::from_str(SAMPLE_ROUND)
                .map_err(|e| ProxyError::Malformed(format!("sample round: {e}")))?
        }
        Some(target) => {
            tracing::debug!("forwarding round request to {target}");
            state
                .http
                .post(target)
                .json(&origins)
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await?
        }
    };

    rank_round(&mut payload, state.config.result_cap);
    Ok(Json(payload))
}

/// POST `/api/leg`: resolve one driving leg through the routing service.
/// The provider key never reaches the browser; it only travels from here.
pub async fn leg_handler(
    State(state): State<AppState>,
    Json(leg): Json<LegRequest>,
) -> Result<Json<LegResponse>, ProxyError> {
    let Some(target) = &state.config.routing_target else {
        return Err(ProxyError::RoutingUnconfigured);
    };

    tracing::debug!(
        "routing leg ({:.4},{:.4}) -> ({:.4},{:.4})",
        leg.origin.lat,
        leg.origin.lng,
        leg.destination.lat,
        leg.destination.lng
    );

    let body = json!({
        "origin": { "location": { "latLng": {
            "latitude": leg.origin.lat, "longitude": leg.origin.lng,
        }}},
        "destination": { "location": { "latLng": {
            "latitude": leg.destination.lat, "longitude": leg.destination.lng,
        }}},
        "travelMode": "DRIVE",
    });

    let mut request = state
        .http
        .post(target)
        .header("X-Goog-FieldMask", LEG_FIELD_MASK)
        .json(&body);
    if let Some(key) = &state.config.routing_api_key {
        request = request.header("X-Goog-Api-Key", key);
    }

    let value = request
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;
    Ok(Json(leg_from_provider(&value)?))
}

/// Map the provider's `routes[0]` into the relay response. The polyline is
/// required; distance and duration degrade to `None`.
pub fn leg_from_provider(value: &Value) -> Result<LegResponse, ProxyError> {
    let route = value
        .get("routes")
        .and_then(Value::as_array)
        .and_then(|routes| routes.first())
        .ok_or_else(|| ProxyError::Malformed("no routes in response".to_string()))?;

    let polyline = route
        .pointer("/polyline/encodedPolyline")
        .and_then(Value::as_str)
        .ok_or_else(|| ProxyError::Malformed("route has no encoded polyline".to_string()))?
        .to_string();

    let distance_meters = route.get("distanceMeters").and_then(Value::as_f64);
    let duration_seconds = match route.get("duration") {
        Some(Value::String(raw)) => parse_duration_seconds(raw),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };

    Ok(LegResponse {
        polyline,
        distance_meters,
        duration_seconds,
    })
}

/// The provider encodes durations as `"9311s"`.
fn parse_duration_seconds(raw: &str) -> Option<f64> {
    raw.trim().trim_end_matches('s').parse().ok()
}
