//! Client for the venue recommendation proxy, plus validation of the pasted
//! setup JSON. The proxy is expected to return venues sorted and truncated
//! already; everything is still re-checked here because upstream planners
//! have shipped both unsorted and unwrapped payloads.

use seed::prelude::*;
use serde_json::Value;
use shared::{Origin, Venue};

fn api_root() -> String {
    if let Some(url) = option_env!("FRONTEND_API_ROOT") {
        return url.trim_end_matches('/').to_string();
    }
    "http://localhost:8080/api/round".to_string()
}

/// Parse and validate the setup JSON: an array of origins. Errors are
/// human-readable; nothing is applied until the whole input validates.
pub fn parse_setup(input: &str) -> Result<Vec<Origin>, String> {
    let origins: Vec<Origin> = serde_json::from_str(input)
        .map_err(|e| format!("Setup JSON is not a list of starting locations: {e}"))?;
    if origins.is_empty() {
        return Err("Setup needs at least one starting location".to_string());
    }
    for origin in &origins {
        if origin.name.trim().is_empty() {
            return Err("Every starting location needs a name".to_string());
        }
        let [lat, lng] = origin.coordinates;
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(format!("Invalid latitude for {:?}", origin.name));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(format!("Invalid longitude for {:?}", origin.name));
        }
    }
    for (i, a) in origins.iter().enumerate() {
        if origins[..i].iter().any(|b| b.name == a.name) {
            return Err(format!("Duplicate starting location name {:?}", a.name));
        }
    }
    Ok(origins)
}

/// POST the origin set to the recommendation proxy and return venues with
/// fresh ids, best first.
pub async fn fetch_round(origins: Vec<Origin>) -> Result<Vec<Venue>, String> {
    let request = match Request::new(api_root()).method(Method::Post).json(&origins) {
        Ok(request) => request,
        Err(err) => return Err(format!("{err:?}")),
    };
    let raw = match request.fetch().await {
        Ok(raw) => raw,
        Err(err) => return Err(format!("{err:?}")),
    };
    let resp = match raw.check_status() {
        Ok(resp) => resp,
        Err(status_err) => return Err(format!("{status_err:?}")),
    };
    let value = match resp.json::<Value>().await {
        Ok(value) => value,
        Err(err) => return Err(format!("{err:?}")),
    };
    extract_venues(value)
}

/// Pull the venue array out of the response (top-level array, or the first
/// array-valued field that parses), sort best-first and inject ids.
pub fn extract_venues(value: Value) -> Result<Vec<Venue>, String> {
    let candidates: Vec<Value> = match value {
        Value::Array(items) => vec![Value::Array(items)],
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        other => vec![other],
    };

    for candidate in candidates {
        if !candidate.is_array() {
            continue;
        }
        if let Ok(mut venues) = serde_json::from_value::<Vec<Venue>>(candidate) {
            // defensive: the proxy sorts, but tolerate unsorted input
            venues.sort_by(|a, b| {
                let a = a.total_score.unwrap_or(f64::NEG_INFINITY);
                let b = b.total_score.unwrap_or(f64::NEG_INFINITY);
                b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
            });
            for venue in &mut venues {
                venue.id = uuid::Uuid::new_v4().to_string();
            }
            return Ok(venues);
        }
    }
    Err("Planner response contained no venue list".to_string())
}
