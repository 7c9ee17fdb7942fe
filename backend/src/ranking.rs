//! Venue ranking applied to recommendation payloads before they reach the
//! browser. The payload is treated as opaque JSON apart from the score, so
//! planner schema drift does not break the proxy.

use serde_json::Value;

/// Sort every venue array in the payload best-first and cap its length.
///
/// An array qualifies when it is non-empty and every element is an object
/// carrying a score; it may sit at the root or directly under a top-level
/// field. Anything else passes through untouched.
pub fn rank_round(value: &mut Value, cap: usize) {
    match value {
        Value::Array(items) => rank_array(items, cap),
        Value::Object(map) => {
            for field in map.values_mut() {
                if let Value::Array(items) = field {
                    rank_array(items, cap);
                }
            }
        }
        _ => {}
    }
}

fn rank_array(items: &mut Vec<Value>, cap: usize) {
    if items.is_empty() || !items.iter().all(|item| score_of(item).is_some()) {
        return;
    }
    items.sort_by(|a, b| {
        let a = score_of(a).unwrap_or(f64::NEG_INFINITY);
        let b = score_of(b).unwrap_or(f64::NEG_INFINITY);
        b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
    });
    items.truncate(cap);
}

/// Score of one venue object. Planners have emitted both snake and camel
/// case, and numbers as strings.
fn score_of(item: &Value) -> Option<f64> {
    let object = item.as_object()?;
    let raw = object.get("total_score").or_else(|| object.get("totalScore"))?;
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
