//! Client for the driving-leg relay. A failed fetch is absorbed into `None`
//! so the overlay keeps the synthetic arc instead of surfacing an error.

use seed::prelude::*;
use shared::{LegRequest, LegResponse};

fn leg_url() -> String {
    if let Some(url) = option_env!("FRONTEND_LEG_URL") {
        return url.trim_end_matches('/').to_string();
    }
    "http://localhost:8080/api/leg".to_string()
}

pub async fn fetch_leg(leg: LegRequest) -> Option<LegResponse> {
    let request = match Request::new(leg_url()).method(Method::Post).json(&leg) {
        Ok(request) => request,
        Err(err) => {
            crate::debug_log(&format!("leg request build failed: {err:?}"));
            return None;
        }
    };
    let raw = match request.fetch().await {
        Ok(raw) => raw,
        Err(err) => {
            crate::debug_log(&format!("leg fetch failed: {err:?}"));
            return None;
        }
    };
    let resp = match raw.check_status() {
        Ok(resp) => resp,
        Err(status_err) => {
            crate::debug_log(&format!("leg fetch rejected: {status_err:?}"));
            return None;
        }
    };
    match resp.json::<LegResponse>().await {
        Ok(leg) => Some(leg),
        Err(err) => {
            crate::debug_log(&format!("leg response undecodable: {err:?}"));
            None
        }
    }
}
