use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("upstream returned a malformed payload: {0}")]
    Malformed(String),
    #[error("no routing service configured")]
    RoutingUnconfigured,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> axum::response::Response {
        tracing::warn!("proxy error: {self}");
        let body = Json(shared::ApiError {
            message: self.to_string(),
        });
        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}
