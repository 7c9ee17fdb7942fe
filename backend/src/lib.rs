pub mod config;
pub mod error;
pub mod ranking;
pub mod round;

use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::round::{leg_handler, round_handler};

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/round", post(round_handler))
        .route("/api/leg", post(leg_handler))
        .layer(cors)
        .with_state(state)
}
