use std::{net::SocketAddr, sync::Arc};

use backend::{config::Config, create_router, AppState};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse().with_env_fallbacks();
    if config.sample_mode() {
        tracing::info!("no plan target configured, serving the bundled sample round");
    }
    if config.routing_target.is_none() {
        tracing::info!("no routing target configured, legs will be unavailable");
    }

    let state = AppState {
        http: reqwest::Client::new(),
        config: Arc::new(config),
    };
    let app = create_router(state);

    let addr: SocketAddr = "0.0.0.0:8080".parse().expect("valid socket address");
    tracing::info!("starting backend on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}
