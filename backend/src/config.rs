use clap::Parser;

/// Runtime configuration for the planner proxy.
///
/// Without `--plan-target` the round endpoint serves the bundled sample
/// round, which is enough for frontend work offline. Without
/// `--routing-target` the leg endpoint reports the routing service as
/// unavailable and the frontend keeps its synthetic arcs.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Proxy between the planner frontend and the recommendation/routing services"
)]
pub struct Config {
    /// Upstream venue recommendation endpoint
    #[arg(long)]
    pub plan_target: Option<String>,

    /// Upstream driving-leg endpoint (Routes API compatible)
    #[arg(long)]
    pub routing_target: Option<String>,

    /// API key sent to the routing service
    #[arg(long)]
    pub routing_api_key: Option<String>,

    /// Maximum venues returned per round
    #[arg(long, default_value_t = 5)]
    pub result_cap: usize,
}

impl Config {
    /// CLI flags win; absent flags fall back to the environment.
    pub fn with_env_fallbacks(mut self) -> Self {
        if self.plan_target.is_none() {
            self.plan_target = std::env::var("PLAN_TARGET").ok();
        }
        if self.routing_target.is_none() {
            self.routing_target = std::env::var("ROUTING_TARGET").ok();
        }
        if self.routing_api_key.is_none() {
            self.routing_api_key = std::env::var("ROUTING_API_KEY").ok();
        }
        self
    }

    pub fn sample_mode(&self) -> bool {
        self.plan_target.is_none()
    }
}
