use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use armplan::config::{ArmConfig, PlannerConfig, ServerConfig};
use armplan::pipeline::TrajectoryPipeline;
use armplan::planner::GeminiPlanner;
use armplan::server::Server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("armplan=info")),
        )
        .init();

    let planner_config = PlannerConfig::default();
    if planner_config.api_key.trim().is_empty() {
        tracing::warn!("no planner API key configured; /api/plan requests will fail");
    }

    let planner = Arc::new(GeminiPlanner::new(planner_config)?);
    let pipeline = Arc::new(TrajectoryPipeline::new(ArmConfig::default(), planner));

    let server = Server::start(ServerConfig::default(), pipeline).await?;
    tracing::info!(addr = %server.addr(), "armplan server ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    Ok(())
}
