use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod server;
mod services;
mod utils;

use api::subgraph::SubgraphClient;
use config::Config;
use services::Dashboard;
use utils::DashboardError;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let mut filter = EnvFilter::from_default_env();
    for directive in ["uniswap_v2_dashboard=debug", "tower_http=info", "hyper=warn", "reqwest=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🦄 Starting Uniswap V2 dashboard...");

    if let Err(e) = run().await {
        error!("Dashboard failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), DashboardError> {
    let config = Config::from_env()?;
    info!(
        "Subgraph: {} (api key: {})",
        config.subgraph_url,
        if config.api_key.is_some() { "set" } else { "not set" }
    );

    let client = SubgraphClient::new(
        config.subgraph_url.clone(),
        config.api_key.clone(),
        config.request_timeout,
    )?;

    // Every query runs once, before the server starts
    let snapshot = services::fetch_snapshot(&client, config.fetch_options()).await?;

    info!("Building dashboard layout...");
    let dashboard = Dashboard::build(&snapshot)?;

    server::serve(server::AppState::new(dashboard), config.bind_addr()).await
}
