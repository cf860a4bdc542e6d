use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Json};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::services::Dashboard;
use crate::utils::DashboardError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }
}

/// Routes for the dashboard page and health check
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process exits
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), DashboardError> {
    info!("Registering routes:");
    info!("  GET /");
    info!("  GET /health");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Dashboard running at http://{}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// Render the page from the startup snapshot
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.dashboard.render())
}

async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "snapshot": state.dashboard.summary(),
    }))
}
