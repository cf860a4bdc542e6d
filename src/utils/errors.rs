use thiserror::Error;

use crate::api::subgraph::SubgraphError;

/// Invalid or unparsable configuration value
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Top-level error for building and serving the dashboard
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Subgraph query failed: {0}")]
    Subgraph(#[from] SubgraphError),
    #[error("Unknown field '{field}' on {entity}")]
    UnknownField { entity: &'static str, field: String },
    #[error("Chart rendering failed: {0}")]
    Chart(String),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
