pub mod chart_service;
pub mod layout_service;
pub mod metrics_service;

pub use layout_service::Dashboard;
pub use metrics_service::{fetch_snapshot, FetchOptions};
