pub mod errors;
pub mod format;
pub mod html;

#[cfg(test)]
pub mod test_server;

pub use errors::{ConfigError, DashboardError};
pub use format::{abbreviate, usd};
pub use html::{Node, Style};
