use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::services::FetchOptions;
use crate::utils::ConfigError;

pub const DEFAULT_SUBGRAPH_URL: &str = "https://api.thegraph.com/subgraphs/name/uniswap/uniswap-v2";
const DEFAULT_PORT: u16 = 8050;
const DEFAULT_DAILY_WINDOW_DAYS: u32 = 365;
const DEFAULT_TOP_N: u32 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Largest `first` argument the subgraph accepts
pub const MAX_QUERY_ROWS: u32 = 1000;

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub subgraph_url: String,
    pub api_key: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub daily_window_days: u32,
    pub top_n: u32,
    pub request_timeout: Duration,
}

impl Config {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let subgraph_url = get("SUBGRAPH_URL").unwrap_or_else(|| DEFAULT_SUBGRAPH_URL.to_string());
        if !(subgraph_url.starts_with("http://") || subgraph_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "SUBGRAPH_URL",
                value: subgraph_url,
                reason: "must be an http(s) URL".to_string(),
            });
        }

        let daily_window_days = parse_or("DAILY_WINDOW_DAYS", get("DAILY_WINDOW_DAYS"), DEFAULT_DAILY_WINDOW_DAYS)?;
        let top_n = parse_or("TOP_N", get("TOP_N"), DEFAULT_TOP_N)?;
        for (key, value) in [("DAILY_WINDOW_DAYS", daily_window_days), ("TOP_N", top_n)] {
            if value == 0 || value > MAX_QUERY_ROWS {
                return Err(ConfigError::Invalid {
                    key,
                    value: value.to_string(),
                    reason: format!("must be between 1 and {}", MAX_QUERY_ROWS),
                });
            }
        }

        let timeout_secs = parse_or("REQUEST_TIMEOUT_SECS", get("REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Config {
            subgraph_url,
            api_key: get("GRAPH_API_KEY"),
            host: parse_or("DASHBOARD_HOST", get("DASHBOARD_HOST"), IpAddr::V4(Ipv4Addr::LOCALHOST))?,
            port: parse_or("DASHBOARD_PORT", get("DASHBOARD_PORT"), DEFAULT_PORT)?,
            daily_window_days,
            top_n,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            top_n: self.top_n,
            daily_window_days: self.daily_window_days,
        }
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.subgraph_url, DEFAULT_SUBGRAPH_URL);
        assert_eq!(config.api_key, None);
        assert_eq!(config.bind_addr().to_string(), format!("127.0.0.1:{}", DEFAULT_PORT));
        assert_eq!(config.daily_window_days, 365);
        assert_eq!(config.top_n, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SUBGRAPH_URL", "https://gateway.thegraph.com/api/subgraphs/id/abc"),
            ("GRAPH_API_KEY", " key123 "),
            ("DASHBOARD_HOST", "0.0.0.0"),
            ("DASHBOARD_PORT", "9000"),
            ("DAILY_WINDOW_DAYS", "30"),
            ("TOP_N", "5"),
            ("REQUEST_TIMEOUT_SECS", "10"),
        ])
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("key123"));
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(config.fetch_options().daily_window_days, 30);
        assert_eq!(config.fetch_options().top_n, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = load(&[("GRAPH_API_KEY", "   "), ("DASHBOARD_PORT", "")]).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = load(&[("DASHBOARD_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DASHBOARD_PORT", .. }));

        let err = load(&[("TOP_N", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TOP_N", .. }));

        let err = load(&[("SUBGRAPH_URL", "ftp://example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SUBGRAPH_URL", .. }));
    }

    #[test]
    fn test_row_limits_are_capped() {
        let config = load(&[("TOP_N", "1000"), ("DAILY_WINDOW_DAYS", "1000")]).unwrap();
        assert_eq!(config.top_n, MAX_QUERY_ROWS);
        assert_eq!(config.daily_window_days, MAX_QUERY_ROWS);

        let err = load(&[("DAILY_WINDOW_DAYS", "1001")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DAILY_WINDOW_DAYS", .. }));

        let err = load(&[("TOP_N", "5000")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TOP_N", ref reason, .. } if reason.contains("1000")));
    }
}
