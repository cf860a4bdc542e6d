use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Request body for a GraphQL POST
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest<'a> {
    pub query: &'a str,
}

/// GraphQL response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse {
    pub data: Option<serde_json::Value>,
    pub errors: Option<Vec<GraphQLErrorEntry>>,
}

/// One entry of the `errors` array
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLErrorEntry {
    pub message: String,
}

/// `uniswapFactory` aggregates
#[derive(Debug, Clone, Deserialize)]
pub struct RawFactory {
    #[serde(rename = "totalVolumeUSD", deserialize_with = "de_number")]
    pub total_volume_usd: f64,
    #[serde(rename = "totalLiquidityUSD", deserialize_with = "de_number")]
    pub total_liquidity_usd: f64,
    #[serde(rename = "txCount", deserialize_with = "de_number")]
    pub tx_count: f64,
}

/// Token reference nested inside a pair
#[derive(Debug, Clone, Deserialize)]
pub struct RawTokenRef {
    pub symbol: String,
}

/// `pairs` row
#[derive(Debug, Clone, Deserialize)]
pub struct RawPair {
    pub token0: RawTokenRef,
    pub token1: RawTokenRef,
    #[serde(rename = "volumeUSD", deserialize_with = "de_number")]
    pub volume_usd: f64,
}

/// `tokens` row
#[derive(Debug, Clone, Deserialize)]
pub struct RawToken {
    pub symbol: String,
    #[serde(rename = "tradeVolumeUSD", deserialize_with = "de_number")]
    pub trade_volume_usd: f64,
}

/// `uniswapDayDatas` row
#[derive(Debug, Clone, Deserialize)]
pub struct RawDayData {
    /// Unix timestamp (seconds) of the start of the UTC day
    pub date: i64,
    #[serde(rename = "dailyVolumeUSD", deserialize_with = "de_number")]
    pub daily_volume_usd: f64,
    #[serde(rename = "totalLiquidityUSD", deserialize_with = "de_number")]
    pub total_liquidity_usd: f64,
    #[serde(rename = "txCount", deserialize_with = "de_number")]
    pub tx_count: f64,
}

/// BigDecimal and BigInt fields arrive as JSON strings; plain numbers are accepted too
fn de_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid number '{}': {}", s, e))),
    }
}

/// Errors returned by the subgraph client
#[derive(Debug, Clone, Error)]
pub enum SubgraphError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 401 Unauthorized (missing or invalid gateway key)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 403 Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// 404 Not Found (unknown subgraph)
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 429 Too Many Requests
    #[error("Rate Limited. Retry after {retry_after} s")]
    RateLimited { retry_after: u64 },
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Payload did not match the expected shape
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
    /// The response carried a GraphQL `errors` array
    #[error("GraphQL Error: {}", .0.join("; "))]
    GraphQL(Vec<String>),
    /// Root field was null or absent
    #[error("Missing entity: {0}")]
    MissingEntity(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_factory_parses_string_numbers() {
        let factory: RawFactory = serde_json::from_value(json!({
            "totalVolumeUSD": "1234567.891",
            "totalLiquidityUSD": "987654.5",
            "txCount": "42"
        }))
        .unwrap();

        assert_eq!(factory.total_volume_usd, 1234567.891);
        assert_eq!(factory.total_liquidity_usd, 987654.5);
        assert_eq!(factory.tx_count, 42.0);
    }

    #[test]
    fn test_day_data_accepts_plain_numbers() {
        let day: RawDayData = serde_json::from_value(json!({
            "date": 1_700_000_000,
            "dailyVolumeUSD": 1500.25,
            "totalLiquidityUSD": "2000",
            "txCount": 7
        }))
        .unwrap();

        assert_eq!(day.date, 1_700_000_000);
        assert_eq!(day.daily_volume_usd, 1500.25);
        assert_eq!(day.tx_count, 7.0);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result: Result<RawToken, _> = serde_json::from_value(json!({
            "symbol": "WETH",
            "tradeVolumeUSD": "lots"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_graphql_error_display_joins_messages() {
        let err = SubgraphError::GraphQL(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(err.to_string(), "GraphQL Error: first; second");
    }
}
