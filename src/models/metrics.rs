//! Protocol metrics fetched from the subgraph

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A field value read off an entity by name
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Text form used for axis labels
    pub fn as_label(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

/// Field access by subgraph field name, including synthetic fields
pub trait Entity {
    /// Entity name used in error messages
    const NAME: &'static str;

    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Protocol-wide totals from the factory entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactoryTotals {
    pub total_volume_usd: f64,
    pub total_liquidity_usd: f64,
    pub tx_count: f64,
}

impl Entity for FactoryTotals {
    const NAME: &'static str = "factory";

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "totalVolumeUSD" => Some(FieldValue::Number(self.total_volume_usd)),
            "totalLiquidityUSD" => Some(FieldValue::Number(self.total_liquidity_usd)),
            "txCount" => Some(FieldValue::Number(self.tx_count)),
            _ => None,
        }
    }
}

/// A trading pair with its all-time volume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairVolume {
    /// `TOKEN0-TOKEN1`
    pub pair_name: String,
    pub volume_usd: f64,
}

impl Entity for PairVolume {
    const NAME: &'static str = "pairs";

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "pairName" => Some(FieldValue::Text(self.pair_name.clone())),
            "volumeUSD" => Some(FieldValue::Number(self.volume_usd)),
            _ => None,
        }
    }
}

/// A token with its all-time trade volume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenVolume {
    pub symbol: String,
    pub trade_volume_usd: f64,
}

impl Entity for TokenVolume {
    const NAME: &'static str = "tokens";

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "symbol" => Some(FieldValue::Text(self.symbol.clone())),
            "tradeVolumeUSD" => Some(FieldValue::Number(self.trade_volume_usd)),
            _ => None,
        }
    }
}

/// One UTC day of protocol activity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySnapshot {
    pub date: i64,
    /// `YYYY-MM-DD`
    pub date_norm: String,
    pub daily_volume_usd: f64,
    pub total_liquidity_usd: f64,
    pub daily_fees_usd: f64,
    /// Cumulative transaction count at the end of the day
    pub tx_count: f64,
}

impl Entity for DailySnapshot {
    const NAME: &'static str = "daily";

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "date" => Some(FieldValue::Number(self.date as f64)),
            "dateNorm" => Some(FieldValue::Text(self.date_norm.clone())),
            "dailyVolumeUSD" => Some(FieldValue::Number(self.daily_volume_usd)),
            "totalLiquidityUSD" => Some(FieldValue::Number(self.total_liquidity_usd)),
            "dailyFeesUSD" => Some(FieldValue::Number(self.daily_fees_usd)),
            "txCount" => Some(FieldValue::Number(self.tx_count)),
            _ => None,
        }
    }
}

/// Everything the dashboard shows, fetched once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub factory: FactoryTotals,
    /// Ranked by volume, highest first
    pub pairs: Vec<PairVolume>,
    /// Ranked by volume, highest first
    pub tokens: Vec<TokenVolume>,
    /// Oldest day first
    pub daily: Vec<DailySnapshot>,
    pub fetched_at: DateTime<Utc>,
}

/// Row counts and fetch time reported by the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSummary {
    pub pairs: usize,
    pub tokens: usize,
    pub days: usize,
    pub first_day: Option<String>,
    pub last_day: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl MetricsSnapshot {
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            pairs: self.pairs.len(),
            tokens: self.tokens.len(),
            days: self.daily.len(),
            first_day: self.daily.first().map(|d| d.date_norm.clone()),
            last_day: self.daily.last().map(|d| d.date_norm.clone()),
            fetched_at: self.fetched_at,
        }
    }

    /// Fixed snapshot for tests
    #[cfg(test)]
    pub fn sample() -> Self {
        use chrono::TimeZone;

        let day = |date: i64, date_norm: &str, volume: f64, liquidity: f64, tx_count: f64| DailySnapshot {
            date,
            date_norm: date_norm.to_string(),
            daily_volume_usd: volume,
            total_liquidity_usd: liquidity,
            daily_fees_usd: volume * 0.003,
            tx_count,
        };

        MetricsSnapshot {
            factory: FactoryTotals {
                total_volume_usd: 1_234_567.0,
                total_liquidity_usd: 3_450_000_000.0,
                tx_count: 42_500_000.0,
            },
            pairs: vec![
                PairVolume { pair_name: "USDC-WETH".to_string(), volume_usd: 90_000_000.0 },
                PairVolume { pair_name: "WETH-USDT".to_string(), volume_usd: 70_000_000.0 },
            ],
            tokens: vec![
                TokenVolume { symbol: "WETH".to_string(), trade_volume_usd: 200_000_000.0 },
                TokenVolume { symbol: "USDC".to_string(), trade_volume_usd: 150_000_000.0 },
                TokenVolume { symbol: "DAI".to_string(), trade_volume_usd: 50_000_000.0 },
            ],
            daily: vec![
                day(1_704_067_200, "2024-01-01", 1_000_000.0, 2_000_000_000.0, 100.0),
                day(1_704_153_600, "2024-01-02", 1_500_000.0, 2_100_000_000.0, 180.0),
                day(1_704_240_000, "2024-01-03", 1_200_000.0, 2_050_000_000.0, 250.0),
            ],
            fetched_at: Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_fields_by_name() {
        let snapshot = MetricsSnapshot::sample();
        let day = &snapshot.daily[0];

        assert_eq!(day.field("dateNorm"), Some(FieldValue::Text("2024-01-01".to_string())));
        assert_eq!(day.field("dailyVolumeUSD"), Some(FieldValue::Number(1_000_000.0)));
        assert_eq!(day.field("dailyFeesUSD"), Some(FieldValue::Number(3_000.0)));
        assert_eq!(day.field("reserveUSD"), None);
    }

    #[test]
    fn test_pair_and_token_fields_by_name() {
        let snapshot = MetricsSnapshot::sample();

        assert_eq!(
            snapshot.pairs[0].field("pairName").map(|v| v.as_label()),
            Some("USDC-WETH".to_string())
        );
        assert_eq!(
            snapshot.tokens[2].field("tradeVolumeUSD").and_then(|v| v.as_number()),
            Some(50_000_000.0)
        );
        assert_eq!(snapshot.factory.field("txCount"), Some(FieldValue::Number(42_500_000.0)));
    }

    #[test]
    fn test_summary_reports_counts_and_range() {
        let summary = MetricsSnapshot::sample().summary();

        assert_eq!(summary.pairs, 2);
        assert_eq!(summary.tokens, 3);
        assert_eq!(summary.days, 3);
        assert_eq!(summary.first_day.as_deref(), Some("2024-01-01"));
        assert_eq!(summary.last_day.as_deref(), Some("2024-01-03"));
    }
}
