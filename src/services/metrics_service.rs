use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::api::subgraph::{query, RawDayData, RawFactory, RawPair, RawToken, SubgraphClient, SubgraphError};
use crate::models::{DailySnapshot, FactoryTotals, MetricsSnapshot, PairVolume, TokenVolume};

/// Uniswap V2 charges a flat 0.30% fee on every swap
pub const SWAP_FEE_RATE: f64 = 0.003;

/// How much history and how many ranked rows to fetch
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub top_n: u32,
    pub daily_window_days: u32,
}

/// Run every dashboard query, one after another, and collect the results
pub async fn fetch_snapshot(
    client: &SubgraphClient,
    options: FetchOptions,
) -> Result<MetricsSnapshot, SubgraphError> {
    info!("📡 Querying subgraph at {}", client.endpoint());

    let factory: RawFactory = client.fetch_one(&query::factory()).await?;
    let pairs: Vec<RawPair> = client.fetch_list(&query::top_pairs(options.top_n)).await?;
    let tokens: Vec<RawToken> = client.fetch_list(&query::top_tokens(options.top_n)).await?;
    let days: Vec<RawDayData> = client
        .fetch_list(&query::daily_snapshots(options.daily_window_days))
        .await?;

    if pairs.is_empty() {
        warn!("Subgraph returned no pairs, top pair card will show a placeholder");
    }

    let snapshot = MetricsSnapshot {
        factory: factory_totals(factory),
        pairs: pairs.into_iter().map(pair_volume).collect(),
        tokens: tokens.into_iter().map(token_volume).collect(),
        daily: daily_series(days),
        fetched_at: Utc::now(),
    };

    info!(
        "✅ Fetched {} pairs, {} tokens, {} days",
        snapshot.pairs.len(),
        snapshot.tokens.len(),
        snapshot.daily.len()
    );

    Ok(snapshot)
}

fn factory_totals(raw: RawFactory) -> FactoryTotals {
    FactoryTotals {
        total_volume_usd: raw.total_volume_usd,
        total_liquidity_usd: raw.total_liquidity_usd,
        tx_count: raw.tx_count,
    }
}

fn pair_volume(raw: RawPair) -> PairVolume {
    PairVolume {
        pair_name: format!("{}-{}", raw.token0.symbol, raw.token1.symbol),
        volume_usd: raw.volume_usd,
    }
}

fn token_volume(raw: RawToken) -> TokenVolume {
    TokenVolume {
        symbol: raw.symbol,
        trade_volume_usd: raw.trade_volume_usd,
    }
}

/// Newest-first rows from the subgraph, returned oldest-first for plotting
fn daily_series(raw: Vec<RawDayData>) -> Vec<DailySnapshot> {
    let mut days: Vec<DailySnapshot> = raw
        .into_iter()
        .map(|day| DailySnapshot {
            date: day.date,
            date_norm: normalize_date(day.date),
            daily_volume_usd: day.daily_volume_usd,
            total_liquidity_usd: day.total_liquidity_usd,
            daily_fees_usd: day.daily_volume_usd * SWAP_FEE_RATE,
            tx_count: day.tx_count,
        })
        .collect();

    days.sort_by_key(|d| d.date);
    days
}

/// Unix seconds to a `YYYY-MM-DD` UTC date
pub fn normalize_date(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
