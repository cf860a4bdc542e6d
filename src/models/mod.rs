//! Data models for the dashboard
//!
//! Metrics are the read-only results of subgraph queries; chart specifications are the
//! static bindings from those results to the six plots on the page.

pub mod chart;
pub mod metrics;

pub use chart::{ChartSpec, Series, Source, TraceKind, CHART_SPECS, PALETTE};
pub use metrics::{
    DailySnapshot, Entity, FactoryTotals, MetricsSnapshot, PairVolume, SnapshotSummary,
    TokenVolume,
};
