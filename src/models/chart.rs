//! Chart specifications

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    Bar,
    Line,
}

/// Which query descriptor a chart reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Daily,
    Pairs,
    Tokens,
}

/// Binding of two fields of one source to a trace, plus its fixed presentation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSpec {
    /// Card header text
    pub title: &'static str,
    pub trace_name: &'static str,
    pub kind: TraceKind,
    pub source: Source,
    pub x_field: &'static str,
    pub y_field: &'static str,
    pub y_title: &'static str,
}

/// Colours shared by every chart, as `(r, g, b)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: (u8, u8, u8),
    pub axis_line: (u8, u8, u8),
    pub axis_text: (u8, u8, u8),
    pub trace: (u8, u8, u8),
}

/// Lavender panels with purple axis lines and a blue trace
pub const PALETTE: Palette = Palette {
    background: (0xe8, 0xda, 0xef),
    axis_line: (0x6c, 0x34, 0x83),
    axis_text: (0x00, 0x00, 0x00),
    trace: (0x63, 0x6e, 0xfa),
};

/// The six charts, in page order
pub const CHART_SPECS: [ChartSpec; 6] = [
    ChartSpec {
        title: "Daily Trading Volume",
        trace_name: "daily trading volume",
        kind: TraceKind::Bar,
        source: Source::Daily,
        x_field: "dateNorm",
        y_field: "dailyVolumeUSD",
        y_title: "Trading Volume (USD)",
    },
    ChartSpec {
        title: "Daily Liquidity",
        trace_name: "daily liquidity",
        kind: TraceKind::Line,
        source: Source::Daily,
        x_field: "dateNorm",
        y_field: "totalLiquidityUSD",
        y_title: "Total Value Locked (USD)",
    },
    ChartSpec {
        title: "Daily Trading Fees",
        trace_name: "daily fees",
        kind: TraceKind::Line,
        source: Source::Daily,
        x_field: "dateNorm",
        y_field: "dailyFeesUSD",
        y_title: "Fees (USD)",
    },
    ChartSpec {
        title: "Cumulative Transactions (Swaps, Add and Remove Liquidity)",
        trace_name: "transaction count",
        kind: TraceKind::Bar,
        source: Source::Daily,
        x_field: "dateNorm",
        y_field: "txCount",
        y_title: "Transactions",
    },
    ChartSpec {
        title: "Top Pairs by Volume (USD)",
        trace_name: "top pairs",
        kind: TraceKind::Bar,
        source: Source::Pairs,
        x_field: "pairName",
        y_field: "volumeUSD",
        y_title: "Trading Volume (USD)",
    },
    ChartSpec {
        title: "Top Tokens by Volume (USD)",
        trace_name: "top tokens",
        kind: TraceKind::Bar,
        source: Source::Tokens,
        x_field: "symbol",
        y_field: "tradeVolumeUSD",
        y_title: "Trading Volume (USD)",
    },
];

/// Values extracted for one chart, labels and values index-aligned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_bindings() {
        let bindings: Vec<(&str, Source, &str, &str, TraceKind)> = CHART_SPECS
            .iter()
            .map(|s| (s.title, s.source, s.x_field, s.y_field, s.kind))
            .collect();

        assert_eq!(
            bindings,
            vec![
                ("Daily Trading Volume", Source::Daily, "dateNorm", "dailyVolumeUSD", TraceKind::Bar),
                ("Daily Liquidity", Source::Daily, "dateNorm", "totalLiquidityUSD", TraceKind::Line),
                ("Daily Trading Fees", Source::Daily, "dateNorm", "dailyFeesUSD", TraceKind::Line),
                (
                    "Cumulative Transactions (Swaps, Add and Remove Liquidity)",
                    Source::Daily,
                    "dateNorm",
                    "txCount",
                    TraceKind::Bar
                ),
                ("Top Pairs by Volume (USD)", Source::Pairs, "pairName", "volumeUSD", TraceKind::Bar),
                ("Top Tokens by Volume (USD)", Source::Tokens, "symbol", "tradeVolumeUSD", TraceKind::Bar),
            ]
        );
    }

    #[test]
    fn test_chart_titles_are_unique() {
        for (i, a) in CHART_SPECS.iter().enumerate() {
            for b in CHART_SPECS.iter().skip(i + 1) {
                assert_ne!(a.title, b.title);
            }
        }
    }
}
