use plotters::prelude::*;
use tracing::debug;

use crate::api::subgraph::query::{self, QueryDescriptor};
use crate::models::{ChartSpec, Entity, MetricsSnapshot, Series, Source, TraceKind, PALETTE};
use crate::utils::{abbreviate, DashboardError};

/// Rendered chart size in pixels
pub const CHART_WIDTH: u32 = 640;
pub const CHART_HEIGHT: u32 = 400;

/// Upper bound on x tick labels so daily charts stay readable
const MAX_X_LABELS: usize = 8;

/// Descriptor whose rows feed a chart source. The selection does not depend on the row limit.
fn source_descriptor(source: Source) -> QueryDescriptor {
    match source {
        Source::Daily => query::daily_snapshots(1),
        Source::Pairs => query::top_pairs(1),
        Source::Tokens => query::top_tokens(1),
    }
}

/// Remote fields a chart field is computed from
fn remote_fields(field: &'static str) -> Vec<&'static str> {
    match field {
        "pairName" => vec!["token0.symbol", "token1.symbol"],
        "dateNorm" => vec!["date"],
        "dailyFeesUSD" => vec!["dailyVolumeUSD"],
        other => vec![other],
    }
}

/// Fail when a chart binds a field its source query never selects
fn check_selected(spec: &ChartSpec) -> Result<(), DashboardError> {
    let descriptor = source_descriptor(spec.source);
    for field in [spec.x_field, spec.y_field] {
        if !remote_fields(field).iter().all(|path| descriptor.requests(path)) {
            return Err(DashboardError::UnknownField {
                entity: descriptor.name,
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

/// Read the chart's x/y fields off every row of its source
pub fn extract_series(snapshot: &MetricsSnapshot, spec: &ChartSpec) -> Result<Series, DashboardError> {
    check_selected(spec)?;

    match spec.source {
        Source::Daily => series_from(&snapshot.daily, spec),
        Source::Pairs => series_from(&snapshot.pairs, spec),
        Source::Tokens => series_from(&snapshot.tokens, spec),
    }
}

fn series_from<E: Entity>(rows: &[E], spec: &ChartSpec) -> Result<Series, DashboardError> {
    let unknown = |field: &str| DashboardError::UnknownField {
        entity: E::NAME,
        field: field.to_string(),
    };

    let mut series = Series::default();
    for row in rows {
        let label = row.field(spec.x_field).ok_or_else(|| unknown(spec.x_field))?;
        let value = row
            .field(spec.y_field)
            .and_then(|v| v.as_number())
            .ok_or_else(|| unknown(spec.y_field))?;

        series.labels.push(label.as_label());
        series.values.push(value);
    }

    Ok(series)
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// Y range for a series: bars start at zero, lines get 10% padding around their extent
fn y_range(kind: TraceKind, values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let (low, high) = match kind {
        TraceKind::Bar => (min.min(0.0), max.max(0.0)),
        TraceKind::Line => {
            let padding = (max - min).abs().max(max.abs() * 0.05).max(1e-8) * 0.1;
            (min - padding, max + padding)
        }
    };

    if high > low {
        (low, high)
    } else {
        (low, low + 1.0)
    }
}

/// Render one chart to an SVG document
pub fn render_svg(spec: &ChartSpec, series: &Series, width: u32, height: u32) -> Result<String, DashboardError> {
    if series.is_empty() {
        return Err(DashboardError::Chart(format!("no data for '{}'", spec.title)));
    }

    let background = rgb(PALETTE.background);
    let axis_line = rgb(PALETTE.axis_line);
    let axis_text = rgb(PALETTE.axis_text);
    let trace = rgb(PALETTE.trace);

    let n = series.len() as u32;
    let (y_min, y_max) = y_range(spec.kind, &series.values);
    let label_step = series.len().div_ceil(MAX_X_LABELS).max(1);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&background)
            .map_err(|e| DashboardError::Chart(format!("Failed to fill canvas: {}", e)))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d((0u32..n).into_segmented(), y_min..y_max)
            .map_err(|e| DashboardError::Chart(format!("Failed to build chart: {}", e)))?;

        let x_formatter = |value: &SegmentValue<u32>| match value {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                let i = *i as usize;
                if i % label_step == 0 {
                    series.labels.get(i).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            }
            SegmentValue::Last => String::new(),
        };
        let y_formatter = |value: &f64| abbreviate(*value, 1);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .axis_style(axis_line)
            .bold_line_style(axis_line.mix(0.15))
            .light_line_style(TRANSPARENT)
            .x_labels(series.len() + 1)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .label_style(("sans-serif", 12).into_font().color(&axis_text))
            .axis_desc_style(("sans-serif", 14).into_font().color(&axis_text))
            .y_desc(spec.y_title)
            .draw()
            .map_err(|e| DashboardError::Chart(format!("Failed to draw mesh: {}", e)))?;

        match spec.kind {
            TraceKind::Bar => {
                let baseline = 0f64.max(y_min);
                chart
                    .draw_series(series.values.iter().enumerate().map(|(i, value)| {
                        let i = i as u32;
                        let mut bar = Rectangle::new(
                            [(SegmentValue::Exact(i), baseline), (SegmentValue::Exact(i + 1), *value)],
                            trace.filled(),
                        );
                        bar.set_margin(0, 0, 1, 1);
                        bar
                    }))
                    .map_err(|e| DashboardError::Chart(format!("Failed to draw bars: {}", e)))?;
            }
            TraceKind::Line => {
                chart
                    .draw_series(LineSeries::new(
                        series
                            .values
                            .iter()
                            .enumerate()
                            .map(|(i, value)| (SegmentValue::CenterOf(i as u32), *value)),
                        trace.stroke_width(2),
                    ))
                    .map_err(|e| DashboardError::Chart(format!("Failed to draw line: {}", e)))?;
            }
        }

        root.present()
            .map_err(|e| DashboardError::Chart(format!("Failed to render chart: {}", e)))?;
    }

    debug!("Rendered '{}' ({}) with {} points", spec.title, spec.trace_name, series.len());

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CHART_SPECS;

    fn spec(title: &str) -> ChartSpec {
        *CHART_SPECS.iter().find(|s| s.title == title).unwrap()
    }

    #[test]
    fn test_extract_daily_volume_series() {
        let snapshot = MetricsSnapshot::sample();
        let series = extract_series(&snapshot, &spec("Daily Trading Volume")).unwrap();

        assert_eq!(series.labels, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(series.values, vec![1_000_000.0, 1_500_000.0, 1_200_000.0]);
    }

    #[test]
    fn test_extract_top_pairs_and_tokens() {
        let snapshot = MetricsSnapshot::sample();

        let pairs = extract_series(&snapshot, &spec("Top Pairs by Volume (USD)")).unwrap();
        assert_eq!(pairs.labels, vec!["USDC-WETH", "WETH-USDT"]);
        assert_eq!(pairs.values, vec![90_000_000.0, 70_000_000.0]);

        let tokens = extract_series(&snapshot, &spec("Top Tokens by Volume (USD)")).unwrap();
        assert_eq!(tokens.labels, vec!["WETH", "USDC", "DAI"]);
    }

    #[test]
    fn test_every_chart_resolves_its_fields() {
        let snapshot = MetricsSnapshot::sample();
        for spec in CHART_SPECS.iter() {
            let series = extract_series(&snapshot, spec).unwrap();
            assert!(!series.is_empty(), "{} should have data", spec.title);
            assert_eq!(series.labels.len(), series.values.len());
        }
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let snapshot = MetricsSnapshot::sample();
        let mut bad = spec("Daily Liquidity");
        bad.y_field = "reserveETH";

        let err = extract_series(&snapshot, &bad).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownField { entity: "daily", ref field } if field == "reserveETH"));
    }

    #[test]
    fn test_every_chart_field_is_selected_by_its_query() {
        for spec in CHART_SPECS.iter() {
            assert!(check_selected(spec).is_ok(), "{} binds an unselected field", spec.title);
        }
    }

    #[test]
    fn test_field_missing_from_query_is_rejected_before_reading_rows() {
        // Empty rows would otherwise yield an empty series without touching the field
        let mut snapshot = MetricsSnapshot::sample();
        snapshot.tokens.clear();
        let mut bad = spec("Top Tokens by Volume (USD)");
        bad.x_field = "name";

        let err = extract_series(&snapshot, &bad).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownField { entity: "tokens", ref field } if field == "name"));
    }

    #[test]
    fn test_synthetic_fields_map_to_their_inputs() {
        assert_eq!(remote_fields("pairName"), vec!["token0.symbol", "token1.symbol"]);
        assert_eq!(remote_fields("dateNorm"), vec!["date"]);
        assert_eq!(remote_fields("dailyFeesUSD"), vec!["dailyVolumeUSD"]);
        assert_eq!(remote_fields("volumeUSD"), vec!["volumeUSD"]);
    }

    #[test]
    fn test_text_field_as_y_is_an_error() {
        let snapshot = MetricsSnapshot::sample();
        let mut bad = spec("Top Pairs by Volume (USD)");
        bad.y_field = "pairName";

        assert!(extract_series(&snapshot, &bad).is_err());
    }

    #[test]
    fn test_y_range() {
        assert_eq!(y_range(TraceKind::Bar, &[5.0, 10.0]), (0.0, 10.0));
        assert_eq!(y_range(TraceKind::Bar, &[0.0, 0.0]), (0.0, 1.0));

        let (low, high) = y_range(TraceKind::Line, &[100.0, 200.0]);
        assert!(low < 100.0 && low > 80.0);
        assert!(high > 200.0 && high < 220.0);

        let (low, high) = y_range(TraceKind::Line, &[50.0]);
        assert!(low < 50.0 && high > 50.0);
    }

    #[test]
    fn test_render_bar_and_line_svg() {
        let snapshot = MetricsSnapshot::sample();

        for title in ["Daily Trading Volume", "Daily Liquidity"] {
            let spec = spec(title);
            let series = extract_series(&snapshot, &spec).unwrap();
            let svg = render_svg(&spec, &series, CHART_WIDTH, CHART_HEIGHT).unwrap();

            assert!(svg.contains("<svg"), "{} should render an svg document", title);
            assert!(svg.contains(spec.y_title));
            assert!(svg.contains("2024-01-01"));
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let snapshot = MetricsSnapshot::sample();
        let spec = spec("Top Tokens by Volume (USD)");
        let series = extract_series(&snapshot, &spec).unwrap();

        let first = render_svg(&spec, &series, CHART_WIDTH, CHART_HEIGHT).unwrap();
        let second = render_svg(&spec, &series, CHART_WIDTH, CHART_HEIGHT).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_empty_series_is_an_error() {
        let spec = spec("Daily Trading Fees");
        let err = render_svg(&spec, &Series::default(), CHART_WIDTH, CHART_HEIGHT).unwrap_err();
        assert!(matches!(err, DashboardError::Chart(_)));
    }
}
