//! Page layout
//!
//! Builds the dashboard component tree from a metrics snapshot. The tree is built once
//! at startup and rendered to HTML on every request.

use tracing::{debug, warn};

use crate::models::{ChartSpec, MetricsSnapshot, SnapshotSummary, CHART_SPECS};
use crate::services::chart_service::{self, CHART_HEIGHT, CHART_WIDTH};
use crate::utils::{abbreviate, usd, DashboardError, Node, Style};

/// Bootswatch "Pulse" theme for Bootstrap 5
pub const THEME_STYLESHEET: &str = "https://cdn.jsdelivr.net/npm/bootswatch@5.3.3/dist/pulse/bootstrap.min.css";

pub const PAGE_TITLE: &str = "Uniswap V2 Overview";

/// Shown on the top pair card when the subgraph returns no pairs
pub const NO_PAIR_PLACEHOLDER: &str = "N/A";

const INTRO_PARAGRAPHS: [&str; 2] = [
    "Uniswap is a decentralized exchange (DEX) and automated market making (AMM) protocol that allows for the trading \
     of digital assets. The protocol uses a set of smart contracts to create liquidity pools and swap assets. \
     Reserves and prices are updated every time a trade is made by way of a constant product formula. \
     All of these eliminate the need for central intermediaries.",
    "This dashboard will focus on an overview of Uniswap v2 on Ethereum-Mainnet, looking at things like trade volume, \
     total value locked, and activity levels over the last year.",
];

const PANEL_COLOR: &str = "#e8daef";
const HEADER_TEXT_COLOR: &str = "#17202a";

/// Column widths at the xs, sm, md, lg and xl breakpoints
#[derive(Debug, Clone, Copy)]
struct Widths(u8, u8, u8, u8, u8);

const HEADLINE_WIDTHS: Widths = Widths(12, 12, 12, 3, 3);
const CHART_WIDTHS: Widths = Widths(12, 12, 12, 6, 6);

/// Title and display value of one headline card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: &'static str,
    pub value: String,
}

/// The four headline cards, in page order
pub fn headlines(snapshot: &MetricsSnapshot) -> [Headline; 4] {
    let top_pair = match snapshot.pairs.first() {
        Some(pair) => pair.pair_name.clone(),
        None => NO_PAIR_PLACEHOLDER.to_string(),
    };

    [
        Headline {
            title: "Total Trading Volume (USD)",
            value: usd(snapshot.factory.total_volume_usd),
        },
        Headline {
            title: "Total Value Locked (USD)",
            value: usd(snapshot.factory.total_liquidity_usd),
        },
        Headline {
            title: "Transactions",
            value: abbreviate(snapshot.factory.tx_count, 2),
        },
        Headline {
            title: "Top Trading Pair",
            value: top_pair,
        },
    ]
}

fn container(children: Vec<Node>) -> Node {
    Node::element("div").class("container-fluid").children(children)
}

fn row(padding: &str, children: Vec<Node>) -> Node {
    Node::element("div")
        .class("row")
        .style(Style::new().set("padding", padding))
        .children(children)
}

fn col(widths: Option<Widths>, children: Vec<Node>) -> Node {
    let node = Node::element("div");
    let node = match widths {
        Some(Widths(xs, sm, md, lg, xl)) => node
            .class(format!("col-{}", xs))
            .class(format!("col-sm-{}", sm))
            .class(format!("col-md-{}", md))
            .class(format!("col-lg-{}", lg))
            .class(format!("col-xl-{}", xl)),
        None => node.class("col"),
    };
    node.children(children)
}

/// Card colour: a theme colour name becomes a class, anything else an inline background
enum CardColor {
    Theme(&'static str),
    Custom(&'static str),
}

fn card(color: Option<CardColor>, style: Style, children: Vec<Node>) -> Node {
    let node = Node::element("div").class("card");
    let (node, style) = match color {
        Some(CardColor::Theme(name)) => (node.class(format!("bg-{}", name)), style),
        Some(CardColor::Custom(value)) => (node, style.set("background-color", value)),
        None => (node, style),
    };
    node.style(style).children(children)
}

fn card_body(children: Vec<Node>) -> Node {
    Node::element("div").class("card-body").children(children)
}

fn text_element(tag: &'static str, text: &str, style: Style) -> Node {
    Node::element(tag).style(style).child(Node::text(text))
}

fn title_row() -> Node {
    let label = Node::element("label")
        .class("form-label")
        .style(
            Style::new()
                .set("font-style", "normal")
                .set("font-weight", "600")
                .set("font-size", "64px")
                .set("line-height", "96px"),
        )
        .child(Node::text(PAGE_TITLE));

    row("2px", vec![col(None, vec![label])])
}

fn intro_row() -> Node {
    let paragraph_style = || {
        Style::new()
            .set("font-style", "normal")
            .set("font-weight", "400")
            .set("font-size", "20px")
    };
    let paragraphs = INTRO_PARAGRAPHS
        .iter()
        .map(|text| text_element("p", text, paragraph_style()))
        .collect();

    row("1px", vec![col(None, vec![card_body(paragraphs)])])
}

fn headline_card(headline: &Headline) -> Node {
    let heading = text_element(
        "h4",
        headline.title,
        Style::new().set("color", "#FFFFFF").set("text-align", "center"),
    );
    let value = text_element(
        "h1",
        &headline.value,
        Style::new().set("text-align", "center").set("color", "#FFFFFF"),
    );

    col(
        Some(HEADLINE_WIDTHS),
        vec![card(Some(CardColor::Theme("primary")), Style::new(), vec![card_body(vec![heading, value])])],
    )
}

fn chart_card(spec: &ChartSpec, snapshot: &MetricsSnapshot) -> Result<Node, DashboardError> {
    let header = Node::element("div")
        .class("card-header")
        .style(
            Style::new()
                .set("color", HEADER_TEXT_COLOR)
                .set("font-weight", "500")
                .set("font-size", "24px")
                .set("font-style", "normal"),
        )
        .child(Node::element("div").class("row").child(col(
            None,
            vec![Node::element("label").class("form-label").child(Node::text(spec.title))],
        )));

    let series = chart_service::extract_series(snapshot, spec)?;
    let figure = if series.is_empty() {
        warn!("No data for chart '{}'", spec.title);
        Node::element("p").class("card-text").child(Node::text("No data"))
    } else {
        let svg = chart_service::render_svg(spec, &series, CHART_WIDTH, CHART_HEIGHT)?;
        Node::element("div")
            .class("chart")
            .attr("role", "img")
            .attr("aria-label", spec.trace_name)
            .child(Node::raw(svg))
    };

    let body = card_body(vec![figure]);

    Ok(col(
        Some(CHART_WIDTHS),
        vec![card(
            Some(CardColor::Custom(PANEL_COLOR)),
            Style::new().set("height", "100%"),
            vec![header, body],
        )],
    ))
}

fn footer_row() -> Node {
    let made_by = Node::element("p").class("card-text").child(Node::text("Made by rplust."));
    let link = |text: &str, href: &str| {
        Node::element("a")
            .class("card-link")
            .attr("href", href)
            .child(Node::text(text))
    };

    row(
        "10px",
        vec![col(
            None,
            vec![card(
                None,
                Style::new(),
                vec![card_body(vec![
                    made_by,
                    link("Twitter", "https://twitter.com/robplust"),
                    link("GitHub", "https://github.com/RplusT/on-chain/tree/main/uniswap_v2"),
                ])],
            )],
        )],
    )
}

/// Build the page body from a snapshot
pub fn build_layout(snapshot: &MetricsSnapshot) -> Result<Node, DashboardError> {
    let mut rows = vec![title_row(), intro_row()];

    rows.push(row("10px", headlines(snapshot).iter().map(headline_card).collect()));

    // Charts go two per row, in CHART_SPECS order
    for pair in CHART_SPECS.chunks(2) {
        let cards = pair
            .iter()
            .map(|spec| chart_card(spec, snapshot))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row("10px", cards));
    }

    rows.push(footer_row());

    debug!("Built dashboard layout with {} rows", rows.len());

    Ok(container(rows).style(Style::new().set("background-color", "#FFFFFF")))
}

/// Wrap a body tree in a complete HTML document
pub fn render_document(body: &Node) -> String {
    let head = Node::element("head")
        .child(Node::element("meta").attr("charset", "utf-8"))
        .child(
            Node::element("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Node::element("title").child(Node::text(PAGE_TITLE)))
        .child(Node::element("link").attr("rel", "stylesheet").attr("href", THEME_STYLESHEET));

    let html = Node::element("html")
        .attr("lang", "en")
        .child(head)
        .child(Node::element("body").child(body.clone()));

    format!("<!DOCTYPE html>\n{}", html.render())
}

/// The built page plus the snapshot facts the health endpoint reports
#[derive(Debug, Clone)]
pub struct Dashboard {
    body: Node,
    summary: SnapshotSummary,
}

impl Dashboard {
    pub fn build(snapshot: &MetricsSnapshot) -> Result<Self, DashboardError> {
        Ok(Self {
            body: build_layout(snapshot)?,
            summary: snapshot.summary(),
        })
    }

    /// Render the full HTML page
    pub fn render(&self) -> String {
        render_document(&self.body)
    }

    #[cfg(test)]
    pub fn body(&self) -> &Node {
        &self.body
    }

    pub fn summary(&self) -> &SnapshotSummary {
        &self.summary
    }
}
