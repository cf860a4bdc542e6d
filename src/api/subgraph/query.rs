//! Query descriptors
//!
//! A descriptor names one root field of the subgraph schema, its arguments, and the
//! field selections the dashboard needs from it. The client turns a descriptor into a
//! GraphQL document and reads the response back from the same root field.

/// Argument value of a root field
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Int(u32),
    Str(String),
    /// Bare enum value such as `desc` or a field name in `orderBy`
    Enum(&'static str),
}

impl Argument {
    fn render(&self) -> String {
        match self {
            Argument::Int(n) => n.to_string(),
            Argument::Str(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
            Argument::Enum(e) => e.to_string(),
        }
    }
}

/// A selected field, optionally with nested selections
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Field(&'static str),
    Nested(&'static str, Vec<Selection>),
}

impl Selection {
    fn render(&self) -> String {
        match self {
            Selection::Field(name) => name.to_string(),
            Selection::Nested(name, children) => format!(
                "{} {{ {} }}",
                name,
                children.iter().map(Selection::render).collect::<Vec<_>>().join(" ")
            ),
        }
    }

    fn contains(&self, path: &[&str]) -> bool {
        match (self, path) {
            (Selection::Field(name), [head]) => name == head,
            (Selection::Nested(name, children), [head, rest @ ..]) if name == head => {
                rest.is_empty() || children.iter().any(|c| c.contains(rest))
            }
            _ => false,
        }
    }
}

/// Named query against one root field of the subgraph
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    pub name: &'static str,
    pub root_field: &'static str,
    pub arguments: Vec<(&'static str, Argument)>,
    pub selection: Vec<Selection>,
}

impl QueryDescriptor {
    pub fn new(name: &'static str, root_field: &'static str) -> Self {
        Self {
            name,
            root_field,
            arguments: Vec::new(),
            selection: Vec::new(),
        }
    }

    pub fn arg(mut self, key: &'static str, value: Argument) -> Self {
        self.arguments.push((key, value));
        self
    }

    pub fn select(mut self, field: &'static str) -> Self {
        self.selection.push(Selection::Field(field));
        self
    }

    pub fn select_nested(mut self, field: &'static str, children: &[&'static str]) -> Self {
        let children = children.iter().map(|c| Selection::Field(*c)).collect();
        self.selection.push(Selection::Nested(field, children));
        self
    }

    /// Whether a dotted field path (e.g. `token0.symbol`) is part of the selection
    pub fn requests(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('.').collect();
        self.selection.iter().any(|s| s.contains(&parts))
    }

    /// Render the GraphQL document for this descriptor
    pub fn to_document(&self) -> String {
        let arguments = if self.arguments.is_empty() {
            String::new()
        } else {
            let rendered: Vec<String> = self
                .arguments
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value.render()))
                .collect();
            format!("({})", rendered.join(", "))
        };

        let selection: Vec<String> = self.selection.iter().map(Selection::render).collect();

        format!(
            "query {} {{ {}{} {{ {} }} }}",
            self.name,
            self.root_field,
            arguments,
            selection.join(" ")
        )
    }
}

/// Address of the Uniswap V2 factory contract, the id of the `uniswapFactory` entity
pub const FACTORY_ID: &str = "0x5c69bee701ef814a2b6a3edd4b1652cb9cc5aa6f";

/// Protocol-wide totals
pub fn factory() -> QueryDescriptor {
    QueryDescriptor::new("factory", "uniswapFactory")
        .arg("id", Argument::Str(FACTORY_ID.to_string()))
        .select("totalVolumeUSD")
        .select("totalLiquidityUSD")
        .select("txCount")
}

/// Pairs ranked by all-time USD volume
pub fn top_pairs(first: u32) -> QueryDescriptor {
    QueryDescriptor::new("pairs", "pairs")
        .arg("first", Argument::Int(first))
        .arg("orderBy", Argument::Enum("volumeUSD"))
        .arg("orderDirection", Argument::Enum("desc"))
        .select_nested("token0", &["symbol"])
        .select_nested("token1", &["symbol"])
        .select("volumeUSD")
}

/// Tokens ranked by all-time USD trade volume
pub fn top_tokens(first: u32) -> QueryDescriptor {
    QueryDescriptor::new("tokens", "tokens")
        .arg("first", Argument::Int(first))
        .arg("orderBy", Argument::Enum("tradeVolumeUSD"))
        .arg("orderDirection", Argument::Enum("desc"))
        .select("symbol")
        .select("tradeVolumeUSD")
}

/// Most recent daily snapshots, newest first
pub fn daily_snapshots(days: u32) -> QueryDescriptor {
    QueryDescriptor::new("daily", "uniswapDayDatas")
        .arg("first", Argument::Int(days))
        .arg("orderBy", Argument::Enum("date"))
        .arg("orderDirection", Argument::Enum("desc"))
        .select("date")
        .select("dailyVolumeUSD")
        .select("totalLiquidityUSD")
        .select("txCount")
}
