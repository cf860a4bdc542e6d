//! Minimal HTML component tree
//!
//! Nodes are plain data so a tree can be built once and rendered on every request.
//! Rendering is deterministic: attributes and style declarations keep insertion order.

/// Inline CSS declarations in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style(Vec<(&'static str, String)>);

impl Style {
    pub fn new() -> Self {
        Style(Vec::new())
    }

    /// Add a declaration, e.g. `.set("font-size", "24px")`
    pub fn set(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.0.push((property, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn render(&self) -> String {
        self.0
            .iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A node of the page tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element {
        tag: &'static str,
        classes: Vec<String>,
        style: Style,
        attrs: Vec<(&'static str, String)>,
        children: Vec<Node>,
    },
    /// Escaped text content
    Text(String),
    /// Trusted markup emitted as-is (rendered chart SVG)
    Raw(String),
}

impl Node {
    pub fn element(tag: &'static str) -> Self {
        Node::Element {
            tag,
            classes: Vec::new(),
            style: Style::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    pub fn raw(markup: impl Into<String>) -> Self {
        Node::Raw(markup.into())
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        if let Node::Element { classes, .. } = &mut self {
            classes.push(class.into());
        }
        self
    }

    pub fn style(mut self, value: Style) -> Self {
        if let Node::Element { style, .. } = &mut self {
            *style = value;
        }
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Node::Element { attrs, .. } = &mut self {
            attrs.push((name, value.into()));
        }
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        if let Node::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        if let Node::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }

    /// Render the subtree as HTML
    pub fn render(&self) -> String {
        let mut output = String::new();
        self.render_into(&mut output);
        output
    }

    fn render_into(&self, output: &mut String) {
        match self {
            Node::Text(content) => output.push_str(&escape(content)),
            Node::Raw(markup) => output.push_str(markup),
            Node::Element { tag, classes, style, attrs, children } => {
                output.push('<');
                output.push_str(tag);

                if !classes.is_empty() {
                    output.push_str(&format!(" class=\"{}\"", escape(&classes.join(" "))));
                }
                if !style.is_empty() {
                    output.push_str(&format!(" style=\"{}\"", escape(&style.render())));
                }
                for (name, value) in attrs {
                    output.push_str(&format!(" {}=\"{}\"", name, escape(value)));
                }
                output.push('>');

                if is_void(tag) {
                    return;
                }

                for child in children {
                    child.render_into(output);
                }

                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
        }
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "meta" | "link" | "br" | "hr" | "img" | "input")
}

/// Escape text for use in HTML content and quoted attribute values
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
