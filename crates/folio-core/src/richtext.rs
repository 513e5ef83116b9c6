//! Rich-text document model and safe HTML rendering.
//!
//! Documents arrive from the content store as a tree of
//! `{nodeType, content, data, marks, value}` JSON nodes. The tree is
//! deserialized into a tagged union over the known node kinds plus an
//! explicit [`RichTextNode::Unknown`] variant, and the renderer matches
//! exhaustively over it: unknown nodes render their children only,
//! hyperlinks with rejected targets degrade to plain spans, and both
//! are logged as warnings rather than failing the request.

use serde::Deserialize;
use tracing::warn;

use crate::sanitize::{escape_html, is_valid_url};

/// Heading depth supported by the content model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
        }
    }
}

/// Inline marks applied to a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
}

/// A single node of a rich-text document.
#[derive(Debug, Clone, PartialEq)]
pub enum RichTextNode {
    Paragraph { children: Vec<RichTextNode> },
    Heading { level: HeadingLevel, children: Vec<RichTextNode> },
    UnorderedList { children: Vec<RichTextNode> },
    OrderedList { children: Vec<RichTextNode> },
    ListItem { children: Vec<RichTextNode> },
    Hyperlink { uri: String, children: Vec<RichTextNode> },
    Text { value: String, marks: Marks },
    /// Any node kind outside the known set. Rendered as children only,
    /// its own markup dropped.
    Unknown { node_type: String, children: Vec<RichTextNode> },
}

/// A rich-text document as supplied by the content store.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub struct RichTextDocument {
    pub content: Vec<RichTextNode>,
}

impl RichTextDocument {
    /// Renders the document as a safe HTML fragment.
    ///
    /// All text runs are entity-escaped, hyperlink targets are validated
    /// before becoming clickable, and literal newlines inside text runs
    /// become explicit `<br/>` markers so multi-line segments never
    /// collapse to one line.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.content {
            render_node(node, &mut out);
        }
        out
    }

    /// Extracts the document's plain text, block nodes separated by a
    /// single space. Useful for summaries and meta descriptions.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.content, &mut out);
        out.trim().to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

fn render_children(children: &[RichTextNode], out: &mut String) {
    for child in children {
        render_node(child, out);
    }
}

fn render_wrapped(tag: &str, children: &[RichTextNode], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    render_children(children, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn render_node(node: &RichTextNode, out: &mut String) {
    match node {
        RichTextNode::Paragraph { children } => render_wrapped("p", children, out),
        RichTextNode::Heading { level, children } => render_wrapped(level.tag(), children, out),
        RichTextNode::UnorderedList { children } => render_wrapped("ul", children, out),
        RichTextNode::OrderedList { children } => render_wrapped("ol", children, out),
        RichTextNode::ListItem { children } => render_wrapped("li", children, out),
        RichTextNode::Hyperlink { uri, children } => {
            if is_valid_url(uri) {
                out.push_str("<a href=\"");
                out.push_str(&escape_html(uri));
                out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                render_children(children, out);
                out.push_str("</a>");
            } else {
                warn!(url = %uri, "invalid URL in hyperlink, degrading to text");
                render_wrapped("span", children, out);
            }
        }
        RichTextNode::Text { value, marks } => {
            let escaped = escape_html(value).replace('\n', "<br/>");
            let mut text = escaped;
            if marks.italic {
                text = format!("<em>{text}</em>");
            }
            if marks.bold {
                text = format!("<strong>{text}</strong>");
            }
            out.push_str(&text);
        }
        RichTextNode::Unknown { node_type, children } => {
            warn!(node_type = %node_type, "unhandled rich text node, rendering children only");
            render_children(children, out);
        }
    }
}

fn collect_text(nodes: &[RichTextNode], out: &mut String) {
    for node in nodes {
        match node {
            RichTextNode::Text { value, .. } => out.push_str(value),
            RichTextNode::Hyperlink { children, .. } | RichTextNode::Unknown { children, .. } => {
                collect_text(children, out)
            }
            RichTextNode::Paragraph { children }
            | RichTextNode::Heading { children, .. }
            | RichTextNode::UnorderedList { children }
            | RichTextNode::OrderedList { children }
            | RichTextNode::ListItem { children } => {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
                collect_text(children, out);
            }
        }
    }
}

// ============================================================================
// Wire format
// ============================================================================

/// The content store's node shape before classification.
#[derive(Debug, Clone, Deserialize)]
struct RawNode {
    #[serde(rename = "nodeType", default)]
    node_type: String,
    #[serde(default)]
    content: Vec<RawNode>,
    #[serde(default)]
    value: String,
    #[serde(default)]
    marks: Vec<RawMark>,
    #[serde(default)]
    data: RawData,
}

#[derive(Debug, Clone, Deserialize)]
struct RawMark {
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawData {
    #[serde(default)]
    uri: Option<String>,
}

impl From<RawNode> for RichTextDocument {
    fn from(raw: RawNode) -> Self {
        if raw.node_type == "document" {
            RichTextDocument {
                content: raw.content.into_iter().map(RichTextNode::from).collect(),
            }
        } else {
            // Tolerate a bare node as a single-child document.
            RichTextDocument {
                content: vec![RichTextNode::from(raw)],
            }
        }
    }
}

impl From<RawNode> for RichTextNode {
    fn from(raw: RawNode) -> Self {
        let children = |content: Vec<RawNode>| -> Vec<RichTextNode> {
            content.into_iter().map(RichTextNode::from).collect()
        };

        match raw.node_type.as_str() {
            "paragraph" => RichTextNode::Paragraph { children: children(raw.content) },
            "heading-1" => RichTextNode::Heading {
                level: HeadingLevel::H1,
                children: children(raw.content),
            },
            "heading-2" => RichTextNode::Heading {
                level: HeadingLevel::H2,
                children: children(raw.content),
            },
            "heading-3" => RichTextNode::Heading {
                level: HeadingLevel::H3,
                children: children(raw.content),
            },
            "unordered-list" => RichTextNode::UnorderedList { children: children(raw.content) },
            "ordered-list" => RichTextNode::OrderedList { children: children(raw.content) },
            "list-item" => RichTextNode::ListItem { children: children(raw.content) },
            "hyperlink" => RichTextNode::Hyperlink {
                uri: raw.data.uri.unwrap_or_default(),
                children: children(raw.content),
            },
            "text" => RichTextNode::Text {
                value: raw.value,
                marks: Marks {
                    bold: raw.marks.iter().any(|m| m.kind == "bold"),
                    italic: raw.marks.iter().any(|m| m.kind == "italic"),
                },
            },
            _ => RichTextNode::Unknown {
                node_type: raw.node_type,
                children: children(raw.content),
            },
        }
    }
}
