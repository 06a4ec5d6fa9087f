//! Structured descriptions
//!
//! A description is either plain text or a sequence of typed blocks
//! (`paragraph`, `heading`, `list`). Parsing never fails: block types this
//! module does not know become [`Block::Unknown`] and render as nothing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A description field in canonical form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Blocks(Vec<Block>),
}

/// An inline run of text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// One typed block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph { children: Vec<Span> },
    /// Level is always within 1..=6
    Heading { level: u8, text: String },
    List { ordered: bool, items: Vec<String> },
    /// Anything else; carries the original type name
    Unknown { kind: String },
}

/// A block that produces output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rendered {
    Paragraph { spans: Vec<Span> },
    Heading { level: u8, text: String },
    List { ordered: bool, items: Vec<String> },
}

impl Description {
    /// Interpret a raw description value. `null` means no description.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(blocks) => {
                Some(Self::Blocks(blocks.iter().map(Block::from_value).collect()))
            }
            Value::Object(_) => Some(Self::Blocks(vec![Block::from_value(value)])),
            Value::Number(n) => Some(Self::Text(n.to_string())),
            Value::Bool(b) => Some(Self::Text(b.to_string())),
        }
    }

    /// True when rendering would show no text at all.
    pub fn is_blank(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// All text, one line per rendered block.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Blocks(_) => self
                .render()
                .iter()
                .map(|block| match block {
                    Rendered::Paragraph { spans } => {
                        spans.iter().map(|s| s.text.as_str()).collect::<String>()
                    }
                    Rendered::Heading { text, .. } => text.clone(),
                    Rendered::List { items, .. } => items.join("\n"),
                })
                .collect::<Vec<String>>()
                .join("\n"),
        }
    }

    /// Render to output blocks. Plain text becomes a single paragraph.
    pub fn render(&self) -> Vec<Rendered> {
        match self {
            Self::Text(s) => vec![Rendered::Paragraph {
                spans: vec![Span::plain(s.clone())],
            }],
            Self::Blocks(blocks) => blocks.iter().filter_map(Block::render).collect(),
        }
    }

    /// Render to an HTML fragment.
    pub fn to_html(&self) -> String {
        to_html(&self.render())
    }
}

impl<'de> Deserialize<'de> for Description {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value).unwrap_or_else(|| Self::Text(String::new())))
    }
}

impl Block {
    /// Parse one raw block. Malformed known blocks keep their type with empty content.
    pub fn from_value(value: &Value) -> Self {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();

        match kind.to_ascii_lowercase().as_str() {
            "paragraph" => Self::Paragraph {
                children: children(value).flat_map(spans).collect(),
            },
            "heading" => Self::Heading {
                level: value
                    .get("level")
                    .and_then(Value::as_u64)
                    .map_or(1, |l| l.clamp(1, 6) as u8),
                text: text_of(value),
            },
            "list" => Self::List {
                ordered: value.get("format").and_then(Value::as_str) == Some("ordered"),
                items: children(value).map(text_of).collect(),
            },
            _ => Self::Unknown {
                kind: kind.to_string(),
            },
        }
    }

    pub fn render(&self) -> Option<Rendered> {
        match self {
            Self::Paragraph { children } => Some(Rendered::Paragraph {
                spans: children.clone(),
            }),
            Self::Heading { level, text } => Some(Rendered::Heading {
                level: *level,
                text: text.clone(),
            }),
            Self::List { ordered, items } => Some(Rendered::List {
                ordered: *ordered,
                items: items.clone(),
            }),
            Self::Unknown { kind } => {
                tracing::debug!(kind = %kind, "skipping unsupported description block");
                None
            }
        }
    }
}

fn children(value: &Value) -> impl Iterator<Item = &Value> {
    value
        .get("children")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

/// Text leaves become spans; inline containers (links) contribute their leaves.
fn spans(node: &Value) -> Vec<Span> {
    match node.get("text").and_then(Value::as_str) {
        Some(text) => vec![Span {
            text: text.to_string(),
            bold: flag(node, "bold"),
            italic: flag(node, "italic"),
        }],
        None => children(node).flat_map(spans).collect(),
    }
}

fn text_of(node: &Value) -> String {
    spans(node).into_iter().map(|s| s.text).collect()
}

fn flag(node: &Value, name: &str) -> bool {
    node.get(name).and_then(Value::as_bool).unwrap_or(false)
}

/// Render output blocks as an HTML fragment with escaped text.
pub fn to_html(blocks: &[Rendered]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Rendered::Paragraph { spans } => {
                out.push_str("<p>");
                for span in spans {
                    let mut text = escape(&span.text);
                    if span.italic {
                        text = format!("<em>{}</em>", text);
                    }
                    if span.bold {
                        text = format!("<strong>{}</strong>", text);
                    }
                    out.push_str(&text);
                }
                out.push_str("</p>");
            }
            Rendered::Heading { level, text } => {
                out.push_str(&format!("<h{0}>{1}</h{0}>", level, escape(text)));
            }
            Rendered::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                out.push_str(&format!("<{}>", tag));
                for item in items {
                    out.push_str(&format!("<li>{}</li>", escape(item)));
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
