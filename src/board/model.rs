//! Uniform board records and the normalizer that builds them.
//!
//! DESIGN
//! ======
//! Upstream items come in many shapes (sticky notes keep text in `content`,
//! frames in `title`, cards in `text`). Normalization flattens them into one
//! `Item` record. It is a pure mapping: no lookups, no failure modes. A
//! connector with a missing endpoint stays a valid `Connector` with `None`
//! on that side.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::miro::types::{RawConnector, RawItem, RawPosition};

pub const DEFAULT_LINE_STYLE: &str = "default";

// =============================================================================
// ITEM
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub position: Option<Position>,
    pub style: Style,
    pub tags: Vec<String>,
    pub created_by: Option<String>,
    pub modified_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    pub color: Option<String>,
    pub shape: Option<String>,
}

// =============================================================================
// CONNECTOR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub id: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub label: String,
    pub line_style: String,
}

impl Connector {
    /// Both endpoints, when both are present.
    #[must_use]
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        Some((self.from.as_deref()?, self.to.as_deref()?))
    }

    #[must_use]
    pub fn touches(&self, id: &str) -> bool {
        self.from.as_deref() == Some(id) || self.to.as_deref() == Some(id)
    }
}

// =============================================================================
// BOUNDS
// =============================================================================

/// Axis-aligned rectangle in board coordinates, inclusive on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.left <= x && x <= self.right && self.top <= y && y <= self.bottom
    }
}

// =============================================================================
// NORMALIZATION
// =============================================================================

fn non_empty(value: Option<&String>) -> Option<&String> {
    value.filter(|s| !s.is_empty())
}

/// Resolve display text: `content`, then `title`, then `text`, else empty.
#[must_use]
pub fn resolve_text(raw: &RawItem) -> String {
    let Some(data) = raw.data.as_ref() else {
        return String::new();
    };
    non_empty(data.content.as_ref())
        .or_else(|| non_empty(data.title.as_ref()))
        .or_else(|| non_empty(data.text.as_ref()))
        .cloned()
        .unwrap_or_default()
}

fn resolve_style(raw: &RawItem) -> Style {
    let color = raw
        .style
        .as_ref()
        .and_then(|s| non_empty(s.fill_color.as_ref()).or_else(|| non_empty(s.color.as_ref())))
        .cloned();
    // Shape subtype lives in the data payload, independent of which color field matched.
    let shape = raw.data.as_ref().and_then(|d| d.shape.clone());
    Style { color, shape }
}

fn resolve_position(raw: &RawPosition) -> Position {
    Position {
        x: raw.x.unwrap_or(0.0),
        y: raw.y.unwrap_or(0.0),
        origin: raw.origin.clone(),
        relative_to: raw.relative_to.clone(),
    }
}

fn resolve_tag(tag: &Value) -> Option<String> {
    match tag {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get("title")
            .or_else(|| map.get("id"))
            .and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
        _ => None,
    }
}

/// Map one raw upstream item into the uniform record.
#[must_use]
pub fn normalize_item(raw: &RawItem) -> Item {
    Item {
        id: raw.id.clone(),
        kind: raw.kind.clone(),
        text: resolve_text(raw),
        position: raw.position.as_ref().map(resolve_position),
        style: resolve_style(raw),
        tags: raw.tags.iter().flatten().filter_map(resolve_tag).collect(),
        created_by: raw.created_by.as_ref().and_then(crate::miro::types::RawRef::id_string),
        modified_at: raw.modified_at.clone(),
    }
}

/// Map one raw upstream connector into the uniform record.
#[must_use]
pub fn normalize_connector(raw: &RawConnector) -> Connector {
    let label = raw
        .captions
        .as_ref()
        .and_then(|c| c.first())
        .and_then(|c| c.content.clone())
        .unwrap_or_default();
    let line_style = raw
        .style
        .as_ref()
        .and_then(|s| s.line_type.clone())
        .unwrap_or_else(|| DEFAULT_LINE_STYLE.to_string());

    Connector {
        id: raw.id.clone(),
        from: raw.start_item.as_ref().and_then(crate::miro::types::RawRef::id_string),
        to: raw.end_item.as_ref().and_then(crate::miro::types::RawRef::id_string),
        label,
        line_style,
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
