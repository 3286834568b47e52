//! Upstream wire types.
//!
//! Everything is optional on the wire. Normalization into the uniform
//! board shape happens in `board::model`, not here.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The two cursor-paginated collections a board exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Items,
    Connectors,
}

impl Collection {
    /// Path segment under `/boards/{id}/`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Connectors => "connectors",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of a collection. `cursor` present and non-empty means more pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub cursor: Option<String>,
}

impl Page {
    /// Continuation cursor, treating an empty string as "no more pages".
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }
}

// =============================================================================
// ITEMS
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<RawItemData>,
    #[serde(default)]
    pub style: Option<RawItemStyle>,
    #[serde(default)]
    pub position: Option<RawPosition>,
    #[serde(default)]
    pub tags: Option<Vec<Value>>,
    #[serde(default)]
    pub created_by: Option<RawRef>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItemData {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub shape: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItemStyle {
    #[serde(default)]
    pub fill_color: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPosition {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub relative_to: Option<String>,
}

/// `{ "id": ... }` reference used for authors and connector endpoints.
/// Ids arrive as strings, but some payloads use numbers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRef {
    #[serde(default)]
    pub id: Option<Value>,
}

impl RawRef {
    #[must_use]
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().and_then(id_from_value).filter(|id| !id.is_empty())
    }
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Item and connector ids accept the same string-or-number forms as `RawRef`.
fn flexible_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(value) => id_from_value(&value).ok_or_else(|| D::Error::custom(format!("invalid id: {value}"))),
    }
}

// =============================================================================
// CONNECTORS
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConnector {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default)]
    pub start_item: Option<RawRef>,
    #[serde(default)]
    pub end_item: Option<RawRef>,
    #[serde(default)]
    pub captions: Option<Vec<RawCaption>>,
    #[serde(default)]
    pub style: Option<RawConnectorStyle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCaption {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConnectorStyle {
    #[serde(default)]
    pub line_type: Option<String>,
}
