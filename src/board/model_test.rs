use serde_json::json;

use super::*;

fn item(value: serde_json::Value) -> Item {
    let raw: RawItem = serde_json::from_value(value).unwrap();
    normalize_item(&raw)
}

fn connector(value: serde_json::Value) -> Connector {
    let raw: RawConnector = serde_json::from_value(value).unwrap();
    normalize_connector(&raw)
}

// =============================================================================
// Text resolution
// =============================================================================

#[test]
fn text_prefers_content() {
    let i = item(json!({ "id": "1", "type": "sticky_note", "data": { "content": "body", "title": "head", "text": "t" } }));
    assert_eq!(i.text, "body");
}

#[test]
fn text_falls_back_to_title_then_text() {
    let framed = item(json!({ "id": "1", "type": "frame", "data": { "title": "Sprint 4" } }));
    assert_eq!(framed.text, "Sprint 4");

    let carded = item(json!({ "id": "2", "type": "card", "data": { "content": "", "text": "card body" } }));
    assert_eq!(carded.text, "card body");
}

#[test]
fn text_defaults_to_empty() {
    assert_eq!(item(json!({ "id": "1", "type": "image" })).text, "");
    assert_eq!(item(json!({ "id": "1", "type": "image", "data": {} })).text, "");
    assert_eq!(item(json!({ "id": "1", "type": "image", "data": null })).text, "");
}

// =============================================================================
// Style, position, metadata
// =============================================================================

#[test]
fn style_prefers_fill_color() {
    let i = item(json!({
        "id": "1", "type": "shape",
        "data": { "shape": "rhombus" },
        "style": { "fillColor": "#ff0000", "color": "#000000" }
    }));
    assert_eq!(i.style.color.as_deref(), Some("#ff0000"));
    assert_eq!(i.style.shape.as_deref(), Some("rhombus"));
}

#[test]
fn style_shape_is_independent_of_color_source() {
    let i = item(json!({ "id": "1", "type": "shape", "data": { "shape": "circle" }, "style": { "color": "#111111" } }));
    assert_eq!(i.style.color.as_deref(), Some("#111111"));
    assert_eq!(i.style.shape.as_deref(), Some("circle"));

    let bare = item(json!({ "id": "2", "type": "shape", "data": { "shape": "circle" } }));
    assert!(bare.style.color.is_none());
    assert_eq!(bare.style.shape.as_deref(), Some("circle"));
}

#[test]
fn position_keeps_coordinates_and_defaults_missing_axis() {
    let i = item(json!({ "id": "1", "type": "text", "position": { "x": 12.5, "origin": "center" } }));
    let pos = i.position.unwrap();
    assert!((pos.x - 12.5).abs() < f64::EPSILON);
    assert!(pos.y.abs() < f64::EPSILON);
    assert_eq!(pos.origin.as_deref(), Some("center"));

    assert!(item(json!({ "id": "2", "type": "text" })).position.is_none());
}

#[test]
fn metadata_fields_are_carried() {
    let i = item(json!({
        "id": "1", "type": "sticky_note",
        "tags": ["urgent", { "id": "t-9", "title": "review" }, { "id": "t-10" }, 3],
        "createdBy": { "id": "3458764517517852417", "type": "user" },
        "modifiedAt": "2024-05-01T10:00:00Z"
    }));
    assert_eq!(i.tags, vec!["urgent", "review", "t-10"]);
    assert_eq!(i.created_by.as_deref(), Some("3458764517517852417"));
    assert_eq!(i.modified_at.as_deref(), Some("2024-05-01T10:00:00Z"));
}

#[test]
fn item_serializes_camel_case_with_type_key() {
    let i = item(json!({ "id": "1", "type": "text", "data": { "content": "hi" }, "modifiedAt": "x" }));
    let value = serde_json::to_value(&i).unwrap();
    assert_eq!(value["type"], "text");
    assert_eq!(value["modifiedAt"], "x");
    assert!(value["createdBy"].is_null());
    assert!(value["style"]["shape"].is_null());
}

// =============================================================================
// Connectors
// =============================================================================

#[test]
fn connector_takes_first_caption_and_line_type() {
    let c = connector(json!({
        "id": "c1",
        "startItem": { "id": "a" },
        "endItem": { "id": "b" },
        "captions": [{ "content": "leads to" }, { "content": "ignored" }],
        "style": { "lineType": "elbowed" }
    }));
    assert_eq!(c.from.as_deref(), Some("a"));
    assert_eq!(c.to.as_deref(), Some("b"));
    assert_eq!(c.label, "leads to");
    assert_eq!(c.line_style, "elbowed");
    assert_eq!(c.endpoints(), Some(("a", "b")));
}

#[test]
fn connector_defaults_label_and_style() {
    let c = connector(json!({ "id": "c1", "startItem": { "id": "a" }, "endItem": { "id": "b" } }));
    assert_eq!(c.label, "");
    assert_eq!(c.line_style, DEFAULT_LINE_STYLE);
}

#[test]
fn connector_missing_endpoint_is_none_not_error() {
    let c = connector(json!({ "id": "c1", "startItem": { "id": "a" } }));
    assert_eq!(c.from.as_deref(), Some("a"));
    assert!(c.to.is_none());
    assert!(c.endpoints().is_none());
    assert!(c.touches("a"));
    assert!(!c.touches("b"));
}

#[test]
fn connector_serializes_line_style_key() {
    let c = connector(json!({ "id": "c1" }));
    let value = serde_json::to_value(&c).unwrap();
    assert_eq!(value["lineStyle"], "default");
    assert!(value["from"].is_null());
}

// =============================================================================
// Bounds
// =============================================================================

#[test]
fn bounds_are_inclusive_on_every_edge() {
    let b = Bounds { left: 0.0, right: 100.0, top: -50.0, bottom: 50.0 };
    assert!(b.contains(0.0, 0.0));
    assert!(b.contains(100.0, 0.0));
    assert!(b.contains(50.0, -50.0));
    assert!(b.contains(50.0, 50.0));
    assert!(!b.contains(100.01, 0.0));
    assert!(!b.contains(50.0, -50.5));
}
