use super::*;
use crate::board::test_helpers::{connector, item, unplaced_item};

fn ids(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

fn region() -> Bounds {
    Bounds { left: 0.0, right: 100.0, top: 0.0, bottom: 100.0 }
}

#[test]
fn no_filters_keeps_everything() {
    let items = vec![item("a", "shape", "A", 0.0, 0.0), unplaced_item("b", "text", "B")];
    assert_eq!(ids(&filter_items(items, None, None)), vec!["a", "b"]);
}

#[test]
fn bounds_keep_items_on_every_edge() {
    let items = vec![
        item("left", "shape", "", 0.0, 50.0),
        item("right", "shape", "", 100.0, 50.0),
        item("top", "shape", "", 50.0, 0.0),
        item("bottom", "shape", "", 50.0, 100.0),
        item("corner", "shape", "", 100.0, 100.0),
        item("outside", "shape", "", 100.5, 50.0),
    ];
    let kept = filter_items(items, Some(&region()), None);
    assert_eq!(ids(&kept), vec!["left", "right", "top", "bottom", "corner"]);
}

#[test]
fn bounds_drop_items_without_position() {
    let items = vec![unplaced_item("floating", "text", "no position"), item("placed", "text", "", 1.0, 1.0)];
    assert_eq!(ids(&filter_items(items, Some(&region()), None)), vec!["placed"]);
}

#[test]
fn type_filter_is_exact_and_case_sensitive() {
    let items = vec![
        item("a", "shape", "", 0.0, 0.0),
        item("b", "Shape", "", 0.0, 0.0),
        item("c", "sticky_note", "", 0.0, 0.0),
    ];
    let types = vec!["shape".to_string(), "sticky_note".to_string()];
    assert_eq!(ids(&filter_items(items, None, Some(&types))), vec!["a", "c"]);
}

#[test]
fn empty_type_list_applies_no_filter() {
    let items = vec![item("a", "shape", "", 0.0, 0.0), item("b", "text", "", 0.0, 0.0)];
    assert_eq!(filter_items(items, None, Some(&[])).len(), 2);
}

#[test]
fn filters_compose() {
    let items = vec![
        item("in-shape", "shape", "", 10.0, 10.0),
        item("in-text", "text", "", 10.0, 10.0),
        item("out-shape", "shape", "", 500.0, 10.0),
    ];
    let types = vec!["shape".to_string()];
    assert_eq!(ids(&filter_items(items, Some(&region()), Some(&types))), vec!["in-shape"]);
}

#[test]
fn connector_kept_when_one_endpoint_survives() {
    let connectors = vec![
        connector("inside-out", Some("a"), Some("z"), ""),
        connector("out-inside", Some("z"), Some("a"), ""),
        connector("both-out", Some("y"), Some("z"), ""),
        connector("dangling", Some("a"), None, ""),
        connector("orphan", None, None, ""),
    ];
    let ids: HashSet<&str> = ["a"].into_iter().collect();
    let kept: Vec<String> = related_connectors(connectors, &ids).into_iter().map(|c| c.id).collect();
    assert_eq!(kept, vec!["inside-out", "out-inside", "dangling"]);
}
