//! Filter engine — spatial and type filters plus related-connector retention.

use std::collections::HashSet;

use super::model::{Bounds, Connector, Item};

/// Keep items inside `bounds` (if given), then items whose type is listed in
/// `include_types` (if given and non-empty). Input order is preserved.
#[must_use]
pub fn filter_items(items: Vec<Item>, bounds: Option<&Bounds>, include_types: Option<&[String]>) -> Vec<Item> {
    let include_types = include_types.filter(|types| !types.is_empty());

    items
        .into_iter()
        .filter(|item| match bounds {
            Some(b) => item.position.as_ref().is_some_and(|p| b.contains(p.x, p.y)),
            None => true,
        })
        .filter(|item| match include_types {
            Some(types) => types.iter().any(|t| *t == item.kind),
            None => true,
        })
        .collect()
}

/// Connectors with at least one endpoint in `item_ids`.
///
/// One-sided retention: the other endpoint may point at an item the filter
/// dropped. Consumers treat that side as "no edge contribution".
#[must_use]
pub fn related_connectors(connectors: Vec<Connector>, item_ids: &HashSet<&str>) -> Vec<Connector> {
    connectors
        .into_iter()
        .filter(|c| {
            c.from.as_deref().is_some_and(|id| item_ids.contains(id))
                || c.to.as_deref().is_some_and(|id| item_ids.contains(id))
        })
        .collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
