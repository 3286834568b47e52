//! Text search over resolved item text.

use super::model::Item;

/// Items whose text contains `query`, in input order. Case-insensitive
/// unless `case_sensitive` is set. No ranking, no cap.
#[must_use]
pub fn search(items: Vec<Item>, query: &str, case_sensitive: bool) -> Vec<Item> {
    if case_sensitive {
        return items.into_iter().filter(|item| item.text.contains(query)).collect();
    }

    let needle = query.to_lowercase();
    items
        .into_iter()
        .filter(|item| item.text.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
