//! Text renderer — human-readable views of command output for chat contexts.
//!
//! The display cache (item id → text) lives inside one `render` call. It is
//! filled while items are listed and read back to label connection arrows,
//! so nothing leaks between requests.

use std::collections::HashMap;
use std::fmt::Write;

use super::CommandOutput;
use crate::board::graph::root_ids;
use crate::board::service::BoundsEcho;
use crate::board::{BoardContent, ConnectedPath, Item, SearchResult};
use crate::config::RenderLimits;

const TYPE_PREVIEW: usize = 20;
const SEARCH_PREVIEW: usize = 30;
const PATH_ITEM_PREVIEW: usize = 50;
const PATH_DEPTH_PREVIEW: usize = 5;
const PATHS_PER_DEPTH: usize = 10;
const RULE_WIDTH: usize = 40;

/// Render any command output as plain text.
#[must_use]
pub fn render(output: &CommandOutput, limits: RenderLimits) -> String {
    let mut renderer = Renderer { limits, labels: HashMap::new(), lines: Vec::new() };
    match output {
        CommandOutput::Board(content) => renderer.board(content),
        CommandOutput::Path(path) => renderer.path(path),
        CommandOutput::Search(result) => renderer.search(result),
    }
    renderer.lines.join("\n")
}

struct Renderer<'a> {
    limits: RenderLimits,
    labels: HashMap<&'a str, &'a str>,
    lines: Vec<String>,
}

impl<'a> Renderer<'a> {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn label(&self, id: &'a str) -> &'a str {
        self.labels.get(id).copied().filter(|t| !t.is_empty()).unwrap_or(id)
    }

    // =========================================================================
    // BOARD
    // =========================================================================

    fn board(&mut self, content: &'a BoardContent) {
        let meta = &content.metadata;
        self.push(format!("Board: {}", meta.board_id));
        self.push(format!("Total Items: {} | Connections: {}", meta.item_count, meta.connector_count));
        if let BoundsEcho::Region(b) = &meta.bounds {
            self.push(format!("Region: left={}, right={}, top={}, bottom={}", b.left, b.right, b.top, b.bottom));
        }
        self.push("");

        if !content.items.is_empty() {
            self.board_items(&content.items);
        }
        if !content.connections.is_empty() {
            self.board_connections(content);
        }
        if !content.graph.is_empty() {
            self.push(format!("\nGraph Structure: {} nodes", content.graph.len()));
            let roots = root_ids(&content.graph).len();
            if roots > 0 {
                self.push(format!("Root nodes: {roots}"));
            }
        }
    }

    fn board_items(&mut self, items: &'a [Item]) {
        self.push("=== ITEMS ===");

        let shown = &items[..items.len().min(self.limits.max_items)];
        let mut groups: Vec<(&str, Vec<&Item>)> = Vec::new();
        for item in shown {
            self.labels.insert(&item.id, item.text.trim());
            match groups.iter_mut().find(|(kind, _)| *kind == item.kind) {
                Some((_, group)) => group.push(item),
                None => groups.push((item.kind.as_str(), vec![item])),
            }
        }

        for (kind, group) in groups {
            self.push(format!("\n{} ({} items):", kind.to_uppercase(), group.len()));
            self.push("-".repeat(RULE_WIDTH));
            if kind == "shape" {
                for (idx, item) in group.iter().enumerate() {
                    self.push(format!("{}. ID: {}", idx + 1, item.id));
                    self.push(format!("   Shape Type: {}", item.style.shape.as_deref().unwrap_or("unspecified")));
                    let text = item.text.trim();
                    if !text.is_empty() {
                        self.push(format!("   Text: {text}"));
                    }
                    self.push("");
                }
            } else {
                for (idx, item) in group.iter().take(TYPE_PREVIEW).enumerate() {
                    let text = item.text.trim();
                    let text = if text.is_empty() { "(no text)" } else { text };
                    self.push(format!("{}. {}: {text}", idx + 1, item.id));
                }
            }
        }

        if items.len() > self.limits.max_items {
            self.push(format!("\n[{} more items not shown]", items.len() - self.limits.max_items));
        }
    }

    fn board_connections(&mut self, content: &'a BoardContent) {
        let connections = &content.connections;
        self.push(format!("\n=== CONNECTIONS ({}) ===", connections.len()));

        for (idx, conn) in connections.iter().take(self.limits.max_connections).enumerate() {
            let from = self.label(conn.from.as_deref().unwrap_or_default());
            let to = self.label(conn.to.as_deref().unwrap_or_default());
            let line = if conn.label.is_empty() {
                format!("{}. {from} --> {to}", idx + 1)
            } else {
                format!("{}. {from} --[{}]--> {to}", idx + 1, conn.label)
            };
            self.push(line);
        }

        if connections.len() > self.limits.max_connections {
            self.push(format!("[{} more connections not shown]", connections.len() - self.limits.max_connections));
        }
    }

    // =========================================================================
    // SEARCH / PATH
    // =========================================================================

    fn search(&mut self, result: &SearchResult) {
        self.push(format!("Search Query: '{}'", result.query));
        self.push(format!("Results Found: {}\n", result.result_count));

        for (idx, item) in result.items.iter().take(SEARCH_PREVIEW).enumerate() {
            self.push(format!("{}. Type: {}", idx + 1, item.kind));
            self.push(format!("   ID: {}", item.id));
            self.item_details(item);
        }

        if result.items.len() > SEARCH_PREVIEW {
            self.push(format!("[{} more results not shown]", result.items.len() - SEARCH_PREVIEW));
        }
    }

    fn path(&mut self, path: &ConnectedPath) {
        let summary = &path.summary;
        self.push(format!("Connected Path from: {}", path.start_item));
        self.push(format!("Traversal Depth: {}", path.traversal_depth));
        self.push(format!("Found: {} items, {} connections", summary.total_items, summary.total_connections));
        self.push(format!("Max depth reached: {}\n", summary.max_depth_reached));

        if !path.items.is_empty() {
            self.push("=== CONNECTED ITEMS ===");
            for (idx, item) in path.items.iter().take(PATH_ITEM_PREVIEW).enumerate() {
                self.push(format!("{}. ID: {}", idx + 1, item.id));
                self.push(format!("   Type: {}", item.kind));
                self.item_details(item);
            }
        }

        if !path.paths.is_empty() {
            self.push("=== CONNECTION PATHS ===");
            // Trace output is already ordered by non-decreasing depth.
            let mut depths: Vec<u32> = path.paths.iter().map(|p| p.depth).collect();
            depths.dedup();
            for depth in depths.into_iter().take(PATH_DEPTH_PREVIEW) {
                let mut block = format!("\nDepth {depth}:");
                for p in path.paths.iter().filter(|p| p.depth == depth).take(PATHS_PER_DEPTH) {
                    let _ = write!(block, "\n  {} --> {}", p.from, p.to);
                }
                self.push(block);
            }
        }
    }

    fn item_details(&mut self, item: &Item) {
        if item.kind == "shape" || item.style.shape.is_some() {
            self.push(format!("   Shape: {}", item.style.shape.as_deref().unwrap_or("unspecified")));
        }
        let text = item.text.trim();
        if !text.is_empty() {
            self.push(format!("   Text: {text}"));
        }
        self.push("");
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
