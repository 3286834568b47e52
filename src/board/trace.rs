//! Connectivity tracer — depth-limited breadth-first walk over connectors.
//!
//! DESIGN
//! ======
//! Edges are treated as undirected for reachability, but each recorded hop
//! keeps the direction it was walked (`from` is the node being expanded).
//!
//! The loop checks the queue head's depth before dequeuing: a node at
//! `max_depth` is visited and recorded but never expanded. The walk is
//! strictly sequential; the visited set is the only dedup mechanism.
//!
//! Connectors are scanned in upstream order for every expansion, so the
//! discovery order is deterministic for a fixed input but not sorted.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use super::model::Connector;

pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// One hop discovered during the walk. `depth` is the BFS level of `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TracePath {
    pub from: String,
    pub to: String,
    pub label: String,
    pub depth: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    /// Visited ids in discovery order, starting with the start id.
    pub visited: Vec<String>,
    pub paths: Vec<TracePath>,
}

impl Trace {
    #[must_use]
    pub fn visited_set(&self) -> HashSet<&str> {
        self.visited.iter().map(String::as_str).collect()
    }

    /// Deepest recorded hop, or 0 with no hops.
    #[must_use]
    pub fn max_depth_reached(&self) -> u32 {
        self.paths.iter().map(|p| p.depth).max().unwrap_or(0)
    }
}

#[must_use]
pub fn trace(connectors: &[Connector], start_id: &str, max_depth: u32) -> Trace {
    let mut visited: HashSet<String> = HashSet::from([start_id.to_string()]);
    let mut order = vec![start_id.to_string()];
    let mut queue: VecDeque<(String, u32)> = VecDeque::from([(start_id.to_string(), 0)]);
    let mut paths = Vec::new();

    while queue.front().is_some_and(|(_, depth)| *depth < max_depth) {
        let Some((current, depth)) = queue.pop_front() else {
            break;
        };

        for conn in connectors.iter().filter(|c| c.touches(&current)) {
            let neighbor = if conn.from.as_deref() == Some(current.as_str()) { &conn.to } else { &conn.from };
            let Some(next) = neighbor.as_deref() else {
                continue;
            };
            if !visited.insert(next.to_string()) {
                continue;
            }

            order.push(next.to_string());
            queue.push_back((next.to_string(), depth + 1));
            paths.push(TracePath { from: current.clone(), to: next.to_string(), label: conn.label.clone(), depth: depth + 1 });
        }
    }

    Trace { visited: order, paths }
}

#[cfg(test)]
#[path = "trace_test.rs"]
mod tests;
