//! Graph builder — adjacency map over the filtered item set.
//!
//! Every item becomes a node, even with no edges. A connector contributes an
//! outgoing entry only if its source is a node, and an incoming entry only
//! if its target is a node. Edges into filtered-out items are silently
//! one-sided.

use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{Connector, Item};

/// Item id → node. Ordered by id so serialized output is stable.
pub type Graph = BTreeMap<String, GraphNode>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub connections: Connections,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Connections {
    pub outgoing: Vec<OutgoingEdge>,
    pub incoming: Vec<IncomingEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingEdge {
    pub to: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomingEdge {
    pub from: String,
    pub label: String,
}

#[must_use]
pub fn build_graph(items: &[Item], connectors: &[Connector]) -> Graph {
    let mut graph: Graph = items
        .iter()
        .map(|item| {
            let node = GraphNode { text: item.text.clone(), kind: item.kind.clone(), connections: Connections::default() };
            (item.id.clone(), node)
        })
        .collect();

    for conn in connectors {
        let Some((from, to)) = conn.endpoints() else {
            continue;
        };
        if let Some(node) = graph.get_mut(from) {
            node.connections.outgoing.push(OutgoingEdge { to: to.to_string(), label: conn.label.clone() });
        }
        if let Some(node) = graph.get_mut(to) {
            node.connections.incoming.push(IncomingEdge { from: from.to_string(), label: conn.label.clone() });
        }
    }

    graph
}

/// Nodes with no incoming edges.
#[must_use]
pub fn root_ids(graph: &Graph) -> Vec<&str> {
    graph
        .iter()
        .filter(|(_, node)| node.connections.incoming.is_empty())
        .map(|(id, _)| id.as_str())
        .collect()
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
