//! Identifier registry shared by one diagram build.

use std::collections::HashMap;

use topograph_core::graph::NodeIndex;

/// Maps node identifiers to the nodes drawn for them.
///
/// One registry belongs to one build. The node factory writes to it at every
/// nesting level; the edge builder only reads from it, after all nodes exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRegistry {
    nodes: HashMap<String, NodeIndex>,
}

impl NodeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node under `id`.
    ///
    /// If `id` is already registered, it is re-pointed to `node` and the
    /// previous node is returned.
    pub fn insert(&mut self, id: &str, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes.insert(id.to_string(), node)
    }

    /// Returns the node registered under `id`.
    pub fn get(&self, id: &str) -> Option<NodeIndex> {
        self.nodes.get(id).copied()
    }

    /// Checks if `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns the number of registered identifiers.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the registered identifiers in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
