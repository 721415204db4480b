//! Hierarchical graph model.
//!
//! The builders never talk to a rendering backend directly. They emit into a
//! [`DiagramContext`], a scoped sink that understands three things: nodes,
//! nested cluster scopes and edges. [`GraphBuilder`] is the context used for
//! real builds; it materializes a [`Graph`] that exporters turn into a backend
//! format.
//!
//! # Architecture
//!
//! - [`NodeIndex`] / [`ClusterIndex`]: Opaque, copyable handles into a [`Graph`]
//! - [`Node`], [`Cluster`], [`Edge`]: Stored elements
//! - [`Graph`]: Arena of elements with parent links for the cluster tree
//! - [`DiagramContext`]: The scope-aware emission interface
//! - [`GraphBuilder`]: [`DiagramContext`] implementation producing a [`Graph`]
//!
//! Elements are stored in creation order, so building the same document twice
//! yields equal graphs.

use std::path::{Path, PathBuf};

use log::trace;

use crate::style::EdgeStyle;

// =============================================================================
// Handles
// =============================================================================

/// Handle to a node stored in a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Returns the position of the node in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a cluster stored in a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterIndex(usize);

impl ClusterIndex {
    /// Returns the position of the cluster in opening order.
    pub fn index(self) -> usize {
        self.0
    }
}

// =============================================================================
// Elements
// =============================================================================

/// A drawable node: a composed label over an icon image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    label: String,
    icon: PathBuf,
    cluster: Option<ClusterIndex>,
}

impl Node {
    /// Returns the multi-line display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the icon resource path.
    pub fn icon(&self) -> &Path {
        &self.icon
    }

    /// Returns the innermost enclosing cluster, if any.
    pub fn cluster(&self) -> Option<ClusterIndex> {
        self.cluster
    }
}

/// A named grouping scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    label: String,
    parent: Option<ClusterIndex>,
    depth: usize,
    nodes: Vec<NodeIndex>,
    clusters: Vec<ClusterIndex>,
}

impl Cluster {
    /// Returns the display name.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the enclosing cluster, or `None` for a top-level cluster.
    pub fn parent(&self) -> Option<ClusterIndex> {
        self.parent
    }

    /// Returns the nesting depth; top-level clusters have depth 1.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the directly contained nodes in creation order.
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Returns the directly nested clusters in opening order.
    pub fn clusters(&self) -> &[ClusterIndex] {
        &self.clusters
    }
}

/// How an edge is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// One arrow from source to target.
    Directed,
    /// A plain line with no arrowheads.
    Undirected,
}

/// Visual attributes carried by an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeAttributes {
    color: String,
    style: EdgeStyle,
}

impl EdgeAttributes {
    /// Creates edge attributes from a color and a line style.
    pub fn new(color: impl Into<String>, style: EdgeStyle) -> Self {
        Self {
            color: color.into(),
            style,
        }
    }

    /// Returns the line color.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the line style.
    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }
}

/// A drawn connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    source: NodeIndex,
    target: NodeIndex,
    kind: EdgeKind,
    attributes: EdgeAttributes,
}

impl Edge {
    /// Returns the source node.
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    /// Returns the target node.
    pub fn target(&self) -> NodeIndex {
        self.target
    }

    /// Returns whether the edge is directed.
    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Returns the visual attributes.
    pub fn attributes(&self) -> &EdgeAttributes {
        &self.attributes
    }
}

// =============================================================================
// Graph
// =============================================================================

/// The complete graph model of one diagram build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
    clusters: Vec<Cluster>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Returns the node behind a handle.
    ///
    /// # Panics
    /// Panics if the handle was created by a different graph.
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.0]
    }

    /// Returns the cluster behind a handle.
    ///
    /// # Panics
    /// Panics if the handle was created by a different graph.
    pub fn cluster(&self, idx: ClusterIndex) -> &Cluster {
        &self.clusters[idx.0]
    }

    /// Returns every node with its handle, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeIndex(idx), node))
    }

    /// Returns every cluster with its handle, in opening order.
    pub fn clusters(&self) -> impl Iterator<Item = (ClusterIndex, &Cluster)> {
        self.clusters
            .iter()
            .enumerate()
            .map(|(idx, cluster)| (ClusterIndex(idx), cluster))
    }

    /// Returns every edge in emission order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the nodes that are not inside any cluster.
    pub fn root_nodes(&self) -> impl Iterator<Item = NodeIndex> {
        self.nodes()
            .filter(|(_, node)| node.cluster.is_none())
            .map(|(idx, _)| idx)
    }

    /// Returns the top-level clusters.
    pub fn root_clusters(&self) -> impl Iterator<Item = ClusterIndex> {
        self.clusters()
            .filter(|(_, cluster)| cluster.parent.is_none())
            .map(|(idx, _)| idx)
    }

    /// Returns the total number of nodes.
    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the total number of clusters.
    pub fn clusters_count(&self) -> usize {
        self.clusters.len()
    }

    /// Returns the deepest cluster nesting level, 0 when there are no clusters.
    pub fn max_depth(&self) -> usize {
        self.clusters.iter().map(Cluster::depth).max().unwrap_or(0)
    }
}

// =============================================================================
// DiagramContext
// =============================================================================

/// Scoped sink the diagram builders emit into.
///
/// Cluster scopes follow stack discipline: every [`open_cluster`] is matched
/// by exactly one [`close_cluster`], and nodes are placed in the innermost
/// open scope.
///
/// [`open_cluster`]: DiagramContext::open_cluster
/// [`close_cluster`]: DiagramContext::close_cluster
pub trait DiagramContext {
    /// Opens a cluster scope nested in the current one.
    fn open_cluster(&mut self, label: &str) -> ClusterIndex;

    /// Closes the innermost open cluster scope.
    fn close_cluster(&mut self);

    /// Returns the number of currently open cluster scopes.
    fn depth(&self) -> usize;

    /// Adds a node to the innermost open scope.
    fn add_node(&mut self, label: String, icon: PathBuf) -> NodeIndex;

    /// Adds an edge between two existing nodes.
    fn add_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        kind: EdgeKind,
        attributes: EdgeAttributes,
    );
}

/// [`DiagramContext`] that materializes a [`Graph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
    scopes: Vec<ClusterIndex>,
}

impl GraphBuilder {
    /// Creates a builder with an empty graph and no open scopes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finishes the build and returns the graph.
    ///
    /// # Panics
    /// Panics in debug mode if a cluster scope is still open.
    pub fn finish(self) -> Graph {
        debug_assert!(
            self.scopes.is_empty(),
            "Finishing graph with {} open cluster scope(s)",
            self.scopes.len()
        );
        self.graph
    }
}

impl DiagramContext for GraphBuilder {
    fn open_cluster(&mut self, label: &str) -> ClusterIndex {
        let idx = ClusterIndex(self.graph.clusters.len());
        let parent = self.scopes.last().copied();

        self.graph.clusters.push(Cluster {
            label: label.to_string(),
            parent,
            depth: self.scopes.len() + 1,
            nodes: Vec::new(),
            clusters: Vec::new(),
        });
        if let Some(parent) = parent {
            self.graph.clusters[parent.0].clusters.push(idx);
        }
        self.scopes.push(idx);

        trace!(cluster = idx.0, depth = self.scopes.len(), label = label; "Opened cluster scope");
        idx
    }

    fn close_cluster(&mut self) {
        debug_assert!(!self.scopes.is_empty(), "Closing cluster with no open scope");
        if let Some(idx) = self.scopes.pop() {
            trace!(cluster = idx.0, depth = self.scopes.len(); "Closed cluster scope");
        }
    }

    fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn add_node(&mut self, label: String, icon: PathBuf) -> NodeIndex {
        let idx = NodeIndex(self.graph.nodes.len());
        let cluster = self.scopes.last().copied();

        self.graph.nodes.push(Node {
            label,
            icon,
            cluster,
        });
        if let Some(cluster) = cluster {
            self.graph.clusters[cluster.0].nodes.push(idx);
        }
        idx
    }

    fn add_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        kind: EdgeKind,
        attributes: EdgeAttributes,
    ) {
        debug_assert!(
            source.0 < self.graph.nodes.len(),
            "Adding edge: Source node {} does not exist",
            source.0
        );
        debug_assert!(
            target.0 < self.graph.nodes.len(),
            "Adding edge: Target node {} does not exist",
            target.0
        );

        self.graph.edges.push(Edge {
            source,
            target,
            kind,
            attributes,
        });
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn icon() -> PathBuf {
        PathBuf::from("icons/server.svg")
    }

    #[test]
    fn test_graph_builder_empty() {
        let graph = GraphBuilder::new().finish();

        assert_eq!(graph.nodes_count(), 0);
        assert_eq!(graph.clusters_count(), 0);
        assert!(graph.edges().is_empty());
        assert_eq!(graph.max_depth(), 0);
    }

    #[test]
    fn test_nodes_land_in_innermost_scope() {
        let mut builder = GraphBuilder::new();

        let top = builder.add_node("top".to_string(), icon());
        let outer = builder.open_cluster("outer");
        let in_outer = builder.add_node("in outer".to_string(), icon());
        let inner = builder.open_cluster("inner");
        let in_inner = builder.add_node("in inner".to_string(), icon());
        builder.close_cluster();
        builder.close_cluster();
        let graph = builder.finish();

        assert_eq!(graph.node(top).cluster(), None);
        assert_eq!(graph.node(in_outer).cluster(), Some(outer));
        assert_eq!(graph.node(in_inner).cluster(), Some(inner));
        assert_eq!(graph.cluster(outer).clusters(), &[inner]);
        assert_eq!(graph.cluster(inner).parent(), Some(outer));
        assert_eq!(graph.cluster(inner).depth(), 2);
        assert_eq!(graph.root_nodes().collect::<Vec<_>>(), vec![top]);
        assert_eq!(graph.root_clusters().collect::<Vec<_>>(), vec![outer]);
    }

    #[test]
    fn test_sibling_clusters_share_parent() {
        let mut builder = GraphBuilder::new();

        let parent = builder.open_cluster("parent");
        let first = builder.open_cluster("first");
        builder.close_cluster();
        let second = builder.open_cluster("second");
        assert_eq!(builder.depth(), 2);
        builder.close_cluster();
        builder.close_cluster();
        assert_eq!(builder.depth(), 0);
        let graph = builder.finish();

        assert_eq!(graph.cluster(parent).clusters(), &[first, second]);
        assert_eq!(graph.cluster(second).depth(), 2);
        assert_eq!(graph.max_depth(), 2);
    }

    #[test]
    fn test_edges_keep_emission_order() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_node("a".to_string(), icon());
        let b = builder.add_node("b".to_string(), icon());

        builder.add_edge(a, b, EdgeKind::Directed, EdgeAttributes::new("red", EdgeStyle::Dashed));
        builder.add_edge(b, a, EdgeKind::Undirected, EdgeAttributes::new("black", EdgeStyle::Solid));
        let graph = builder.finish();

        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.edges()[0].source(), a);
        assert_eq!(graph.edges()[0].attributes().color(), "red");
        assert_eq!(graph.edges()[1].kind(), EdgeKind::Undirected);
    }

    proptest! {
        #[test]
        fn prop_nesting_depth_matches_scopes(depth in 1usize..24) {
            let mut builder = GraphBuilder::new();
            for level in 0..depth {
                builder.open_cluster(&format!("level {level}"));
                builder.add_node(format!("node {level}"), icon());
            }
            for _ in 0..depth {
                builder.close_cluster();
            }
            let graph = builder.finish();

            prop_assert_eq!(graph.clusters_count(), depth);
            prop_assert_eq!(graph.max_depth(), depth);
            prop_assert_eq!(graph.root_clusters().count(), 1);
            for (idx, cluster) in graph.clusters() {
                prop_assert_eq!(cluster.depth(), idx.index() + 1);
                prop_assert_eq!(cluster.nodes().len(), 1);
            }
        }
    }
}
