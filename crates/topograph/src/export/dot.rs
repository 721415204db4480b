//! DOT generation.
//!
//! Translates a [`Diagram`] into a `dot_structures` graph. Attribute sets are
//! layered: built-in drawing defaults first, then the document's
//! `graph_attr`/`node_attr`, overriding key by key. Clusters become
//! `cluster_N` subgraphs so Graphviz draws their frames.

use std::{fs, path::PathBuf};

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Stmt, Subgraph, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use log::{debug, info};

use topograph_core::{
    graph::{self, ClusterIndex, EdgeKind, NodeIndex},
    style::AttributeMap,
};

use super::{Error, Exporter};
use crate::diagram::Diagram;

const FONT_NAME: &str = "Sans-Serif";
const FONT_COLOR: &str = "#2D3436";
const EDGE_COLOR: &str = "#7B8894";
const CLUSTER_PEN_COLOR: &str = "#AEB6BE";

/// Cluster backgrounds, cycled by nesting depth.
const CLUSTER_BACKGROUNDS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

fn attribute_map(pairs: &[(&str, &str)]) -> AttributeMap {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn default_graph_attributes() -> AttributeMap {
    attribute_map(&[
        ("pad", "2.0"),
        ("splines", "ortho"),
        ("nodesep", "0.60"),
        ("ranksep", "0.75"),
        ("fontname", FONT_NAME),
        ("fontsize", "15"),
        ("fontcolor", FONT_COLOR),
    ])
}

fn default_node_attributes() -> AttributeMap {
    attribute_map(&[
        ("shape", "box"),
        ("style", "rounded"),
        ("fixedsize", "true"),
        ("width", "1.4"),
        ("height", "1.4"),
        ("labelloc", "b"),
        ("imagescale", "true"),
        ("fontname", FONT_NAME),
        ("fontsize", "13"),
        ("fontcolor", FONT_COLOR),
    ])
}

/// Escapes a value for use inside a double-quoted DOT string.
///
/// Line breaks become the DOT `\n` escape so multi-line labels stay
/// centered.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            c => escaped.push(c),
        }
    }
    escaped
}

fn quoted(value: &str) -> Id {
    Id::Escaped(format!("\"{}\"", escape(value)))
}

fn attribute(key: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(key.to_string()), quoted(value))
}

fn attributes(map: &AttributeMap) -> Vec<Attribute> {
    map.iter().map(|(key, value)| attribute(key, value)).collect()
}

fn node_id(idx: NodeIndex) -> NodeId {
    NodeId(Id::Plain(format!("node_{}", idx.index())), None)
}

fn cluster_background(depth: usize) -> &'static str {
    CLUSTER_BACKGROUNDS[depth.saturating_sub(1) % CLUSTER_BACKGROUNDS.len()]
}

fn node_stmt(graph: &graph::Graph, idx: NodeIndex) -> Stmt {
    let node = graph.node(idx);
    Stmt::Node(Node {
        id: node_id(idx),
        attributes: vec![
            attribute("label", node.label()),
            attribute("image", &node.icon().display().to_string()),
            attribute("shape", "none"),
            attribute("labelloc", "b"),
        ],
    })
}

fn cluster_stmt(graph: &graph::Graph, idx: ClusterIndex) -> Stmt {
    let cluster = graph.cluster(idx);
    let mut stmts: Vec<Stmt> = [
        ("label", cluster.label()),
        ("labeljust", "l"),
        ("pencolor", CLUSTER_PEN_COLOR),
        ("style", "rounded"),
        ("fontname", FONT_NAME),
        ("fontsize", "12"),
        ("bgcolor", cluster_background(cluster.depth())),
    ]
    .into_iter()
    .map(|(key, value)| Stmt::Attribute(attribute(key, value)))
    .collect();

    stmts.extend(cluster.nodes().iter().map(|&node| node_stmt(graph, node)));
    stmts.extend(
        cluster
            .clusters()
            .iter()
            .map(|&nested| cluster_stmt(graph, nested)),
    );

    Stmt::Subgraph(Subgraph {
        id: Id::Plain(format!("cluster_{}", idx.index())),
        stmts,
    })
}

fn edge_stmt(edge: &graph::Edge) -> Stmt {
    let mut attributes = vec![
        attribute("color", edge.attributes().color()),
        attribute("style", edge.attributes().style().as_str()),
    ];
    if edge.kind() == EdgeKind::Undirected {
        attributes.push(attribute("dir", "none"));
    }

    Stmt::Edge(Edge {
        ty: EdgeTy::Pair(
            Vertex::N(node_id(edge.source())),
            Vertex::N(node_id(edge.target())),
        ),
        attributes,
    })
}

/// Builds the DOT graph of a diagram.
pub fn to_dot_graph(diagram: &Diagram) -> Graph {
    let settings = diagram.settings();
    let model = diagram.graph();

    let mut graph_attr = default_graph_attributes();
    graph_attr.insert("label".to_string(), settings.title().to_string());
    graph_attr.insert("rankdir".to_string(), settings.direction().as_str().to_string());
    for (key, value) in settings.graph_attr() {
        graph_attr.insert(key.clone(), value.clone());
    }

    let mut node_attr = default_node_attributes();
    for (key, value) in settings.node_attr() {
        node_attr.insert(key.clone(), value.clone());
    }

    let mut stmts = vec![
        Stmt::GAttribute(GraphAttributes::Graph(attributes(&graph_attr))),
        Stmt::GAttribute(GraphAttributes::Node(attributes(&node_attr))),
        Stmt::GAttribute(GraphAttributes::Edge(vec![attribute("color", EDGE_COLOR)])),
    ];
    stmts.extend(model.root_nodes().map(|node| node_stmt(model, node)));
    stmts.extend(model.root_clusters().map(|cluster| cluster_stmt(model, cluster)));
    stmts.extend(model.edges().iter().map(edge_stmt));

    debug!(
        nodes = model.nodes_count(),
        clusters = model.clusters_count(),
        edges = model.edges().len();
        "DOT graph assembled"
    );

    Graph::DiGraph {
        id: quoted(settings.title()),
        strict: false,
        stmts,
    }
}

/// Prints the DOT text of a diagram.
pub fn to_dot_string(diagram: &Diagram) -> String {
    to_dot_graph(diagram).print(&mut PrinterContext::default())
}

/// Exporter writing DOT text to a file.
#[derive(Debug, Clone)]
pub struct DotWriter {
    path: PathBuf,
}

impl DotWriter {
    /// Creates a writer targeting `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Exporter for DotWriter {
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<(), Error> {
        fs::write(&self.path, to_dot_string(diagram)).map_err(Error::Io)?;
        info!(path = self.path.display().to_string(); "DOT written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("Web\n10.0.0.5"), "Web\\n10.0.0.5");
        assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape("C:\\icons"), "C:\\\\icons");
    }

    #[test]
    fn test_cluster_background_cycles_by_depth() {
        assert_eq!(cluster_background(1), "#E5F5FD");
        assert_eq!(cluster_background(2), "#EBF3E7");
        assert_eq!(cluster_background(4), "#FDF7E3");
        assert_eq!(cluster_background(5), "#E5F5FD");
    }

    #[test]
    fn test_quoted_id() {
        assert_eq!(quoted("a \"b\""), Id::Escaped("\"a \\\"b\\\"\"".to_string()));
    }
}
