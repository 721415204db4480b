//! Topology document definitions.
//!
//! These types are the deserialized form of a topology document. They are
//! immutable inputs to the diagram builders: nothing here validates
//! cross-references, that is done while the graph is built so that one
//! malformed element never aborts a whole build.
//!
//! # Overview
//!
//! - [`TopologyConfig`] - Document root: diagram settings plus the element trees.
//! - [`NodeDefinition`] - One drawable topology entity.
//! - [`ClusterDefinition`] - A named, recursively nested grouping.
//! - [`ConnectionDefinition`] - A styled link between two node identifiers.
//!
//! # Example
//!
//! ```
//! # use topograph_core::config::TopologyConfig;
//! let config = TopologyConfig::default();
//! assert_eq!(config.title(), "Network Topology");
//! assert_eq!(config.output_filename(), "network_topology");
//! ```

use std::fmt;

use serde::Deserialize;

use crate::style::{self, AttributeMap, Direction, EdgeStyle, OutputFormat};

/// Display name used for clusters that do not declare one.
pub const DEFAULT_CLUSTER_NAME: &str = "Cluster";

fn default_title() -> String {
    "Network Topology".to_string()
}

fn default_output_filename() -> String {
    "network_topology".to_string()
}

fn default_graph_attr() -> AttributeMap {
    [("fontsize", "12"), ("bgcolor", "transparent"), ("splines", "ortho")]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn default_node_attr() -> AttributeMap {
    [
        ("fontsize", "20"),
        ("height", "0.8"),
        ("width", "0.8"),
        ("fixedsize", "true"),
        ("imagescale", "true"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}

fn default_cluster_name() -> String {
    DEFAULT_CLUSTER_NAME.to_string()
}

fn default_edge_color() -> String {
    "black".to_string()
}

/// Returns the value when it is present and not empty.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

// =============================================================================
// TopologyConfig
// =============================================================================

/// Root of a topology document.
///
/// A supplied `graph_attr` or `node_attr` map replaces the corresponding
/// default map as a whole.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopologyConfig {
    #[serde(default = "default_title")]
    title: String,

    #[serde(default = "default_output_filename")]
    output_filename: String,

    #[serde(default)]
    direction: Direction,

    #[serde(default)]
    outformat: OutputFormat,

    #[serde(
        default = "default_graph_attr",
        deserialize_with = "style::attribute_map"
    )]
    graph_attr: AttributeMap,

    #[serde(default = "default_node_attr", deserialize_with = "style::attribute_map")]
    node_attr: AttributeMap,

    #[serde(default)]
    nodes: Vec<NodeDefinition>,

    #[serde(default)]
    clusters: Vec<ClusterDefinition>,

    #[serde(default)]
    connections: Vec<ConnectionDefinition>,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            output_filename: default_output_filename(),
            direction: Direction::default(),
            outformat: OutputFormat::default(),
            graph_attr: default_graph_attr(),
            node_attr: default_node_attr(),
            nodes: Vec::new(),
            clusters: Vec::new(),
            connections: Vec::new(),
        }
    }
}

impl TopologyConfig {
    /// Returns the diagram title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the artifact name without extension.
    pub fn output_filename(&self) -> &str {
        &self.output_filename
    }

    /// Returns the rank direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the artifact format.
    pub fn outformat(&self) -> OutputFormat {
        self.outformat
    }

    /// Returns the graph-level backend attributes.
    pub fn graph_attr(&self) -> &AttributeMap {
        &self.graph_attr
    }

    /// Returns the node-level backend attributes.
    pub fn node_attr(&self) -> &AttributeMap {
        &self.node_attr
    }

    /// Returns the top-level nodes in declaration order.
    pub fn nodes(&self) -> &[NodeDefinition] {
        &self.nodes
    }

    /// Returns the top-level clusters in declaration order.
    pub fn clusters(&self) -> &[ClusterDefinition] {
        &self.clusters
    }

    /// Returns every connection in declaration order.
    pub fn connections(&self) -> &[ConnectionDefinition] {
        &self.connections
    }

    /// Overrides the diagram title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Overrides the artifact name.
    pub fn set_output_filename(&mut self, output_filename: impl Into<String>) {
        self.output_filename = output_filename.into();
    }

    /// Overrides the rank direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Overrides the artifact format.
    pub fn set_outformat(&mut self, outformat: OutputFormat) {
        self.outformat = outformat;
    }

    /// Returns the total number of node definitions, nested ones included.
    pub fn node_definition_count(&self) -> usize {
        self.nodes.len()
            + self
                .clusters
                .iter()
                .map(ClusterDefinition::node_definition_count)
                .sum::<usize>()
    }
}

// =============================================================================
// NodeDefinition
// =============================================================================

/// A single drawable topology entity.
///
/// `id` and `icon` are required for the node to be drawn; a definition that
/// lacks either is kept here and rejected later by the node factory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NodeDefinition {
    #[serde(default, deserialize_with = "style::optional_text")]
    id: Option<String>,

    #[serde(default, deserialize_with = "style::optional_text")]
    label: Option<String>,

    #[serde(default, deserialize_with = "style::optional_text")]
    icon: Option<String>,

    #[serde(default, deserialize_with = "style::optional_text")]
    ip: Option<String>,

    #[serde(default, deserialize_with = "style::optional_text")]
    image: Option<String>,
}

impl NodeDefinition {
    /// Creates a definition with the two required fields.
    pub fn new(id: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            icon: Some(icon.into()),
            ..Self::default()
        }
    }

    /// Sets the human label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the network address.
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Sets the image tag.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Returns the identifier, or `None` when absent or empty.
    pub fn id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    /// Returns the icon name, or `None` when absent or empty.
    pub fn icon(&self) -> Option<&str> {
        non_empty(&self.icon)
    }

    /// Returns the human label, falling back to the identifier when the
    /// label is absent or empty.
    pub fn label(&self) -> Option<&str> {
        non_empty(&self.label).or(self.id())
    }

    /// Returns the address, or `None` when absent or empty.
    pub fn ip(&self) -> Option<&str> {
        non_empty(&self.ip)
    }

    /// Returns the image tag, or `None` when absent or empty.
    pub fn image(&self) -> Option<&str> {
        non_empty(&self.image)
    }
}

impl fmt::Display for NodeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node {{ id: {:?}, icon: {:?} }}",
            self.id.as_deref().unwrap_or_default(),
            self.icon.as_deref().unwrap_or_default()
        )
    }
}

// =============================================================================
// ClusterDefinition
// =============================================================================

/// A named grouping of nodes and nested clusters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClusterDefinition {
    #[serde(default = "default_cluster_name")]
    name: String,

    #[serde(default, deserialize_with = "style::optional_text")]
    subnet: Option<String>,

    #[serde(default)]
    nodes: Vec<NodeDefinition>,

    #[serde(default)]
    clusters: Vec<ClusterDefinition>,
}

impl Default for ClusterDefinition {
    fn default() -> Self {
        Self {
            name: default_cluster_name(),
            subnet: None,
            nodes: Vec::new(),
            clusters: Vec::new(),
        }
    }
}

impl ClusterDefinition {
    /// Creates an empty cluster with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the subnet annotation.
    pub fn with_subnet(mut self, subnet: impl Into<String>) -> Self {
        self.subnet = Some(subnet.into());
        self
    }

    /// Appends a directly contained node.
    pub fn with_node(mut self, node: NodeDefinition) -> Self {
        self.nodes.push(node);
        self
    }

    /// Appends a nested cluster.
    pub fn with_cluster(mut self, cluster: ClusterDefinition) -> Self {
        self.clusters.push(cluster);
        self
    }

    /// Returns the declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the subnet annotation, or `None` when absent or empty.
    pub fn subnet(&self) -> Option<&str> {
        non_empty(&self.subnet)
    }

    /// Returns the name as drawn: `name` or `name (subnet)`.
    pub fn display_name(&self) -> String {
        match self.subnet() {
            Some(subnet) => format!("{} ({subnet})", self.name),
            None => self.name.clone(),
        }
    }

    /// Returns the directly contained nodes in declaration order.
    pub fn nodes(&self) -> &[NodeDefinition] {
        &self.nodes
    }

    /// Returns the nested clusters in declaration order.
    pub fn clusters(&self) -> &[ClusterDefinition] {
        &self.clusters
    }

    fn node_definition_count(&self) -> usize {
        self.nodes.len()
            + self
                .clusters
                .iter()
                .map(Self::node_definition_count)
                .sum::<usize>()
    }
}

// =============================================================================
// ConnectionDefinition
// =============================================================================

/// A styled connection between two node identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionDefinition {
    #[serde(default, deserialize_with = "style::optional_text")]
    from: Option<String>,

    #[serde(default, deserialize_with = "style::optional_text")]
    to: Option<String>,

    #[serde(default = "default_edge_color")]
    color: String,

    #[serde(default)]
    style: EdgeStyle,

    #[serde(default)]
    bidirectional: bool,
}

impl ConnectionDefinition {
    /// Creates a solid black directed connection.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            color: default_edge_color(),
            style: EdgeStyle::default(),
            bidirectional: false,
        }
    }

    /// Sets the line color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the line style.
    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    /// Marks the connection as bidirectional.
    pub fn bidirectional(mut self) -> Self {
        self.bidirectional = true;
        self
    }

    /// Returns the source identifier, if declared.
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// Returns the target identifier, if declared.
    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    /// Returns the line color.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the line style.
    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }

    /// Returns whether the connection is drawn without direction.
    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }
}

impl fmt::Display for ConnectionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "connection {{ from: {:?}, to: {:?} }}",
            self.from.as_deref().unwrap_or_default(),
            self.to.as_deref().unwrap_or_default()
        )
    }
}
