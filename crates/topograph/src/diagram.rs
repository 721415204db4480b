//! Built diagrams.
//!
//! A [`Diagram`] is the output of one build: the document-level settings, the
//! populated [`Graph`], the identifier registry and every warning reported
//! along the way. Exporters consume it without further access to the source
//! document.

use topograph_core::{
    config::TopologyConfig,
    graph::Graph,
    style::{AttributeMap, Direction, OutputFormat},
};

use crate::{build::NodeRegistry, diagnostic::Diagnostic};

/// Document-level settings of a diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSettings {
    title: String,
    output_filename: String,
    direction: Direction,
    outformat: OutputFormat,
    graph_attr: AttributeMap,
    node_attr: AttributeMap,
}

impl DiagramSettings {
    /// Extracts the settings of a topology document.
    pub fn from_config(config: &TopologyConfig) -> Self {
        Self {
            title: config.title().to_string(),
            output_filename: config.output_filename().to_string(),
            direction: config.direction(),
            outformat: config.outformat(),
            graph_attr: config.graph_attr().clone(),
            node_attr: config.node_attr().clone(),
        }
    }

    /// Returns the diagram title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the artifact name without extension.
    pub fn output_filename(&self) -> &str {
        &self.output_filename
    }

    /// Returns the layout direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the artifact format.
    pub fn outformat(&self) -> OutputFormat {
        self.outformat
    }

    /// Returns the graph-level attribute overrides.
    pub fn graph_attr(&self) -> &AttributeMap {
        &self.graph_attr
    }

    /// Returns the default node attribute overrides.
    pub fn node_attr(&self) -> &AttributeMap {
        &self.node_attr
    }

    /// Returns the artifact file name, `{output_filename}.{extension}`.
    pub fn artifact_name(&self) -> String {
        format!("{}.{}", self.output_filename, self.outformat.extension())
    }
}

/// The result of one diagram build.
#[derive(Debug, Clone)]
pub struct Diagram {
    settings: DiagramSettings,
    graph: Graph,
    registry: NodeRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl Diagram {
    pub(crate) fn new(
        settings: DiagramSettings,
        graph: Graph,
        registry: NodeRegistry,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            settings,
            graph,
            registry,
            diagnostics,
        }
    }

    /// Returns the document-level settings.
    pub fn settings(&self) -> &DiagramSettings {
        &self.settings
    }

    /// Returns the populated graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the identifier to node mapping.
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Returns the warnings reported while building.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_default_config() {
        let settings = DiagramSettings::from_config(&TopologyConfig::default());

        assert_eq!(settings.title(), "Network Topology");
        assert_eq!(settings.direction(), Direction::TopToBottom);
        assert_eq!(settings.artifact_name(), "network_topology.svg");
        assert_eq!(settings.node_attr().get("fixedsize").map(String::as_str), Some("true"));
    }

    #[test]
    fn test_artifact_name_follows_format() {
        let mut config = TopologyConfig::default();
        config.set_output_filename("lab");
        config.set_outformat(OutputFormat::Png);

        assert_eq!(DiagramSettings::from_config(&config).artifact_name(), "lab.png");
    }
}
