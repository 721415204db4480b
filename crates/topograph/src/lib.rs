//! Topograph - Network topology diagrams from declarative documents.
//!
//! Loads a JSON or YAML topology (nodes, nested clusters, connections),
//! builds a hierarchical graph model from it and hands that model to
//! Graphviz, which owns layout and image encoding.

pub mod build;
pub mod config;
pub mod diagnostic;
pub mod diagram;
pub mod export;

mod error;

pub use topograph_core::{config as topology, graph, style};
pub use topograph_loader::{self as loader, LoadError, SourceFormat};

pub use diagram::{Diagram, DiagramSettings};
pub use error::TopographError;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, error, info};

use topograph_core::{config::TopologyConfig, graph::GraphBuilder};

use build::IconResolver;
use config::AppConfig;

/// Prefix of generated output names.
pub const UNIQUE_NAME_PREFIX: &str = "diagram_";

/// Returns a fresh output name, `diagram_{uuid}`.
///
/// Concurrent builds writing into one output directory use it to keep their
/// artifacts apart.
pub fn unique_output_name() -> String {
    format!("{UNIQUE_NAME_PREFIX}{}", uuid::Uuid::new_v4())
}

/// Builder for composing and rendering topology diagrams.
///
/// Each call to [`compose`](Self::compose) is an independent build with its
/// own registry and graph, so one builder can serve many documents.
///
/// # Examples
///
/// ```rust,no_run
/// use topograph::{DiagramBuilder, config::AppConfig};
///
/// let topology = topograph::loader::load_file("network.yaml")
///     .expect("Failed to load topology");
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let diagram = builder.compose(&topology).expect("Failed to build");
/// for warning in diagram.diagnostics() {
///     eprintln!("{warning}");
/// }
///
/// let artifact = builder.render(&diagram).expect("Failed to render");
/// println!("{}", artifact.display());
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the application configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build the graph model of a topology.
    ///
    /// Top-level nodes are drawn first, then clusters, then connections.
    /// Malformed elements are skipped and reported through
    /// [`Diagram::diagnostics`].
    ///
    /// # Errors
    ///
    /// Returns `TopographError` when the build cannot produce a diagram at
    /// all, e.g. a duplicate identifier under the `reject` policy or an
    /// `output_filename` that is not a plain file name.
    pub fn compose(&self, topology: &TopologyConfig) -> Result<Diagram, TopographError> {
        check_output_filename(topology.output_filename())?;
        let settings = DiagramSettings::from_config(topology);
        info!(
            title = settings.title(),
            nodes = topology.node_definition_count(),
            connections = topology.connections().len();
            "Building diagram"
        );

        let icons = IconResolver::from_config(self.config.icons());
        let mut ctx = GraphBuilder::new();
        let populated = build::populate(topology, &mut ctx, &icons, self.config.build())?;
        let graph = ctx.finish();
        let (registry, diagnostics) = populated.into_parts();

        debug!(
            nodes = graph.nodes_count(),
            clusters = graph.clusters_count(),
            edges = graph.edges().len(),
            max_depth = graph.max_depth();
            "Graph model built"
        );

        Ok(Diagram::new(settings, graph, registry, diagnostics))
    }

    /// Print the DOT text of a diagram.
    ///
    /// # Errors
    ///
    /// Returns [`TopographError::Render`] when built without the `graphviz`
    /// feature.
    pub fn to_dot(&self, diagram: &Diagram) -> Result<String, TopographError> {
        #[cfg(feature = "graphviz")]
        {
            Ok(export::dot::to_dot_string(diagram))
        }
        #[cfg(not(feature = "graphviz"))]
        {
            let _ = diagram;
            Err(missing_backend())
        }
    }

    /// Write the DOT text of a diagram to `path`.
    ///
    /// # Errors
    ///
    /// Returns `TopographError` if the file cannot be written or the
    /// `graphviz` feature is disabled.
    pub fn write_dot(&self, diagram: &Diagram, path: &Path) -> Result<(), TopographError> {
        #[cfg(feature = "graphviz")]
        {
            use export::Exporter as _;
            export::dot::DotWriter::new(path).export_diagram(diagram)?;
            Ok(())
        }
        #[cfg(not(feature = "graphviz"))]
        {
            let _ = (diagram, path);
            Err(missing_backend())
        }
    }

    /// Returns where [`render`](Self::render) writes a diagram.
    pub fn artifact_path(&self, diagram: &Diagram) -> PathBuf {
        self.config
            .output()
            .dir()
            .join(diagram.settings().artifact_name())
    }

    /// Render a diagram with Graphviz into the output directory.
    ///
    /// The artifact is `{output_dir}/{output_filename}.{outformat}`; the
    /// output directory is created when missing.
    ///
    /// # Errors
    ///
    /// Returns `TopographError` if the output directory cannot be created or
    /// Graphviz fails.
    pub fn render(&self, diagram: &Diagram) -> Result<PathBuf, TopographError> {
        let path = self.artifact_path(diagram);
        fs::create_dir_all(self.config.output().dir())?;

        #[cfg(feature = "graphviz")]
        {
            use export::Exporter as _;
            export::graphviz::GraphvizRenderer::new(&path, diagram.settings().outformat())
                .export_diagram(diagram)?;
            Ok(path)
        }
        #[cfg(not(feature = "graphviz"))]
        {
            let _ = path;
            Err(missing_backend())
        }
    }

    /// Compose and render in one step.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`compose`](Self::compose) or
    /// [`render`](Self::render); the error is also logged.
    pub fn build(&self, topology: &TopologyConfig) -> Result<BuildReport, TopographError> {
        let result = self.compose(topology).and_then(|diagram| {
            let artifact = self.render(&diagram)?;
            Ok(BuildReport { diagram, artifact })
        });

        match &result {
            Ok(report) => info!(
                artifact = report.artifact.display().to_string(),
                warnings = report.diagram.diagnostics().len();
                "Diagram built"
            ),
            Err(err) => error!(err:%; "Diagram build failed"),
        }
        result
    }
}

/// Artifacts must land inside the output directory, so the name may not
/// carry directory components.
fn check_output_filename(name: &str) -> Result<(), TopographError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(TopographError::Config(format!(
            "output_filename `{name}` must be a plain file name"
        )));
    }
    Ok(())
}

#[cfg(not(feature = "graphviz"))]
fn missing_backend() -> TopographError {
    TopographError::Render("built without the `graphviz` feature".to_string())
}

/// A composed and rendered diagram.
#[derive(Debug)]
pub struct BuildReport {
    diagram: Diagram,
    artifact: PathBuf,
}

impl BuildReport {
    /// Returns the built diagram.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Returns the path of the rendered artifact.
    pub fn artifact(&self) -> &Path {
        &self.artifact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_output_names_differ() {
        let first = unique_output_name();
        let second = unique_output_name();

        assert!(first.starts_with(UNIQUE_NAME_PREFIX));
        assert_eq!(first.len(), UNIQUE_NAME_PREFIX.len() + 36);
        assert_ne!(first, second);
    }

    #[test]
    fn test_output_filename_must_stay_in_output_dir() {
        let builder = DiagramBuilder::new(AppConfig::default().with_output_dir("out"));

        for name in ["../escape", "nested/name", r"..\escape", "..", ""] {
            let mut topology = TopologyConfig::default();
            topology.set_output_filename(name);
            let result = builder.compose(&topology);
            assert!(
                matches!(result, Err(TopographError::Config(_))),
                "`{name}` should be rejected"
            );
        }

        let mut topology = TopologyConfig::default();
        topology.set_output_filename("lab.v2");
        let diagram = builder.compose(&topology).unwrap();
        assert_eq!(
            builder.artifact_path(&diagram),
            Path::new("out").join("lab.v2.svg")
        );
    }

    #[test]
    fn test_artifact_path_uses_output_dir() {
        let builder = DiagramBuilder::new(AppConfig::default().with_output_dir("out"));
        let diagram = builder.compose(&TopologyConfig::default()).unwrap();

        assert_eq!(
            builder.artifact_path(&diagram),
            Path::new("out").join("network_topology.svg")
        );
    }
}
