//! Graph construction from a topology document.
//!
//! Building walks a [`TopologyConfig`] and emits its elements into a
//! [`DiagramContext`] in a fixed order:
//!
//! 1. Top-level nodes, in declaration order
//! 2. Clusters, depth-first, each drawing its own nodes before its nested
//!    clusters
//! 3. Connections, in declaration order
//!
//! Every node is registered before the first connection is resolved, so a
//! connection may reference any node, including one nested deep inside a
//! cluster. The registry is owned by one build and dropped with it.

mod cluster;
mod edge;
mod icon;
mod node;
pub mod registry;

#[cfg(test)]
mod test_support;

pub use icon::{ICON_EXTENSION, IconResolver};
pub use node::compose_label;
pub use registry::NodeRegistry;

use log::info;

use topograph_core::{config::TopologyConfig, graph::DiagramContext};

use crate::{
    config::BuildConfig,
    diagnostic::{Diagnostic, Diagnostics},
    error::TopographError,
};

/// Mutable state shared by the element builders during one build.
pub(crate) struct Session<'a> {
    icons: &'a IconResolver,
    options: &'a BuildConfig,
    registry: NodeRegistry,
    diagnostics: Diagnostics,
}

impl<'a> Session<'a> {
    pub(crate) fn new(icons: &'a IconResolver, options: &'a BuildConfig) -> Self {
        Self {
            icons,
            options,
            registry: NodeRegistry::new(),
            diagnostics: Diagnostics::new(),
        }
    }
}

/// Result of populating a context.
#[derive(Debug)]
pub struct Populated {
    registry: NodeRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl Populated {
    /// Returns the identifier to node mapping of the build.
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Returns the warnings reported during the build.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Splits into the registry and the warnings.
    pub fn into_parts(self) -> (NodeRegistry, Vec<Diagnostic>) {
        (self.registry, self.diagnostics)
    }
}

/// Emits every node, cluster and connection of `config` into `ctx`.
///
/// # Errors
///
/// Returns [`TopographError::DuplicateNode`] when a node identifier repeats
/// and [`DuplicatePolicy::Reject`](crate::config::DuplicatePolicy::Reject)
/// is configured. Every other problem is reported as a diagnostic.
pub fn populate<C: DiagramContext>(
    config: &TopologyConfig,
    ctx: &mut C,
    icons: &IconResolver,
    options: &BuildConfig,
) -> Result<Populated, TopographError> {
    let mut session = Session::new(icons, options);

    for definition in config.nodes() {
        node::build_node(definition, ctx, &mut session)?;
    }
    for definition in config.clusters() {
        cluster::build_cluster(definition, ctx, &mut session)?;
    }

    let Session {
        registry,
        mut diagnostics,
        ..
    } = session;
    let edges = edge::build_edges(config.connections(), ctx, &registry, &mut diagnostics);

    info!(
        nodes = registry.len(),
        edges = edges,
        warnings = diagnostics.len();
        "Topology populated"
    );

    Ok(Populated {
        registry,
        diagnostics: diagnostics.finish(),
    })
}
