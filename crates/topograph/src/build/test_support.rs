//! Shared fixtures for builder tests.

use std::{fs, path::PathBuf};

use tempfile::TempDir;

use topograph_core::graph::{
    ClusterIndex, DiagramContext, EdgeAttributes, EdgeKind, GraphBuilder, NodeIndex,
};

/// Icons present in [`icon_dir`].
pub const FIXTURE_ICONS: [&str; 3] = ["server", "internet", "router"];

/// Creates an icon directory holding [`FIXTURE_ICONS`].
pub fn icon_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    for name in FIXTURE_ICONS {
        fs::write(dir.path().join(format!("{name}.svg")), "<svg/>").expect("Failed to write icon");
    }
    dir
}

/// Something that happened to a [`RecordingContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeEvent {
    Open(String),
    Close,
    Node(String),
    Edge(NodeIndex, NodeIndex, EdgeKind),
}

/// [`DiagramContext`] that logs every call in order.
#[derive(Debug, Default)]
pub struct RecordingContext {
    pub events: Vec<ScopeEvent>,
    inner: GraphBuilder,
}

impl DiagramContext for RecordingContext {
    fn open_cluster(&mut self, label: &str) -> ClusterIndex {
        self.events.push(ScopeEvent::Open(label.to_string()));
        self.inner.open_cluster(label)
    }

    fn close_cluster(&mut self) {
        self.events.push(ScopeEvent::Close);
        self.inner.close_cluster();
    }

    fn depth(&self) -> usize {
        self.inner.depth()
    }

    fn add_node(&mut self, label: String, icon: PathBuf) -> NodeIndex {
        self.events.push(ScopeEvent::Node(label.clone()));
        self.inner.add_node(label, icon)
    }

    fn add_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        kind: EdgeKind,
        attributes: EdgeAttributes,
    ) {
        self.events.push(ScopeEvent::Edge(source, target, kind));
        self.inner.add_edge(source, target, kind, attributes);
    }
}
