//! Edge builder.

use log::debug;

use topograph_core::{
    config::ConnectionDefinition,
    graph::{DiagramContext, EdgeAttributes, EdgeKind, NodeIndex},
};

use super::NodeRegistry;
use crate::diagnostic::{Diagnostic, Diagnostics, WarningCode};

/// Looks up both endpoints of a connection.
fn resolve_endpoints(
    connection: &ConnectionDefinition,
    registry: &NodeRegistry,
) -> Result<(NodeIndex, NodeIndex), Diagnostic> {
    let source = connection.from().and_then(|id| registry.get(id));
    let target = connection.to().and_then(|id| registry.get(id));

    match (source, target) {
        (Some(source), Some(target)) => Ok((source, target)),
        _ => {
            let unresolved: Vec<String> = [(connection.from(), source), (connection.to(), target)]
                .into_iter()
                .filter(|(_, node)| node.is_none())
                .map(|(id, _)| format!("`{}`", id.unwrap_or_default()))
                .collect();
            Err(Diagnostic::warning(
                WarningCode::W200,
                format!(
                    "skipping {connection}: unresolved endpoint {}",
                    unresolved.join(", ")
                ),
            )
            .with_help("both endpoints must be declared nodes with an `id` and an `icon`"))
        }
    }
}

/// Emits one edge per connection whose endpoints are both registered.
///
/// Must run after every node is registered. Connections are processed in
/// declaration order; unresolved ones are skipped with a warning. Returns
/// the number of emitted edges.
pub(super) fn build_edges<C: DiagramContext>(
    connections: &[ConnectionDefinition],
    ctx: &mut C,
    registry: &NodeRegistry,
    diagnostics: &mut Diagnostics,
) -> usize {
    let mut emitted = 0;
    for connection in connections {
        let (source, target) = match resolve_endpoints(connection, registry) {
            Ok(endpoints) => endpoints,
            Err(diagnostic) => {
                diagnostics.emit(diagnostic);
                continue;
            }
        };

        let kind = if connection.is_bidirectional() {
            EdgeKind::Undirected
        } else {
            EdgeKind::Directed
        };
        let attributes = EdgeAttributes::new(connection.color(), connection.style().clone());
        ctx.add_edge(source, target, kind, attributes);
        emitted += 1;
    }

    debug!(emitted = emitted, declared = connections.len(); "Connections processed");
    emitted
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use topograph_core::{graph::GraphBuilder, style::EdgeStyle};

    use super::*;
    use crate::build::test_support::{RecordingContext, ScopeEvent};

    fn registry_with(ctx: &mut impl DiagramContext, ids: &[&str]) -> NodeRegistry {
        let mut registry = NodeRegistry::new();
        for id in ids {
            let node = ctx.add_node(id.to_string(), PathBuf::from("server.svg"));
            registry.insert(id, node);
        }
        registry
    }

    #[test]
    fn test_directed_edge() {
        let mut ctx = GraphBuilder::new();
        let registry = registry_with(&mut ctx, &["a", "b"]);
        let mut diagnostics = Diagnostics::new();

        let connections = [ConnectionDefinition::new("a", "b")];
        let emitted = build_edges(&connections, &mut ctx, &registry, &mut diagnostics);
        let graph = ctx.finish();

        assert_eq!(emitted, 1);
        let edge = &graph.edges()[0];
        assert_eq!(edge.source(), registry.get("a").unwrap());
        assert_eq!(edge.target(), registry.get("b").unwrap());
        assert_eq!(edge.kind(), EdgeKind::Directed);
        assert_eq!(edge.attributes().color(), "black");
        assert_eq!(edge.attributes().style(), &EdgeStyle::Solid);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_bidirectional_edge_is_single_undirected_edge() {
        let mut ctx = GraphBuilder::new();
        let registry = registry_with(&mut ctx, &["user", "pc"]);
        let mut diagnostics = Diagnostics::new();

        let connections = [ConnectionDefinition::new("user", "pc")
            .with_color("purple")
            .with_style(EdgeStyle::Dotted)
            .bidirectional()];
        build_edges(&connections, &mut ctx, &registry, &mut diagnostics);
        let graph = ctx.finish();

        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].kind(), EdgeKind::Undirected);
        assert_eq!(graph.edges()[0].attributes().color(), "purple");
        assert_eq!(graph.edges()[0].attributes().style(), &EdgeStyle::Dotted);
    }

    #[test]
    fn test_unresolved_endpoint_is_skipped() {
        let mut ctx = GraphBuilder::new();
        let registry = registry_with(&mut ctx, &["a"]);
        let mut diagnostics = Diagnostics::new();

        let connections = [ConnectionDefinition::new("a", "missing")];
        let emitted = build_edges(&connections, &mut ctx, &registry, &mut diagnostics);

        assert_eq!(emitted, 0);
        assert!(ctx.finish().edges().is_empty());
        let diagnostics = diagnostics.finish();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), WarningCode::W200);
        assert!(diagnostics[0].message().contains("`missing`"));
        assert!(!diagnostics[0].message().contains("`a`"));
    }

    #[test]
    fn test_connection_without_endpoints_is_skipped_once() {
        let mut ctx = GraphBuilder::new();
        let registry = registry_with(&mut ctx, &["a"]);
        let mut diagnostics = Diagnostics::new();

        let connection: ConnectionDefinition =
            serde_json::from_value(serde_json::json!({ "color": "red" })).unwrap();
        build_edges(&[connection], &mut ctx, &registry, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let mut ctx = RecordingContext::default();
        let registry = registry_with(&mut ctx, &["a", "b", "c"]);
        let mut diagnostics = Diagnostics::new();
        let (a, b, c) = (
            registry.get("a").unwrap(),
            registry.get("b").unwrap(),
            registry.get("c").unwrap(),
        );

        let connections = [
            ConnectionDefinition::new("c", "a"),
            ConnectionDefinition::new("a", "nowhere"),
            ConnectionDefinition::new("a", "b").bidirectional(),
        ];
        build_edges(&connections, &mut ctx, &registry, &mut diagnostics);

        let edges: Vec<&ScopeEvent> = ctx
            .events
            .iter()
            .filter(|event| matches!(event, ScopeEvent::Edge(..)))
            .collect();
        assert_eq!(
            edges,
            vec![
                &ScopeEvent::Edge(c, a, EdgeKind::Directed),
                &ScopeEvent::Edge(a, b, EdgeKind::Undirected),
            ]
        );
    }
}
