//! Cluster builder.

use log::debug;

use topograph_core::{config::ClusterDefinition, graph::DiagramContext};

use super::{Session, node::build_node};
use crate::{
    diagnostic::{Diagnostic, WarningCode},
    error::TopographError,
};

/// Materializes a cluster tree depth-first.
///
/// Each call opens one scope, draws the directly contained nodes, recurses
/// into the nested clusters and closes the scope, so scopes are closed
/// innermost first. A cluster that would exceed the depth ceiling is skipped
/// together with everything inside it.
pub(super) fn build_cluster<C: DiagramContext>(
    definition: &ClusterDefinition,
    ctx: &mut C,
    session: &mut Session<'_>,
) -> Result<(), TopographError> {
    let max_depth = session.options.max_cluster_depth();
    if ctx.depth() >= max_depth {
        session.diagnostics.emit(
            Diagnostic::warning(
                WarningCode::W300,
                format!(
                    "skipping cluster `{}`: nesting exceeds the maximum depth of {max_depth}",
                    definition.display_name()
                ),
            )
            .with_help("raise `build.max_cluster_depth` or flatten the cluster tree"),
        );
        return Ok(());
    }

    let name = definition.display_name();
    ctx.open_cluster(&name);
    debug!(cluster = name.as_str(), depth = ctx.depth(); "Processing cluster");

    let result = populate(definition, ctx, session);
    ctx.close_cluster();
    result
}

fn populate<C: DiagramContext>(
    definition: &ClusterDefinition,
    ctx: &mut C,
    session: &mut Session<'_>,
) -> Result<(), TopographError> {
    for node in definition.nodes() {
        build_node(node, ctx, session)?;
    }
    for nested in definition.clusters() {
        build_cluster(nested, ctx, session)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use topograph_core::{config::NodeDefinition, graph::GraphBuilder};

    use super::*;
    use crate::{
        build::{IconResolver, test_support::{RecordingContext, ScopeEvent, icon_dir}},
        config::{BuildConfig, DuplicatePolicy},
    };

    fn nested(depth: usize) -> ClusterDefinition {
        let mut cluster = ClusterDefinition::new(format!("level {depth}"))
            .with_node(NodeDefinition::new(format!("n{depth}"), "server"));
        if depth > 1 {
            cluster = cluster.with_cluster(nested(depth - 1));
        }
        cluster
    }

    #[test]
    fn test_scopes_follow_stack_discipline() {
        let icons_dir = icon_dir();
        let icons = IconResolver::new(icons_dir.path(), "server");
        let options = BuildConfig::default();
        let mut session = Session::new(&icons, &options);
        let mut ctx = RecordingContext::default();

        let definition = ClusterDefinition::new("outer")
            .with_subnet("10.0.0.0/8")
            .with_node(NodeDefinition::new("a", "server"))
            .with_cluster(ClusterDefinition::new("inner").with_node(NodeDefinition::new("b", "server")));
        build_cluster(&definition, &mut ctx, &mut session).unwrap();

        assert_eq!(
            ctx.events,
            vec![
                ScopeEvent::Open("outer (10.0.0.0/8)".to_string()),
                ScopeEvent::Node("a".to_string()),
                ScopeEvent::Open("inner".to_string()),
                ScopeEvent::Node("b".to_string()),
                ScopeEvent::Close,
                ScopeEvent::Close,
            ]
        );
        assert!(session.registry.contains("a"));
        assert!(session.registry.contains("b"));
    }

    #[test]
    fn test_nodes_before_nested_clusters() {
        let icons_dir = icon_dir();
        let icons = IconResolver::new(icons_dir.path(), "server");
        let options = BuildConfig::default();
        let mut session = Session::new(&icons, &options);
        let mut ctx = RecordingContext::default();

        let definition = ClusterDefinition::new("parent")
            .with_cluster(ClusterDefinition::new("child"))
            .with_node(NodeDefinition::new("late", "server"));
        build_cluster(&definition, &mut ctx, &mut session).unwrap();

        assert_eq!(ctx.events[1], ScopeEvent::Node("late".to_string()));
        assert_eq!(ctx.events[2], ScopeEvent::Open("child".to_string()));
    }

    #[test]
    fn test_depth_produces_nested_graph() {
        let icons_dir = icon_dir();
        let icons = IconResolver::new(icons_dir.path(), "server");
        let options = BuildConfig::default();
        let mut session = Session::new(&icons, &options);
        let mut ctx = GraphBuilder::new();

        build_cluster(&nested(5), &mut ctx, &mut session).unwrap();
        let graph = ctx.finish();

        assert_eq!(graph.clusters_count(), 5);
        assert_eq!(graph.max_depth(), 5);
        assert_eq!(session.registry.len(), 5);
        let deepest = session.registry.get("n1").unwrap();
        let cluster = graph.node(deepest).cluster().unwrap();
        assert_eq!(graph.cluster(cluster).depth(), 5);
        assert_eq!(graph.cluster(cluster).label(), "level 1");
    }

    #[test]
    fn test_depth_ceiling_skips_subtree() {
        let icons_dir = icon_dir();
        let icons = IconResolver::new(icons_dir.path(), "server");
        let options = BuildConfig::new(2, DuplicatePolicy::LastWriteWins);
        let mut session = Session::new(&icons, &options);
        let mut ctx = GraphBuilder::new();

        build_cluster(&nested(4), &mut ctx, &mut session).unwrap();
        let graph = ctx.finish();

        assert_eq!(graph.clusters_count(), 2);
        assert_eq!(session.registry.ids(), vec!["n3", "n4"]);
        let diagnostics = session.diagnostics.finish();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), WarningCode::W300);
        assert!(diagnostics[0].message().contains("level 2"));
    }

    #[test]
    fn test_scope_is_closed_when_a_node_fails() {
        let icons_dir = icon_dir();
        let icons = IconResolver::new(icons_dir.path(), "server");
        let options = BuildConfig::new(8, DuplicatePolicy::Reject);
        let mut session = Session::new(&icons, &options);
        let mut ctx = RecordingContext::default();

        let definition = ClusterDefinition::new("dup")
            .with_node(NodeDefinition::new("x", "server"))
            .with_node(NodeDefinition::new("x", "server"));
        let result = build_cluster(&definition, &mut ctx, &mut session);

        assert!(result.is_err());
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.events.last(), Some(&ScopeEvent::Close));
    }
}
