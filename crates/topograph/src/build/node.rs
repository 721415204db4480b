//! Node factory.

use log::debug;

use topograph_core::{
    config::NodeDefinition,
    graph::{DiagramContext, NodeIndex},
};

use super::Session;
use crate::{
    config::DuplicatePolicy,
    diagnostic::{Diagnostic, WarningCode},
    error::TopographError,
};

/// Composes the drawn label: the human label, then the address and the image
/// tag on their own lines when present.
pub fn compose_label(label: &str, ip: Option<&str>, image: Option<&str>) -> String {
    let mut lines = vec![label.to_string()];
    if let Some(ip) = ip {
        lines.push(ip.to_string());
    }
    if let Some(image) = image {
        lines.push(format!("Image: {image}"));
    }
    lines.join("\n")
}

/// Extracts the identifier and the icon name a node cannot be drawn without.
fn required_fields(definition: &NodeDefinition) -> Result<(&str, &str), Diagnostic> {
    match (definition.id(), definition.icon()) {
        (Some(id), Some(icon)) => Ok((id, icon)),
        _ => Err(
            Diagnostic::warning(
                WarningCode::W100,
                format!("skipping node with missing id or icon: {definition}"),
            )
            .with_help("every node needs a non-empty `id` and `icon`"),
        ),
    }
}

/// Draws one node in the innermost open scope and registers it.
///
/// Returns `Ok(None)` when the definition is skipped.
///
/// # Errors
///
/// Returns [`TopographError::DuplicateNode`] when the identifier is already
/// registered and the policy is [`DuplicatePolicy::Reject`].
pub(super) fn build_node<C: DiagramContext>(
    definition: &NodeDefinition,
    ctx: &mut C,
    session: &mut Session<'_>,
) -> Result<Option<NodeIndex>, TopographError> {
    let (id, icon) = match required_fields(definition) {
        Ok(fields) => fields,
        Err(diagnostic) => {
            session.diagnostics.emit(diagnostic);
            return Ok(None);
        }
    };

    if session.options.duplicate_nodes() == DuplicatePolicy::Reject && session.registry.contains(id)
    {
        return Err(TopographError::DuplicateNode(id.to_string()));
    }

    let icon_path = session.icons.resolve(icon, &mut session.diagnostics);
    let label = compose_label(
        definition.label().unwrap_or(id),
        definition.ip(),
        definition.image(),
    );

    let node = ctx.add_node(label, icon_path);
    if session.registry.insert(id, node).is_some() {
        session.diagnostics.emit(
            Diagnostic::warning(
                WarningCode::W102,
                format!("node `{id}` is declared more than once, the last declaration wins"),
            )
            .with_help("give every node a unique `id`"),
        );
    }

    debug!(node_id = id, depth = ctx.depth(); "Created node");
    Ok(Some(node))
}
