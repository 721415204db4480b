//! CLI logic for the Topograph diagram tool.
//!
//! This module contains the core CLI logic: it loads the application config
//! and the topology document, applies command-line overrides, builds the
//! diagram and hands it to the requested exporters.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::{Path, PathBuf};

use log::info;

use topograph::{
    Diagram, DiagramBuilder, TopographError, loader, topology::TopologyConfig,
    unique_output_name,
};

/// Outcome of a successful CLI run.
#[derive(Debug)]
pub struct RunOutput {
    /// The built diagram, including its warnings.
    pub diagram: Diagram,
    /// Rendered artifact, `None` with `--no-render`.
    pub artifact: Option<PathBuf>,
    /// DOT file written with `--emit-dot`.
    pub dot: Option<PathBuf>,
}

/// Applies the command-line overrides to a loaded topology.
fn apply_overrides(topology: &mut TopologyConfig, args: &Args) {
    if let Some(title) = &args.title {
        topology.set_title(title);
    }
    if args.unique_name {
        topology.set_output_filename(unique_output_name());
    } else if let Some(output) = &args.output {
        topology.set_output_filename(output);
    }
    if let Some(direction) = args.direction {
        topology.set_direction(direction);
    }
    if let Some(format) = args.format {
        topology.set_outformat(format);
    }
}

/// Run the Topograph CLI application
///
/// Loads the topology document named by `args`, builds the diagram and
/// renders it with Graphviz unless `--no-render` is given.
///
/// # Errors
///
/// Returns `TopographError` for:
/// - Configuration loading errors
/// - Unreadable or malformed topology documents
/// - Fatal build errors such as a rejected duplicate identifier
/// - DOT writing or rendering errors
pub fn run(args: &Args) -> Result<RunOutput, TopographError> {
    info!(input_path = args.input; "Processing topology");

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(dir) = &args.icons_dir {
        app_config = app_config.with_icons_dir(dir);
    }
    if let Some(dir) = &args.output_dir {
        app_config = app_config.with_output_dir(dir);
    }

    let mut topology = loader::load_file(&args.input)?;
    apply_overrides(&mut topology, args);

    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.compose(&topology)?;

    let dot = match &args.emit_dot {
        Some(path) => {
            let path = Path::new(path);
            builder.write_dot(&diagram, path)?;
            info!(dot_file = path.display().to_string(); "DOT exported");
            Some(path.to_path_buf())
        }
        None => None,
    };

    let artifact = if args.no_render {
        info!("Rendering skipped");
        None
    } else {
        let artifact = builder.render(&diagram)?;
        info!(output_file = artifact.display().to_string(); "Diagram exported successfully");
        Some(artifact)
    };

    Ok(RunOutput {
        diagram,
        artifact,
        dot,
    })
}
