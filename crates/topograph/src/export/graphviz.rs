//! Rendering through the Graphviz `dot` executable.

use std::{
    io,
    path::{Path, PathBuf},
};

use graphviz_rust::{
    cmd::{CommandArg, Format},
    exec,
    printer::PrinterContext,
};
use log::info;

use topograph_core::style::OutputFormat;

use super::{Error, Exporter, dot};
use crate::diagram::Diagram;

fn format_arg(format: OutputFormat) -> Format {
    match format {
        OutputFormat::Svg => Format::Svg,
        OutputFormat::Png => Format::Png,
        OutputFormat::Jpg => Format::Jpg,
        OutputFormat::Pdf => Format::Pdf,
    }
}

/// Exporter that lays out and rasterizes a diagram with Graphviz.
///
/// Layout and image encoding are delegated entirely to Graphviz; the `dot`
/// executable must be on `PATH`.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    path: PathBuf,
    format: OutputFormat,
}

impl GraphvizRenderer {
    /// Creates a renderer writing `format` to `path`.
    pub fn new(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Returns the artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Exporter for GraphvizRenderer {
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<(), Error> {
        let graph = dot::to_dot_graph(diagram);
        let args = vec![
            CommandArg::Format(format_arg(self.format)),
            CommandArg::Output(self.path.display().to_string()),
        ];

        exec(graph, &mut PrinterContext::default(), args).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => {
                Error::Render("Graphviz `dot` executable not found on PATH".to_string())
            }
            _ => Error::Render(format!("Graphviz failed: {err}")),
        })?;

        info!(
            path = self.path.display().to_string(),
            format = self.format.extension();
            "Diagram rendered"
        );
        Ok(())
    }
}
