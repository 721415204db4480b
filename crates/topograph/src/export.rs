//! Export functionality for Topograph diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a built [`Diagram`] into an artifact. It is the final stage in the
//! Topograph processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Topology Document (JSON / YAML)
//!     ↓ load
//! TopologyConfig
//!     ↓ build
//! Diagram (graph model + registry + diagnostics)
//!     ↓ export (this module)
//! DOT text / rendered image
//! ```
//!
//! # Available Backends
//!
//! - [`dot`]: DOT text via [`dot::DotWriter`]
//! - [`graphviz`]: Images rendered by the Graphviz `dot` executable via
//!   [`graphviz::GraphvizRenderer`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into a [`TopographError`] at the crate
//! boundary.
//!
//! [`TopographError`]: crate::TopographError

/// DOT generation backend.
#[cfg(feature = "graphviz")]
pub mod dot;

/// Graphviz rendering backend.
#[cfg(feature = "graphviz")]
pub mod graphviz;

use crate::diagram::Diagram;

/// Abstraction for diagram export backends.
///
/// Implementors convert a [`Diagram`] into a specific output format and
/// write it to their destination.
pub trait Exporter {
    /// Exports a built diagram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
