//! Error adapter for converting Topograph errors and warnings to miette
//! diagnostics.
//!
//! This module provides the bridge between the library's standard error and
//! diagnostic types and miette's rich report formatting used in the CLI.
//! Build warnings are rendered with [`Severity::Warning`]; they never change
//! the exit status.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, Severity};

use topograph::{LoadError, TopographError, diagnostic::Diagnostic};

/// Adapter for a single build warning.
pub struct WarningAdapter<'a>(pub &'a Diagnostic);

impl fmt::Debug for WarningAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WarningAdapter").field(&self.0).finish()
    }
}

impl fmt::Display for WarningAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.message())
    }
}

impl std::error::Error for WarningAdapter<'_> {}

impl MietteDiagnostic for WarningAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.0.code()))
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Warning)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// Adapter for [`TopographError`].
pub struct ErrorAdapter<'a>(pub &'a TopographError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TopographError::Io(_) => "topograph::io",
            TopographError::Load(_) => "topograph::load",
            TopographError::Config(_) => "topograph::config",
            TopographError::DuplicateNode(_) => "topograph::duplicate_node",
            TopographError::Export(_) => "topograph::export",
            TopographError::Render(_) => "topograph::render",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            TopographError::Load(LoadError::Unrecognized { .. }) => {
                "the document is neither valid JSON nor valid YAML"
            }
            TopographError::DuplicateNode(_) => {
                "rename the node or set `build.duplicate_nodes = \"last-write-wins\"`"
            }
            TopographError::Render(_) => {
                "install Graphviz, or pass --no-render to only build the graph model"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error or warning that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A non-fatal build warning.
    Warning(WarningAdapter<'a>),
    /// A fatal error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Warning(w) => fmt::Display::fmt(w, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Warning(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Warning(w) => w.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Reportable::Warning(w) => w.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Warning(w) => w.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a [`TopographError`] into a reportable error.
pub fn to_reportable(err: &TopographError) -> Reportable<'_> {
    Reportable::Error(ErrorAdapter(err))
}

/// Convert build warnings into reportables, in emission order.
pub fn warnings_to_reportables(diagnostics: &[Diagnostic]) -> Vec<Reportable<'_>> {
    diagnostics
        .iter()
        .map(|d| Reportable::Warning(WarningAdapter(d)))
        .collect()
}
