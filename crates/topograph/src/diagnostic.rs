//! Non-fatal build diagnostics.
//!
//! A malformed element (a node without an icon, a connection to an unknown
//! node) never aborts a build. The builders skip or substitute it and report
//! a [`Diagnostic`] instead. Diagnostics are collected, not printed; showing
//! them is up to the caller, after the build.
//!
//! Warning codes are organized by element:
//! - `W1xx` - Node warnings
//! - `W2xx` - Connection warnings
//! - `W3xx` - Cluster warnings

use std::fmt;

use log::debug;

/// Warning codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// Node skipped.
    ///
    /// The node definition has no `id` or no `icon`.
    W100,

    /// Icon not found.
    ///
    /// The icon file does not exist; the default icon was substituted.
    W101,

    /// Duplicate node identifier.
    ///
    /// A later definition replaced an earlier one in the registry.
    W102,

    /// Connection skipped.
    ///
    /// The source or the target identifier is not registered.
    W200,

    /// Cluster skipped.
    ///
    /// The cluster is nested deeper than the configured ceiling.
    W300,
}

impl WarningCode {
    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::W100 => "W100",
            Self::W101 => "W101",
            Self::W102 => "W102",
            Self::W200 => "W200",
            Self::W300 => "W300",
        }
    }

    /// Returns a short description of the warning.
    pub fn description(&self) -> &'static str {
        match self {
            Self::W100 => "node skipped",
            Self::W101 => "icon not found",
            Self::W102 => "duplicate node identifier",
            Self::W200 => "connection skipped",
            Self::W300 => "cluster skipped",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single build warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: WarningCode,
    message: String,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    pub fn warning(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Get the warning code.
    pub fn code(&self) -> WarningCode {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning[{}]: {}", self.code, self.message)
    }
}

/// Collector for the diagnostics of one build.
#[derive(Debug, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic to the collection.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        debug!(code = diagnostic.code.as_str(); "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    /// Returns the number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Finish collection and return the diagnostics in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
