//! Error types for loading topology documents.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised before a topology document reaches the diagram builders.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unrecognized document format (not JSON: {json}; not YAML: {yaml})")]
    Unrecognized {
        json: serde_json::Error,
        yaml: serde_yaml::Error,
    },
}

impl LoadError {
    /// Returns the line of the offending input, when the parser reported one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Json(err) => Some(err.line()),
            Self::Yaml(err) => err.location().map(|location| location.line()),
            Self::Io { .. } | Self::Unrecognized { .. } => None,
        }
    }
}
