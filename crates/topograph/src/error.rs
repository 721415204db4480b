//! Error types for Topograph operations.
//!
//! This module provides the main error type [`TopographError`] which wraps
//! the fatal conditions of a diagram build. Recoverable problems with single
//! elements are not errors; they are reported as
//! [`Diagnostic`](crate::diagnostic::Diagnostic) warnings instead.

use std::io;

use thiserror::Error;

use topograph_loader::LoadError;

/// The main error type for Topograph operations.
#[derive(Debug, Error)]
pub enum TopographError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Duplicate node identifier `{0}`")]
    DuplicateNode(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),

    #[error("Render error: {0}")]
    Render(String),
}

impl From<crate::export::Error> for TopographError {
    fn from(error: crate::export::Error) -> Self {
        match error {
            crate::export::Error::Render(message) => Self::Render(message),
            error @ crate::export::Error::Io(_) => Self::Export(Box::new(error)),
        }
    }
}
