//! Icon resolution.

use std::path::{Path, PathBuf};

use log::trace;

use crate::{
    config::IconsConfig,
    diagnostic::{Diagnostic, Diagnostics, WarningCode},
};

/// File extension of every icon resource.
pub const ICON_EXTENSION: &str = "svg";

/// Maps symbolic icon names to files in an icon directory.
///
/// Resolution never fails: a name without a matching file resolves to the
/// default icon and reports a [`WarningCode::W101`] diagnostic.
#[derive(Debug, Clone)]
pub struct IconResolver {
    dir: PathBuf,
    default_icon: String,
}

impl IconResolver {
    /// Creates a resolver over `dir` that falls back to `default_icon`.
    pub fn new(dir: impl Into<PathBuf>, default_icon: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            default_icon: default_icon.into(),
        }
    }

    /// Creates a resolver from the icon section of the app config.
    pub fn from_config(config: &IconsConfig) -> Self {
        Self::new(config.dir(), config.default_icon())
    }

    /// Returns the icon directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path an icon name maps to, whether or not it exists.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{ICON_EXTENSION}"))
    }

    /// Resolves an icon name to an existing resource, or to the default icon.
    pub fn resolve(&self, name: &str, diagnostics: &mut Diagnostics) -> PathBuf {
        let path = self.path_for(name);
        if path.exists() {
            trace!(icon = name, path = path.display().to_string(); "Resolved icon");
            return path;
        }

        let fallback = self.path_for(&self.default_icon);
        diagnostics.emit(
            Diagnostic::warning(
                WarningCode::W101,
                format!(
                    "icon not found: {}, using default {}.{ICON_EXTENSION}",
                    path.display(),
                    self.default_icon
                ),
            )
            .with_help(format!(
                "add {name}.{ICON_EXTENSION} to {}",
                self.dir.display()
            )),
        );
        fallback
    }
}
