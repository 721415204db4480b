//! Configuration types for Topograph builds.
//!
//! This module provides the application-level settings that are not part of
//! a topology document: where icons live, where artifacts are written and
//! how strict the builders are. All types implement [`serde::Deserialize`]
//! so front ends can load them from a file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`IconsConfig`] - Icon directory and default icon name.
//! - [`OutputConfig`] - Artifact directory.
//! - [`BuildConfig`] - Cluster depth ceiling and [`DuplicatePolicy`].
//!
//! # Example
//!
//! ```
//! # use topograph::config::{AppConfig, DuplicatePolicy};
//! let config = AppConfig::default();
//! assert_eq!(config.icons().default_icon(), "server");
//! assert_eq!(config.build().duplicate_nodes(), DuplicatePolicy::LastWriteWins);
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Icon used when a requested icon file does not exist.
pub const DEFAULT_ICON: &str = "server";

/// Default ceiling on cluster nesting.
pub const DEFAULT_MAX_CLUSTER_DEPTH: usize = 32;

fn default_icons_dir() -> PathBuf {
    PathBuf::from("icons")
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_cluster_depth() -> usize {
    DEFAULT_MAX_CLUSTER_DEPTH
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Icon resource section.
    #[serde(default)]
    icons: IconsConfig,

    /// Artifact output section.
    #[serde(default)]
    output: OutputConfig,

    /// Builder behavior section.
    #[serde(default)]
    build: BuildConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(icons: IconsConfig, output: OutputConfig, build: BuildConfig) -> Self {
        Self {
            icons,
            output,
            build,
        }
    }

    /// Returns the icon configuration.
    pub fn icons(&self) -> &IconsConfig {
        &self.icons
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the build configuration.
    pub fn build(&self) -> &BuildConfig {
        &self.build
    }

    /// Replaces the icon directory.
    pub fn with_icons_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.icons.dir = dir.into();
        self
    }

    /// Replaces the artifact directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.dir = dir.into();
        self
    }
}

/// Icon resource store settings.
///
/// The directory holds one `{name}.svg` file per icon and must contain the
/// default icon.
#[derive(Debug, Clone, Deserialize)]
pub struct IconsConfig {
    #[serde(default = "default_icons_dir")]
    dir: PathBuf,

    #[serde(default = "default_icon")]
    default: String,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            dir: default_icons_dir(),
            default: default_icon(),
        }
    }
}

impl IconsConfig {
    /// Creates icon settings for a directory with the standard default icon.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            default: default_icon(),
        }
    }

    /// Replaces the default icon name.
    pub fn with_default_icon(mut self, name: impl Into<String>) -> Self {
        self.default = name.into();
        self
    }

    /// Returns the icon directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the fallback icon name.
    pub fn default_icon(&self) -> &str {
        &self.default
    }
}

/// Artifact output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl OutputConfig {
    /// Creates output settings for a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the artifact directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// What happens when two nodes declare the same identifier.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Both nodes are drawn, the later one owns the identifier and a
    /// warning is reported.
    #[default]
    LastWriteWins,
    /// The build fails.
    Reject,
}

/// Builder behavior settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_max_cluster_depth")]
    max_cluster_depth: usize,

    #[serde(default)]
    duplicate_nodes: DuplicatePolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_cluster_depth: default_max_cluster_depth(),
            duplicate_nodes: DuplicatePolicy::default(),
        }
    }
}

impl BuildConfig {
    /// Creates build settings.
    pub fn new(max_cluster_depth: usize, duplicate_nodes: DuplicatePolicy) -> Self {
        Self {
            max_cluster_depth,
            duplicate_nodes,
        }
    }

    /// Returns the deepest allowed cluster nesting level.
    pub fn max_cluster_depth(&self) -> usize {
        self.max_cluster_depth
    }

    /// Returns the duplicate identifier policy.
    pub fn duplicate_nodes(&self) -> DuplicatePolicy {
        self.duplicate_nodes
    }
}
