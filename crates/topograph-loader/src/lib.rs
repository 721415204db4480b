//! Topology document loader.
//!
//! Turns JSON or YAML text into a [`TopologyConfig`]. The format is taken from
//! the file extension when there is one; otherwise the text is tried as JSON
//! first and as YAML second.
//!
//! # Example
//!
//! ```
//! use topograph_loader::{SourceFormat, parse};
//!
//! let source = r#"
//! title: Lab
//! nodes:
//!   - id: gw
//!     icon: router
//! "#;
//!
//! let config = parse(source, Some(SourceFormat::Yaml)).expect("valid document");
//! assert_eq!(config.title(), "Lab");
//! assert_eq!(config.nodes().len(), 1);
//! ```

pub mod error;

pub use error::LoadError;

use std::{fs, path::Path};

use log::{debug, info};
use serde::de::IgnoredAny;

use topograph_core::config::TopologyConfig;

/// Serialization format of a topology document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Detects the format from a file extension (`.json`, `.yml`, `.yaml`).
    ///
    /// Returns `None` for any other or missing extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parses a topology document.
///
/// With `format` set the text is parsed strictly in that format. Without it,
/// the text is treated as JSON when it is syntactically valid JSON and as
/// YAML otherwise.
///
/// # Errors
///
/// Returns [`LoadError`] if the text is malformed or does not describe a
/// topology (for example an unknown `direction`).
pub fn parse(source: &str, format: Option<SourceFormat>) -> Result<TopologyConfig, LoadError> {
    match format {
        Some(SourceFormat::Json) => Ok(serde_json::from_str(source)?),
        Some(SourceFormat::Yaml) => Ok(serde_yaml::from_str(source)?),
        None => sniff(source),
    }
}

/// Reads and parses a topology document from disk.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, and any error of
/// [`parse`] otherwise.
pub fn load_file(path: impl AsRef<Path>) -> Result<TopologyConfig, LoadError> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path);
    info!(path = path.display().to_string(), format:?; "Loading topology document");

    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&source, format)
}

/// Converts an already parsed JSON value into a topology.
///
/// # Errors
///
/// Returns [`LoadError::Json`] if the value does not describe a topology.
pub fn from_value(value: serde_json::Value) -> Result<TopologyConfig, LoadError> {
    Ok(serde_json::from_value(value)?)
}

fn sniff(source: &str) -> Result<TopologyConfig, LoadError> {
    match serde_json::from_str::<IgnoredAny>(source) {
        Ok(_) => {
            debug!("Detected JSON document");
            Ok(serde_json::from_str(source)?)
        }
        Err(json) => {
            debug!(reason = json.to_string(); "Not JSON, trying YAML");
            serde_yaml::from_str(source).map_err(|yaml| LoadError::Unrecognized { json, yaml })
        }
    }
}

#[cfg(test)]
mod tests {
    use topograph_core::style::{Direction, OutputFormat};

    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(SourceFormat::from_path("net.json"), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_path("net.YAML"), Some(SourceFormat::Yaml));
        assert_eq!(SourceFormat::from_path("dir/net.yml"), Some(SourceFormat::Yaml));
        assert_eq!(SourceFormat::from_path("net.txt"), None);
        assert_eq!(SourceFormat::from_path("net"), None);
    }

    #[test]
    fn test_parse_json() {
        let source = r#"{ "title": "Office", "direction": "LR", "outformat": "png" }"#;
        let config = parse(source, Some(SourceFormat::Json)).unwrap();

        assert_eq!(config.title(), "Office");
        assert_eq!(config.direction(), Direction::LeftToRight);
        assert_eq!(config.outformat(), OutputFormat::Png);
    }

    #[test]
    fn test_parse_yaml_with_nested_clusters() {
        let source = r#"
clusters:
  - name: Internal
    subnet: 10.0.0.0/8
    clusters:
      - name: Services
        nodes:
          - { id: dns, icon: coredns, ip: 10.0.0.53 }
"#;
        let config = parse(source, Some(SourceFormat::Yaml)).unwrap();

        let internal = &config.clusters()[0];
        assert_eq!(internal.display_name(), "Internal (10.0.0.0/8)");
        assert_eq!(internal.clusters()[0].nodes()[0].ip(), Some("10.0.0.53"));
    }

    #[test]
    fn test_sniff_prefers_json() {
        let config = parse(r#"{ "output_filename": "sniffed" }"#, None).unwrap();
        assert_eq!(config.output_filename(), "sniffed");
    }

    #[test]
    fn test_sniff_falls_back_to_yaml() {
        let config = parse("output_filename: sniffed\n", None).unwrap();
        assert_eq!(config.output_filename(), "sniffed");
    }

    #[test]
    fn test_sniff_reports_both_failures() {
        let err = parse("nodes: [unterminated", None).unwrap_err();
        assert!(matches!(err, LoadError::Unrecognized { .. }));
        assert!(err.to_string().starts_with("unrecognized document format"));
    }

    #[test]
    fn test_sniffed_json_keeps_attribute_order() {
        let source = r#"{ "node_attr": { "z": "1", "a": "2", "m": "3" } }"#;
        let sniffed = parse(source, None).unwrap();
        let declared = parse(source, Some(SourceFormat::Json)).unwrap();

        let keys: Vec<&str> = sniffed.node_attr().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(sniffed, declared);
    }

    #[test]
    fn test_from_value_keeps_attribute_order() {
        let source = r#"{ "graph_attr": { "splines": "ortho", "bgcolor": "white" } }"#;
        let value = serde_json::from_str(source).unwrap();
        let config = from_value(value).unwrap();

        let keys: Vec<&str> = config.graph_attr().keys().map(String::as_str).collect();
        assert_eq!(keys, ["splines", "bgcolor"]);
    }

    #[test]
    fn test_schema_error_in_json_is_not_retried_as_yaml() {
        let err = parse(r#"{ "outformat": "gif" }"#, None).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_json_error_reports_line() {
        let err = parse("{\n  \"title\": \n}", Some(SourceFormat::Json)).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }
}
