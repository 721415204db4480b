//! Rendering style definitions.
//!
//! This module defines the small closed vocabularies a topology document may
//! use, plus the opaque attribute maps that are passed through to the
//! rendering backend untouched.
//!
//! # Overview
//!
//! - [`Direction`]: Rank direction of the laid-out diagram (`TB`, `LR`, `BT`, `RL`)
//! - [`OutputFormat`]: Image format written by the backend (`svg`, `png`, `jpg`, `pdf`)
//! - [`EdgeStyle`]: Line style of a connection (`solid`, `dashed`, `dotted`, ...)
//! - [`AttributeMap`]: Ordered string-to-string map of backend attributes

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Ordered map of backend attributes such as `fontsize` or `splines`.
///
/// The core never interprets these values. Insertion order is preserved so
/// that exported graphs are byte-for-byte reproducible.
pub type AttributeMap = IndexMap<String, String>;

/// Error returned when a style keyword is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} `{value}`, valid values: {expected}")]
pub struct ParseStyleError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseStyleError {
    fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

// =============================================================================
// Direction
// =============================================================================

/// Rank direction of the diagram.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Direction {
    /// Top to bottom (default)
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    /// Left to right
    #[serde(rename = "LR")]
    LeftToRight,
    /// Bottom to top
    #[serde(rename = "BT")]
    BottomToTop,
    /// Right to left
    #[serde(rename = "RL")]
    RightToLeft,
}

impl Direction {
    /// Returns the Graphviz `rankdir` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopToBottom => "TB",
            Self::LeftToRight => "LR",
            Self::BottomToTop => "BT",
            Self::RightToLeft => "RL",
        }
    }
}

impl FromStr for Direction {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TB" => Ok(Self::TopToBottom),
            "LR" => Ok(Self::LeftToRight),
            "BT" => Ok(Self::BottomToTop),
            "RL" => Ok(Self::RightToLeft),
            _ => Err(ParseStyleError::new("direction", s, "TB, LR, BT, RL")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// OutputFormat
// =============================================================================

/// Image format of the rendered artifact.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Scalable vector graphics (default)
    #[default]
    Svg,
    /// Portable network graphics
    Png,
    /// JPEG image
    #[serde(alias = "jpeg")]
    Jpg,
    /// Portable document format
    Pdf,
}

impl OutputFormat {
    /// Returns the file extension, which is also the Graphviz `-T` value.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ParseStyleError::new("output format", s, "svg, png, jpg, pdf")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// =============================================================================
// EdgeStyle
// =============================================================================

/// Line style of a drawn connection.
///
/// Unknown keywords are kept verbatim in [`EdgeStyle::Custom`] and handed to
/// the backend, which decides whether it understands them.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum EdgeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Thick solid line
    Bold,
    /// Invisible line, still used for layout
    Invisible,
    /// Any other backend style string
    Custom(String),
}

impl EdgeStyle {
    /// Returns the Graphviz `style` value.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Bold => "bold",
            Self::Invisible => "invis",
            Self::Custom(style) => style,
        }
    }
}

impl From<&str> for EdgeStyle {
    fn from(s: &str) -> Self {
        match s {
            "solid" => Self::Solid,
            "dashed" => Self::Dashed,
            "dotted" => Self::Dotted,
            "bold" => Self::Bold,
            "invis" | "invisible" => Self::Invisible,
            _ => Self::Custom(s.to_string()),
        }
    }
}

impl From<String> for EdgeStyle {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl fmt::Display for EdgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Scalar helpers
// =============================================================================

/// A scalar document value that is read as text.
///
/// YAML in particular turns `fontsize: 12` or `id: 10` into numbers; the
/// model stores them as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Integer(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
            Scalar::Bool(value) => value.to_string(),
        }
    }
}

/// Deserializes an optional scalar as text. `null` maps to `None`.
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

/// Deserializes a map of scalars as an [`AttributeMap`].
pub(crate) fn attribute_map<'de, D>(deserializer: D) -> Result<AttributeMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Scalar>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| (key, String::from(value)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_str() {
        assert_eq!("LR".parse::<Direction>(), Ok(Direction::LeftToRight));
        assert_eq!("RL".parse::<Direction>(), Ok(Direction::RightToLeft));
        assert!("lr".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_error_message() {
        let err = "sideways".parse::<Direction>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid direction `sideways`, valid values: TB, LR, BT, RL"
        );
    }

    #[test]
    fn test_output_format_jpeg_alias() {
        assert_eq!("jpeg".parse::<OutputFormat>(), Ok(OutputFormat::Jpg));
        assert_eq!(OutputFormat::Jpg.extension(), "jpg");
    }

    #[test]
    fn test_edge_style_keywords() {
        assert_eq!(EdgeStyle::from("dashed"), EdgeStyle::Dashed);
        assert_eq!(EdgeStyle::from("invisible").as_str(), "invis");
        assert_eq!(
            EdgeStyle::from("tapered"),
            EdgeStyle::Custom("tapered".to_string())
        );
        assert_eq!(EdgeStyle::from("tapered").as_str(), "tapered");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Direction::default().as_str(), "TB");
        assert_eq!(OutputFormat::default().extension(), "svg");
        assert_eq!(EdgeStyle::default().as_str(), "solid");
    }
}
