//! Command-line argument definitions for the Topograph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the topology document, override its
//! output settings, pick the application config and control logging.

use clap::Parser;

use topograph::style::{Direction, OutputFormat};

/// Command-line arguments for the Topograph diagram tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the topology document (JSON or YAML)
    #[arg(help = "Path to the topology document")]
    pub input: String,

    /// Output file name without extension, overrides `output_filename`
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (svg, png, jpg, pdf), overrides `outformat`
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Layout direction (TB, LR, BT, RL), overrides `direction`
    #[arg(short, long)]
    pub direction: Option<Direction>,

    /// Diagram title, overrides `title`
    #[arg(long)]
    pub title: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Icon directory, overrides `[icons] dir`
    #[arg(long)]
    pub icons_dir: Option<String>,

    /// Output directory, overrides `[output] dir`
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Replace the output file name with a generated unique one
    #[arg(long, conflicts_with = "output")]
    pub unique_name: bool,

    /// Also write the generated DOT text to this path
    #[arg(long)]
    pub emit_dot: Option<String>,

    /// Build the graph model without invoking Graphviz
    #[arg(long)]
    pub no_render: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["topograph", "net.yaml"]).unwrap();

        assert_eq!(args.input, "net.yaml");
        assert_eq!(args.output, None);
        assert!(!args.unique_name);
        assert!(!args.no_render);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "topograph", "net.json", "-o", "lab", "-f", "png", "-d", "LR", "--title", "Lab",
        ])
        .unwrap();

        assert_eq!(args.output.as_deref(), Some("lab"));
        assert_eq!(args.format, Some(OutputFormat::Png));
        assert_eq!(args.direction, Some(Direction::LeftToRight));
        assert_eq!(args.title.as_deref(), Some("Lab"));
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        assert!(Args::try_parse_from(["topograph", "net.json", "-f", "gif"]).is_err());
    }

    #[test]
    fn test_unique_name_conflicts_with_output() {
        assert!(Args::try_parse_from(["topograph", "n.json", "-o", "x", "--unique-name"]).is_err());
    }
}
