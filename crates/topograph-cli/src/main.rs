//! Topograph CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use topograph_cli::{
    Args,
    error_adapter::{Reportable, to_reportable, warnings_to_reportables},
};

fn render(reporter: &miette::GraphicalReportHandler, reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, reportable)
        .expect("Writing to String buffer is infallible");
    writer
}

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    // Parse configuration first
    let args = Args::parse();

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Topograph");
    debug!(args:?; "Parsed arguments");

    let reporter = miette::GraphicalReportHandler::new();

    // Run the application
    match topograph_cli::run(&args) {
        Ok(output) => {
            for reportable in warnings_to_reportables(output.diagram.diagnostics()) {
                warn!("{}", render(&reporter, &reportable));
            }
            if let Some(artifact) = &output.artifact {
                println!("{}", artifact.display());
            }
        }
        Err(err) => {
            error!("{}", render(&reporter, &to_reportable(&err)));
            process::exit(1);
        }
    }

    info!("Completed successfully");
}
