//! # Artboard Replay
//!
//! Replays a pointer script against a scene and prints the outcome.

use std::fs;

use anyhow::Context;
use artboard_replay::{run_replay, CliArgs, ReplayConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,artboard_core=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output. Logs go to stderr so the
/// report on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,artboard_core=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = ReplayConfig::from(args);

    let report = run_replay(&config)
        .with_context(|| format!("replaying {}", config.script_path.display()))?;
    let json = report.to_json(config.pretty).context("serializing replay report")?;

    match &config.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))?;
            tracing::info!("report written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
