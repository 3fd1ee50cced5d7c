//! Vignette Batch
//!
//! Converts base image / mask pairs found under an input tree into vignette
//! authoring files written to a freshly mirrored output tree. Every decision
//! is appended to a plain text run log beside the trees.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod authoring;
mod config;
mod domain;
mod engine;
mod journal;

use crate::authoring::ImageAuthoring;
use crate::config::{LoggingSettings, Settings};
use crate::engine::Driver;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = Settings::load().context("Failed to load configuration")?;
    init_tracing(&settings.logging);

    info!(
        root = %settings.paths.root.display(),
        "Starting vignette-batch v{}",
        env!("CARGO_PKG_VERSION")
    );

    let driver = Driver::new(settings, ImageAuthoring::new());
    let summary = driver.run().context("Batch run aborted")?;

    info!(
        directories = summary.directories,
        processed = summary.processed,
        skipped = summary.skipped,
        failed = summary.failed,
        "Batch run complete"
    );

    Ok(())
}

/// Diagnostics go to stderr so stdout only carries per-file progress lines
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
