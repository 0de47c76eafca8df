//! # ZEIT Authors
//!
//! Fetches the XML indexes of weekly DIE ZEIT print issues, collects every
//! article listed in them, and reports the authors who wrote two or more of
//! those articles.
//!
//! ## Usage
//!
//! ```sh
//! zeit_authors -i 2019/49 -i 2019/51 > authors.json
//! ```
//!
//! ## Architecture
//!
//! The application is a single sequential pipeline:
//! 1. **Fetching**: Download each issue index (Latin-1) one after another
//! 2. **Parsing**: Extract one article record per container in each section
//! 3. **Merging**: Fold articles listed in several sections or issues into one
//!    record with all section labels
//! 4. **Analysis**: Find authors occurring on more than one article
//! 5. **Output**: Print the pretty JSON report to stdout (logs go to stderr)

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod report;
mod scrapers;
mod store;
mod utils;

use cli::Cli;
use config::{FileConfig, Settings};
use outputs::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("zeit_authors starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let file_config = match args.config.as_deref() {
        Some(path) => FileConfig::load(path).await?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, file_config)?;
    info!(base_url = %settings.base_url, issues = ?settings.issues, "Resolved settings");

    let client = reqwest::Client::new();
    let report = match pipeline::run(&client, &settings).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Run failed; no report written");
            return Err(e.into());
        }
    };

    json::write_report(&report, args.output.as_deref().map(Path::new)).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        authors = report.authors.len(),
        "Execution complete"
    );

    Ok(())
}
