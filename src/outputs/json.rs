//! JSON output of the repeated-author report.
//!
//! The report is written once, at the end of a successful run:
//! ```text
//! {
//!   "authors": [
//!     { "name": "...", "articles": [ { "link": "https://zeit.de/...", ... } ] }
//!   ]
//! }
//! ```

use crate::error::Result;
use crate::models::AuthorReport;
use std::path::Path;
use tokio::fs;
use tokio::io::{self, AsyncWriteExt};
use tracing::{error, info, instrument};

/// Render the report as pretty-printed JSON with a trailing newline.
pub fn render_report(report: &AuthorReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

/// Write the report to `output`, or to stdout when no path is given.
///
/// Missing parent directories of `output` are created.
#[instrument(level = "info", skip_all, fields(output = ?output))]
pub async fn write_report(report: &AuthorReport, output: Option<&Path>) -> Result<()> {
    let json = render_report(report)?;

    let Some(path) = output else {
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes()).await?;
        stdout.flush().await?;
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    info!(path = %path.display(), "Writing JSON");
    fs::write(path, json).await?;
    info!(path = %path.display(), authors = report.authors.len(), "Wrote author report");
    Ok(())
}
