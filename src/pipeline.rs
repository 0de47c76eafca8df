//! Sequential fetch → parse → merge over all configured issues, followed by
//! author analysis and report assembly.

use crate::analysis::find_repeated_authors;
use crate::config::Settings;
use crate::error::Result;
use crate::models::AuthorReport;
use crate::report::build_report;
use crate::scrapers::zeit;
use crate::store::ArticleStore;
use reqwest::Client;
use tracing::{info, instrument, warn};

/// Fetch and parse every issue in order, merging all articles into one store.
///
/// Issues are processed one at a time; the first failure aborts the run.
#[instrument(level = "info", skip_all, fields(issues = settings.issues.len()))]
pub async fn collect_articles(client: &Client, settings: &Settings) -> Result<ArticleStore> {
    let mut store = ArticleStore::new();

    for issue in &settings.issues {
        let raw = zeit::fetch_index(client, &settings.base_url, issue).await?;
        let records = zeit::parse_index(&raw, issue)?;
        let parsed = records.len();
        let added = store.add_all(records);
        info!(%issue, parsed, added, merged = parsed - added, "Processed issue");
    }

    if store.is_empty() {
        warn!("No articles found in any issue");
    }
    info!(count = store.len(), "Done fetching articles");
    Ok(store)
}

/// Run the whole pipeline and return the repeated-author report.
pub async fn run(client: &Client, settings: &Settings) -> Result<AuthorReport> {
    let store = collect_articles(client, settings).await?;

    let repeated = find_repeated_authors(&store);
    info!(
        repeated = repeated.len(),
        "Done comparing authors (found {} authors twice or more)",
        repeated.len()
    );

    Ok(build_report(&repeated, &store))
}
