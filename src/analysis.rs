//! Author frequency analysis.

use crate::store::ArticleStore;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Authors that occur two or more times across the stored articles.
///
/// Authors are counted per occurrence while walking articles in store order
/// and each article's authors in listed order. The result is ordered by the
/// point at which each author reached a second occurrence. Names are compared
/// verbatim, so an empty name from a malformed author field is counted like
/// any other.
#[instrument(level = "info", skip_all, fields(articles = store.len()))]
pub fn find_repeated_authors(store: &ArticleStore) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut repeated = Vec::new();

    for author in store.iter().flat_map(|article| article.authors.iter()) {
        let count = counts.entry(author.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            repeated.push(author.clone());
        }
    }

    debug!(distinct = counts.len(), repeated = repeated.len(), "Counted authors");
    repeated
}
