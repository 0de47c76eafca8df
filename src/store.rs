//! Article store keyed by link.
//!
//! Articles are kept in first-seen order. A record whose link is already
//! stored is not added again; its section labels are merged into the stored
//! record instead.

use crate::models::ArticleRecord;
use std::collections::HashMap;
use tracing::debug;

/// All articles seen during a run, unique by `link`.
#[derive(Debug, Default)]
pub struct ArticleStore {
    articles: Vec<ArticleRecord>,
    by_link: HashMap<String, usize>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, or merge its sections into the stored record with
    /// the same link. Non-section fields of the stored record are kept.
    ///
    /// Returns `true` when the record was new.
    pub fn upsert(&mut self, record: ArticleRecord) -> bool {
        match self.by_link.get(&record.link) {
            Some(&idx) => {
                let stored = &mut self.articles[idx];
                for section in &record.sections {
                    stored.add_section(section);
                }
                debug!(link = %record.link, sections = ?stored.sections, "Merged duplicate article");
                false
            }
            None => {
                self.by_link.insert(record.link.clone(), self.articles.len());
                self.articles.push(record);
                true
            }
        }
    }

    /// Upsert every record of one issue, in order.
    ///
    /// Returns the number of records that were new.
    pub fn add_all<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = ArticleRecord>,
    {
        let mut added = 0;
        for record in records {
            if self.upsert(record) {
                added += 1;
            }
        }
        added
    }

    /// Articles in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &ArticleRecord> {
        self.articles.iter()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
