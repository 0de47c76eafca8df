//! Data models for indexed articles and the repeated-author report.
//!
//! - [`ArticleRecord`]: one article as found in an issue index
//! - [`AuthorReport`]: the top-level JSON document written at the end of a run
//! - [`AuthorEntry`] / [`ReportArticle`]: its nested author and article objects
//!
//! The report types serialize with camelCase field names and the German
//! `ressorts`/`subRessort` keys consumers of the report expect.

use serde::{Deserialize, Serialize};

/// One article as found in an issue index.
///
/// Identity is the `link` alone: two records with the same link are the same
/// article, no matter which section or issue they were found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Metadata document URL, e.g. `http://xml.zeit.de/2019/49/some-article`.
    pub link: String,
    /// Section labels the article was listed under, without duplicates,
    /// in the order they were first seen.
    pub sections: Vec<String>,
    /// Finer classification taken from the block's `ressort` attribute.
    pub sub_section: String,
    pub content_type: String,
    /// Short eyebrow label shown above the title.
    pub super_title: String,
    pub title: String,
    /// `None` when the block carries no `genre` attribute at all.
    pub genre: Option<String>,
    /// Raw `;`-split author field. Empty segments are kept.
    pub authors: Vec<String>,
}

impl ArticleRecord {
    /// Add a section label unless the article already lists it.
    ///
    /// Returns `true` when the label was new.
    pub fn add_section(&mut self, section: &str) -> bool {
        if self.sections.iter().any(|s| s == section) {
            return false;
        }
        self.sections.push(section.to_string());
        true
    }

    /// Whether `author` appears verbatim in the author list.
    pub fn has_author(&self, author: &str) -> bool {
        self.authors.iter().any(|a| a == author)
    }
}

/// Top-level report document: `{"authors": [...]}`.
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct AuthorReport {
    pub authors: Vec<AuthorEntry>,
}

/// An author found on more than one article, with all of their articles.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct AuthorEntry {
    pub name: String,
    pub articles: Vec<ReportArticle>,
}

/// An article as it appears in the report.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportArticle {
    /// Public `https://` URL of the article.
    pub link: String,
    pub ressorts: Vec<String>,
    pub sub_ressort: String,
    pub content_type: String,
    pub super_title: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}
