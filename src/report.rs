//! Repeated-author report assembly.

use crate::models::{ArticleRecord, AuthorEntry, AuthorReport, ReportArticle};
use crate::store::ArticleStore;
use tracing::{debug, instrument};

/// Turn a metadata link into the public article URL.
///
/// Drops the first `xml.` and upgrades the first `http://` to `https://`;
/// both are literal, first-occurrence replacements.
///
/// ```ignore
/// assert_eq!(
///     public_link("http://xml.zeit.de/2019/49/some-article"),
///     "https://zeit.de/2019/49/some-article"
/// );
/// ```
pub fn public_link(link: &str) -> String {
    link.replacen("xml.", "", 1).replacen("http://", "https://", 1)
}

impl From<&ArticleRecord> for ReportArticle {
    fn from(article: &ArticleRecord) -> Self {
        ReportArticle {
            link: public_link(&article.link),
            ressorts: article.sections.clone(),
            sub_ressort: article.sub_section.clone(),
            content_type: article.content_type.clone(),
            super_title: article.super_title.clone(),
            title: article.title.clone(),
            genre: article.genre.clone(),
        }
    }
}

/// Build the report: one entry per repeated author, in the given order,
/// each listing every stored article that names the author.
#[instrument(level = "info", skip_all, fields(authors = repeated.len()))]
pub fn build_report(repeated: &[String], store: &ArticleStore) -> AuthorReport {
    let authors = repeated
        .iter()
        .map(|name| {
            let articles: Vec<ReportArticle> = store
                .iter()
                .filter(|article| article.has_author(name))
                .map(ReportArticle::from)
                .collect();
            debug!(author = %name, articles = articles.len(), "Collected author articles");
            AuthorEntry {
                name: name.clone(),
                articles,
            }
        })
        .collect();

    AuthorReport { authors }
}
