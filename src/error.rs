//! Error types for the issue index pipeline.
//!
//! Every failure here is fatal to a run: nothing is retried and no partial
//! report is written. The structural variants carry enough context (issue,
//! section, truncated container markup) to find the offending element in the
//! upstream document.

use thiserror::Error;

/// Errors produced while fetching, parsing or reporting.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure or a non-success HTTP status for an issue index.
    #[error("failed to fetch index for issue {issue}: {source}")]
    Fetch {
        issue: String,
        #[source]
        source: reqwest::Error,
    },

    /// The configured base endpoint is not an absolute URL.
    #[error("invalid base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// An article container without any `block` element.
    #[error("issue {issue}, section {section:?}: article container has no block: {container}")]
    NoBlock {
        issue: String,
        section: String,
        container: String,
    },

    /// A block lacking a child element every article must have.
    #[error(
        "issue {issue}, section {section:?}: block is missing required <{field}> element: {container}"
    )]
    MissingRequiredField {
        issue: String,
        section: String,
        container: String,
        field: &'static str,
    },

    /// The YAML config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The YAML config file is not valid.
    #[error("invalid config {path}: {source}")]
    ConfigFormat {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
