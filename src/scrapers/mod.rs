//! Issue index sources.
//!
//! Each source module follows the same two-step pattern:
//!
//! 1. **Fetching**: download one issue's index document as text
//! 2. **Parsing**: turn the index markup into [`ArticleRecord`](crate::models::ArticleRecord)s
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | DIE ZEIT | [`zeit`] | XML index scraping | Weekly print issues, Latin-1 encoded |

pub mod zeit;
