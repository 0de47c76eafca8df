//! Report output.
//!
//! # Submodules
//!
//! - [`json`]: Writes the [`AuthorReport`](crate::models::AuthorReport) as
//!   pretty-printed JSON to stdout or a file
//!
//! Diagnostics go to stderr through `tracing`, so stdout carries nothing but
//! the report.

pub mod json;
