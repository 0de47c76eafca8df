//! Command-line interface definitions.
//!
//! All options are optional; without any, the two default issues are fetched
//! from the public XML endpoint and the report is printed to stdout.

use clap::Parser;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Default issues, report on stdout
/// zeit_authors
///
/// # Explicit issues, report to a file
/// zeit_authors -i 2019/49 -i 2019/50 -i 2019/51 -o ./authors.json
///
/// # Issues and endpoint from a YAML file
/// zeit_authors -c ./zeit.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Issue key to fetch, e.g. 2019/49 (repeatable)
    #[arg(short, long = "issue", value_name = "KEY")]
    pub issues: Vec<String>,

    /// Base URL the issue key and `/index` are appended to
    #[arg(long, env = "ZEIT_BASE_URL")]
    pub base_url: Option<String>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}
