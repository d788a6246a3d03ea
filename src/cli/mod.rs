//! Command-line surface of the `brands-contract` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::scenarios::SuiteKind;
use crate::testing::OutputFormat;

#[derive(Parser, Debug)]
#[clap(name = "brands-contract", version, about = "Contract checks for the Brands API")]
pub struct CliArgs {
    /// Base URL of the API. Overrides BRANDS_API_BASE_URL.
    #[clap(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds. Overrides BRANDS_API_TIMEOUT_MS.
    #[clap(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run contract suites and report the outcome.
    Run(RunArgs),
    /// Create a brand.
    Create {
        #[clap(long)]
        name: String,
        /// Defaults to the slugified name.
        #[clap(long)]
        slug: Option<String>,
    },
    /// Fetch a brand by id.
    Get { id: String },
    /// Update a brand; omitted fields are left unchanged.
    Update {
        id: String,
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        slug: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Suites to run, in order. All suites when omitted.
    #[clap(long = "suite", value_enum)]
    pub suites: Vec<SuiteKind>,

    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the JSON report to this file.
    #[clap(long)]
    pub report: Option<PathBuf>,
}
