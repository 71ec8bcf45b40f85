//! Command-line definitions for the `entitle` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "entitle")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect the license state served by a configured entitlement set")]
pub(crate) struct Cli {
    /// Config file (TOML, JSON or YAML). Defaults to `entitle.*` in the working directory.
    #[arg(long, short, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print every license accessor and its current answer
    Report {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print whether any of the given features is licensed
    Check {
        /// Feature wire names, e.g. `feat:saml`
        #[arg(required = true, value_name = "FEATURE")]
        features: Vec<String>,
    },
    /// Print the raw provider value for a feature or quota key
    Value {
        /// Wire name, e.g. `quota:aiCredits`
        key: String,
    },
}
