//! # tf-reconcile CLI
//!
//! Binary entry point for the `tf-reconcile` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Initialising logging from the `--log-level` flag.
//! - Dispatching to the selected command.
//!
//! The reconciliation itself lives in the library crate; the binary is a thin
//! wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
