//! Shell completion scripts
//!
//! ```bash
//! tf-reconcile completions bash > ~/.local/share/bash-completion/completions/tf-reconcile
//! tf-reconcile completions zsh > ~/.zfunc/_tf-reconcile
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for the requested shell to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "tf-reconcile", &mut io::stdout());
    Ok(())
}
