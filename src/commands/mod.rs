//! # CLI Command Implementations
//!
//! Each subcommand of `tf-reconcile` lives in its own file with:
//! - An `Args` struct deriving `clap::Args`.
//! - An `execute` function that performs the command by calling into the
//!   `tf_reconcile` library.

pub mod apply;
pub mod completions;
pub mod inspect;
