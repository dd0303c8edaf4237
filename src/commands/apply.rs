//! Apply command implementation
//!
//! Loads the cluster specification and the provisioning output, reconciles
//! them, and writes the resulting specification as YAML to a file or stdout.
//! Status lines go to stderr so stdout stays a clean YAML stream.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use tf_reconcile::cluster;
use tf_reconcile::manifest::{to_yaml_documents, Document};
use tf_reconcile::output::OutputConfig;
use tf_reconcile::terraform::Output;

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Path to the cluster specification
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "TF_RECONCILE_CONFIG",
        default_value = "cluster.yaml"
    )]
    pub config: PathBuf,

    /// Path to the provisioning output (JSON)
    #[arg(short, long, value_name = "PATH", env = "TF_RECONCILE_TERRAFORM")]
    pub terraform: PathBuf,

    /// Write the reconciled specification here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Suppress status output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the apply command
pub fn execute(args: ApplyArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let mut spec = cluster::from_file(&args.config)
        .with_context(|| format!("failed to load cluster spec {}", args.config.display()))?;
    let output = Output::from_file(&args.terraform).with_context(|| {
        format!(
            "failed to load provisioning output {}",
            args.terraform.display()
        )
    })?;

    let report = match output.apply(&mut spec) {
        Ok(report) => report,
        Err(e) => {
            if !args.quiet {
                eprintln!("{} Reconciliation failed", out.err());
            }
            return Err(e).context("failed to reconcile provisioning output");
        }
    };

    let rendered = to_yaml_documents(&[Document::from_serialize(&spec)?])?;
    match &args.output {
        Some(path) => std::fs::write(path, &rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", rendered),
    }

    if !args.quiet {
        eprintln!("{} {} control plane hosts", out.ok(), report.hosts);
        for name in &report.created {
            eprintln!("{} created workerset {}", out.ok(), name);
        }
        for name in &report.updated {
            eprintln!("{} updated workerset {}", out.ok(), name);
        }
        for name in &report.skipped {
            eprintln!(
                "{} skipped workerset {}: expected exactly one document",
                out.warn(),
                name
            );
        }
        if let Some(path) = &args.output {
            eprintln!("   written to {}", path.display());
        }
    }

    Ok(())
}
