//! Inspect command implementation
//!
//! Decodes provisioning output without touching any cluster specification and
//! prints what a reconciliation would read from it: the API endpoint, the
//! control-plane hosts, and per-pool provider flags.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use tf_reconcile::output::OutputConfig;
use tf_reconcile::provider::CloudProvider;
use tf_reconcile::terraform::{build_hosts, Output};

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the provisioning output (JSON)
    #[arg(short, long, value_name = "PATH", env = "TF_RECONCILE_TERRAFORM")]
    pub terraform: PathBuf,

    /// Provider used to decode worker pools (defaults to the control plane's)
    #[arg(short, long, value_name = "NAME")]
    pub provider: Option<String>,
}

/// Execute the inspect command
pub fn execute(args: InspectArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let output = Output::from_file(&args.terraform).with_context(|| {
        format!(
            "failed to load provisioning output {}",
            args.terraform.display()
        )
    })?;

    let endpoint = &output.kubeone_api.value.endpoint;
    println!(
        "API endpoint: {}",
        if endpoint.is_empty() {
            "<unset>"
        } else {
            endpoint.as_str()
        }
    );

    let control_plane = output.control_plane();
    match control_plane {
        Some(cp) => {
            println!("Cluster name: {}", cp.cluster_name);
            println!("Control plane:");
            for host in build_hosts(cp)? {
                println!(
                    "   {} {} (private {}, ssh {}@port {})",
                    host.id, host.public_address, host.private_address, host.ssh_username, host.ssh_port
                );
            }
        }
        None => println!("{} no control plane hosts", out.warn()),
    }

    let provider_name = args
        .provider
        .clone()
        .or_else(|| control_plane.and_then(|cp| cp.cloud_provider.clone()));
    let provider = provider_name
        .as_deref()
        .map(str::parse::<CloudProvider>)
        .transpose()?;

    println!("Workersets:");
    for (name, docs) in &output.kubeone_workers.value {
        let [raw] = docs.as_slice() else {
            println!(
                "{} {}: {} documents, would be skipped",
                out.warn(),
                name,
                docs.len()
            );
            continue;
        };

        println!("{} {}", out.ok(), name);
        let Some(provider) = provider else {
            continue;
        };
        for flag in provider.flags(raw)? {
            if let Some(value) = flag.value.to_json() {
                println!("   {} = {}", flag.name, value);
            }
        }
    }

    Ok(())
}
