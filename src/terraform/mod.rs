//! # Provisioning Output Reconciliation
//!
//! This module decodes the JSON outputs of a provisioning run and merges them
//! into a previously loaded [`Cluster`] specification.
//!
//! ## Input Shape
//!
//! ```json
//! {
//!   "kubeone_api":     { "value": { "endpoint": "lb.example.com" } },
//!   "kubeone_hosts":   { "value": { "control_plane": { "public_address": ["..."], ... } } },
//!   "kubeone_workers": { "value": { "pool1": [ { "region": "..." } ] } }
//! }
//! ```
//!
//! `control_plane` may be a single object or a list of objects; only the first
//! descriptor is used.
//!
//! ## Reconciliation Steps
//!
//! [`Output::apply`] runs, in order:
//!
//! 1. **Hosts**: builds host records from the control-plane addresses
//!    (`hosts.rs`). These replace the cluster's host list, unless the
//!    descriptor lists no addresses.
//! 2. **Identity**: copies the API endpoint, cluster name and cloud provider
//!    when the output supplies them.
//! 3. **Workers**: merges every worker pool into the cluster (`workers.rs`),
//!    through the provider adapter and the common field merger (`common.rs`).
//!
//! Host records are built before anything is written, so a malformed
//! control plane leaves the cluster untouched. A failure while merging a
//! worker pool aborts the run; pools merged before it keep their changes.

mod common;
mod hosts;
mod workers;

pub use common::merge_common;
pub use hosts::build_hosts;

use std::collections::BTreeMap;
use std::path::Path;

use log::info;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use crate::cluster::Cluster;
use crate::error::{Error, Result};
use crate::provider::{decode_object, nullable};

/// Decoded provisioning output.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub kubeone_api: OutputValue<ApiOutput>,
    #[serde(default)]
    pub kubeone_hosts: OutputValue<HostsOutput>,
    #[serde(default)]
    pub kubeone_workers: OutputValue<BTreeMap<String, Vec<JsonValue>>>,
}

/// Every output is wrapped in a `value` key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputValue<T> {
    #[serde(default)]
    pub value: T,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiOutput {
    #[serde(default, deserialize_with = "nullable")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostsOutput {
    #[serde(default, deserialize_with = "one_or_many")]
    pub control_plane: Vec<ControlPlane>,
}

/// A control-plane descriptor with parallel address lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ControlPlane {
    #[serde(default, deserialize_with = "nullable")]
    pub cluster_name: String,
    #[serde(default)]
    pub cloud_provider: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub public_address: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub private_address: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub ssh_user: String,
    #[serde(default, deserialize_with = "nullable")]
    pub ssh_port: String,
    #[serde(default, deserialize_with = "nullable")]
    pub ssh_private_key_file: String,
    #[serde(default, deserialize_with = "nullable")]
    pub ssh_agent_socket: String,
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<ControlPlane>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<ControlPlane>),
        One(ControlPlane),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::Many(list)) => list,
        Some(OneOrMany::One(cp)) => vec![cp],
        None => Vec::new(),
    })
}

/// Summary of what a reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Number of host records written.
    pub hosts: usize,
    /// Pools that did not exist before and were appended.
    pub created: Vec<String>,
    /// Pools that already existed and were merged into.
    pub updated: Vec<String>,
    /// Pools skipped because their raw document list did not hold exactly one entry.
    pub skipped: Vec<String>,
    /// Provider flags inserted per pool.
    pub inserted_flags: BTreeMap<String, Vec<&'static str>>,
}

impl Output {
    /// Decode provisioning output from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` if the input is not a JSON object or a section
    /// does not match the expected shape.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let raw: JsonValue =
            serde_json::from_slice(bytes).map_err(|e| Error::decode("provisioning output", e))?;
        decode_object(&raw, "provisioning output")
    }

    /// Read and decode provisioning output from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_json(&bytes)
    }

    /// The first control-plane descriptor, if any.
    pub fn control_plane(&self) -> Option<&ControlPlane> {
        self.kubeone_hosts.value.control_plane.first()
    }

    /// Merge this output into the given cluster specification.
    ///
    /// # Errors
    ///
    /// - `Error::MissingControlPlane` if no control-plane descriptor is given
    /// - `Error::MalformedField` if the SSH port is not a port number
    /// - `Error::UnknownProvider` if the cluster's provider has no adapter
    /// - `Error::WorkerPool` wrapping any failure while merging a pool
    pub fn apply(&self, cluster: &mut Cluster) -> Result<Reconciliation> {
        let control_plane = self.control_plane().ok_or(Error::MissingControlPlane)?;
        let hosts = build_hosts(control_plane)?;

        let mut report = Reconciliation {
            hosts: hosts.len(),
            ..Default::default()
        };

        let endpoint = &self.kubeone_api.value.endpoint;
        if !endpoint.is_empty() {
            cluster.api_endpoint.host = endpoint.clone();
        }
        if !control_plane.cluster_name.is_empty() {
            cluster.name = control_plane.cluster_name.clone();
        }
        if let Some(provider) = &control_plane.cloud_provider {
            cluster.cloud_provider.name = provider.clone();
        }
        if hosts.is_empty() {
            info!("No control plane addresses given, keeping existing hosts");
        } else {
            cluster.hosts = hosts;
            info!("Applied {} control plane hosts", report.hosts);
        }

        workers::reconcile_workers(cluster, &self.kubeone_workers.value, &mut report)?;

        Ok(report)
    }
}
