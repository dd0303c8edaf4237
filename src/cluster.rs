//! # Cluster Specification
//!
//! This module defines the user-authored cluster specification that
//! provisioning output is reconciled into, and the logic for loading and
//! saving it as YAML.
//!
//! ## Key Components
//!
//! - **`Cluster`**: The whole specification: name, cloud provider, API
//!   endpoint, control-plane hosts and worker pools. Keys this crate does not
//!   model are kept in `extra` so a load/save cycle does not drop them.
//! - **`HostConfig`**: One control-plane host. Host records are always
//!   provisioning-derived and get replaced wholesale on reconciliation.
//! - **`WorkerConfig`**: One named worker pool with its replica count and
//!   provider spec. Provider settings and OS options are opaque documents
//!   (see [`crate::flags::EncodedDocument`]).
//!
//! ## Parsing
//!
//! [`parse`] reads a YAML string and [`from_file`] reads a file. Both fail
//! with `Error::Yaml` on malformed input.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::flags::EncodedDocument;

/// SSH port used when the provisioning output leaves it blank.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// The cluster specification being reconciled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cloud_provider: CloudProviderSpec,
    #[serde(default)]
    pub api_endpoint: ApiEndpoint,
    #[serde(default)]
    pub hosts: Vec<HostConfig>,
    #[serde(default)]
    pub workers: Vec<WorkerConfig>,
    /// Keys not modelled here (versions, network settings, addons, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Cloud provider selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudProviderSpec {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Entry point of the cluster API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    #[serde(default)]
    pub host: String,
}

/// A control-plane host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    #[serde(default)]
    pub id: usize,
    pub public_address: String,
    pub private_address: String,
    #[serde(default)]
    pub ssh_username: String,
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
    #[serde(default)]
    pub ssh_private_key_file: String,
    #[serde(default)]
    pub ssh_agent_socket: String,
}

fn default_ssh_port() -> u16 {
    DEFAULT_SSH_PORT
}

/// A named worker pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    #[serde(default, rename = "providerSpec")]
    pub config: ProviderConfig,
}

impl WorkerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Per-pool machine settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_public_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_system_spec: Option<EncodedDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_provider_spec: Option<EncodedDocument>,
}

impl Cluster {
    /// Find a worker pool by name.
    pub fn worker(&self, name: &str) -> Option<&WorkerConfig> {
        self.workers.iter().find(|w| w.name == name)
    }

    /// Find a worker pool by name, appending an empty one when absent.
    ///
    /// The returned reference points into `self.workers`, so mutations land in
    /// the stored list. The boolean is `true` when the pool was created.
    pub fn worker_mut_or_insert(&mut self, name: &str) -> (&mut WorkerConfig, bool) {
        match self.workers.iter().position(|w| w.name == name) {
            Some(idx) => (&mut self.workers[idx], false),
            None => {
                self.workers.push(WorkerConfig::new(name));
                let last = self.workers.len() - 1;
                (&mut self.workers[last], true)
            }
        }
    }

    /// Serialize the specification as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Parse a cluster specification from a YAML string.
pub fn parse(yaml: &str) -> Result<Cluster> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a cluster specification from a file.
pub fn from_file(path: &Path) -> Result<Cluster> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
