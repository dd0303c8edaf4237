//! # tf-reconcile
//!
//! This library merges the structured output of an infrastructure
//! provisioning run into a user-authored cluster specification. It is used by
//! the `tf-reconcile` command-line tool but can be embedded in any installer
//! that needs the same merge rules.
//!
//! ## Quick Example
//!
//! ```
//! use tf_reconcile::cluster;
//! use tf_reconcile::terraform::Output;
//!
//! let mut spec = cluster::parse(r#"
//! name: demo
//! cloudProvider:
//!   name: vsphere
//! workers:
//!   - name: pool1
//!     replicas: 2
//!     providerSpec:
//!       cloudProviderSpec:
//!         cluster: prod
//! "#).unwrap();
//!
//! let output = Output::from_json(br#"{
//!   "kubeone_hosts": {"value": {"control_plane": {
//!     "public_address": ["10.0.0.1", "10.0.0.2"],
//!     "ssh_port": "22"
//!   }}},
//!   "kubeone_workers": {"value": {
//!     "pool1": [{"cluster": "other", "cpus": 4, "replicas": 5}]
//!   }}
//! }"#).unwrap();
//!
//! let report = output.apply(&mut spec).unwrap();
//! assert_eq!(report.hosts, 2);
//!
//! let pool = spec.worker("pool1").unwrap();
//! assert_eq!(pool.replicas, Some(2));
//! assert_eq!(
//!     pool.config.cloud_provider_spec.as_ref().unwrap().as_str(),
//!     r#"{"cluster":"prod","cpus":4}"#
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Cluster specification (`cluster`)**: the YAML document the user
//!   authors and the installer consumes. Reconciliation mutates it in place.
//! - **Provisioning output (`terraform`)**: the decoded output document, and
//!   the orchestration that merges it into a cluster.
//! - **Provider adapters (`provider`)**: one declarative flag table per cloud
//!   provider.
//! - **Flag setter (`flags`)**: the set-if-absent write into the opaque
//!   provider settings document.
//!
//! ## Precedence Rules
//!
//! | Field              | Rule                                  |
//! |--------------------|---------------------------------------|
//! | provider settings  | set if absent, never overwritten      |
//! | replicas           | set only when unset                   |
//! | SSH public keys    | appended                              |
//! | operating system   | overwritten by provisioning output    |
//! | OS options         | replaced when any option is given     |
//! | hosts              | replaced when any address is given    |

pub mod cluster;
pub mod error;
pub mod flags;
pub mod manifest;
pub mod output;
pub mod provider;
pub mod terraform;

#[cfg(test)]
mod reconcile_proptest;
