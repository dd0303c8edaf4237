//! Provider-agnostic worker pool fields

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::cluster::WorkerConfig;
use crate::error::Result;
use crate::flags::EncodedDocument;
use crate::provider::{decode_object, nullable};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommonWorkerConfig {
    #[serde(default, deserialize_with = "nullable")]
    ssh_public_keys: Vec<String>,
    #[serde(default)]
    replicas: Option<u32>,
    #[serde(default)]
    operating_system: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    operating_system_spec: Vec<OperatingSystemSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperatingSystemSpec {
    #[serde(default)]
    dist_upgrade_on_boot: Option<bool>,
}

/// Merge the provider-agnostic fields of a raw per-pool document.
///
/// - SSH public keys are appended to the pool's list.
/// - Replicas are only set when the pool has none, so the user-authored
///   value wins.
/// - The operating system is overwritten whenever the document names one;
///   the image identity comes from provisioning.
/// - OS options replace the stored document when any option is given.
pub fn merge_common(worker: &mut WorkerConfig, raw: &JsonValue) -> Result<()> {
    let common: CommonWorkerConfig = decode_object(raw, "common worker config")?;

    worker.config.ssh_public_keys.extend(common.ssh_public_keys);

    if worker.replicas.is_none() {
        worker.replicas = common.replicas;
    }

    if let Some(os) = common.operating_system.filter(|os| !os.is_empty()) {
        worker.config.operating_system = Some(os);
    }

    let mut os_spec = Map::new();
    for spec in &common.operating_system_spec {
        if let Some(upgrade) = spec.dist_upgrade_on_boot {
            os_spec.insert("distUpgradeOnBoot".to_string(), JsonValue::Bool(upgrade));
        }
    }
    if !os_spec.is_empty() {
        worker.config.operating_system_spec = Some(EncodedDocument::encode(&os_spec)?);
    }

    Ok(())
}
