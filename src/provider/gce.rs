//! Google Compute Engine worker spec

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{nullable, Field, ProviderSpec};

/// Worker settings for GCE instances.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GceSpec {
    #[serde(default, deserialize_with = "nullable")]
    pub disk_size: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub disk_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub machine_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub network: String,
    #[serde(default, deserialize_with = "nullable")]
    pub subnetwork: String,
    #[serde(default, deserialize_with = "nullable")]
    pub zone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub preemptible: bool,
    #[serde(default, rename = "assignPublicIPAddress")]
    pub assign_public_ip_address: Option<bool>,
    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub multizone: Option<bool>,
    #[serde(default)]
    pub regional: Option<bool>,
}

impl ProviderSpec for GceSpec {
    const KIND: &'static str = "gce";

    const FIELDS: &'static [Field<Self>] = &[
        ("diskSize", |s| s.disk_size.into()),
        ("diskType", |s| s.disk_type.clone().into()),
        ("machineType", |s| s.machine_type.clone().into()),
        ("network", |s| s.network.clone().into()),
        ("subnetwork", |s| s.subnetwork.clone().into()),
        ("zone", |s| s.zone.clone().into()),
        ("preemptible", |s| s.preemptible.into()),
        ("assignPublicIPAddress", |s| s.assign_public_ip_address.into()),
        ("labels", |s| s.labels.clone().into()),
        ("tags", |s| s.tags.clone().into()),
        ("multizone", |s| s.multizone.into()),
        ("regional", |s| s.regional.into()),
    ];

    const DEFAULTS: &'static [(&'static str, &'static str)] = &[("diskType", "pd-standard")];
}
