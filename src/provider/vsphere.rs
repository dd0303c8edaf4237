//! vSphere worker spec

use serde::Deserialize;

use super::{nullable, Field, ProviderSpec};

/// Worker settings for vSphere virtual machines.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VSphereSpec {
    #[serde(default, deserialize_with = "nullable")]
    pub allow_insecure: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub cluster: String,
    #[serde(default, deserialize_with = "nullable")]
    pub cpus: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub datacenter: String,
    #[serde(default, deserialize_with = "nullable")]
    pub datastore: String,
    #[serde(default, rename = "diskSizeGB")]
    pub disk_size_gb: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub folder: String,
    #[serde(default, deserialize_with = "nullable", rename = "memoryMB")]
    pub memory_mb: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub template_net_name: String,
    #[serde(default, deserialize_with = "nullable", rename = "templateVMName")]
    pub template_vm_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub vm_net_name: String,
}

impl ProviderSpec for VSphereSpec {
    const KIND: &'static str = "vsphere";

    const FIELDS: &'static [Field<Self>] = &[
        ("allowInsecure", |s| s.allow_insecure.into()),
        ("cluster", |s| s.cluster.clone().into()),
        ("cpus", |s| s.cpus.into()),
        ("datacenter", |s| s.datacenter.clone().into()),
        ("datastore", |s| s.datastore.clone().into()),
        ("diskSizeGB", |s| s.disk_size_gb.into()),
        ("folder", |s| s.folder.clone().into()),
        ("memoryMB", |s| s.memory_mb.into()),
        ("templateNetName", |s| s.template_net_name.clone().into()),
        ("templateVMName", |s| s.template_vm_name.clone().into()),
        ("vmNetName", |s| s.vm_net_name.clone().into()),
    ];
}
