//! Azure worker spec

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{nullable, Field, ProviderSpec};

/// Worker settings for Azure virtual machines.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureSpec {
    #[serde(default, deserialize_with = "nullable", rename = "assignPublicIP")]
    pub assign_public_ip: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub availability_set: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable")]
    pub resource_group: String,
    #[serde(default, deserialize_with = "nullable")]
    pub route_table_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub security_group_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub subnet_name: String,
    #[serde(default)]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub vm_size: String,
    #[serde(default, deserialize_with = "nullable")]
    pub vnet_name: String,
}

impl ProviderSpec for AzureSpec {
    const KIND: &'static str = "azure";

    const FIELDS: &'static [Field<Self>] = &[
        ("assignPublicIP", |s| s.assign_public_ip.into()),
        ("availabilitySet", |s| s.availability_set.clone().into()),
        ("location", |s| s.location.clone().into()),
        ("resourceGroup", |s| s.resource_group.clone().into()),
        ("routeTableName", |s| s.route_table_name.clone().into()),
        ("securityGroupName", |s| s.security_group_name.clone().into()),
        ("subnetName", |s| s.subnet_name.clone().into()),
        ("tags", |s| s.tags.clone().into()),
        ("vmSize", |s| s.vm_size.clone().into()),
        ("vnetName", |s| s.vnet_name.clone().into()),
    ];
}
