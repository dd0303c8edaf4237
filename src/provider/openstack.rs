//! OpenStack worker spec

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{nullable, Field, ProviderSpec};

/// Worker settings for OpenStack instances.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenStackSpec {
    #[serde(default, deserialize_with = "nullable", rename = "floatingIPPool")]
    pub floating_ip_pool: String,
    #[serde(default, deserialize_with = "nullable")]
    pub image: String,
    #[serde(default, deserialize_with = "nullable")]
    pub flavor: String,
    #[serde(default, deserialize_with = "nullable")]
    pub security_groups: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub availability_zone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub network: String,
    #[serde(default, deserialize_with = "nullable")]
    pub subnet: String,
    #[serde(default)]
    pub tags: Option<BTreeMap<String, String>>,
}

impl ProviderSpec for OpenStackSpec {
    const KIND: &'static str = "openstack";

    const FIELDS: &'static [Field<Self>] = &[
        ("floatingIPPool", |s| s.floating_ip_pool.clone().into()),
        ("image", |s| s.image.clone().into()),
        ("flavor", |s| s.flavor.clone().into()),
        ("securityGroups", |s| s.security_groups.clone().into()),
        ("availabilityZone", |s| s.availability_zone.clone().into()),
        ("network", |s| s.network.clone().into()),
        ("subnet", |s| s.subnet.clone().into()),
        ("tags", |s| s.tags.clone().into()),
    ];
}
