//! Hetzner Cloud worker spec

use serde::Deserialize;

use super::{nullable, Field, ProviderSpec};

/// Worker settings for Hetzner Cloud servers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HetznerSpec {
    #[serde(default, deserialize_with = "nullable")]
    pub server_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub datacenter: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
}

impl ProviderSpec for HetznerSpec {
    const KIND: &'static str = "hetzner";

    const FIELDS: &'static [Field<Self>] = &[
        ("serverType", |s| s.server_type.clone().into()),
        ("datacenter", |s| s.datacenter.clone().into()),
        ("location", |s| s.location.clone().into()),
    ];
}
