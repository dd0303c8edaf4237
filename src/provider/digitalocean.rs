//! DigitalOcean worker spec

use serde::Deserialize;

use super::{nullable, Field, ProviderSpec};

/// Worker settings for droplets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DigitalOceanSpec {
    #[serde(default, deserialize_with = "nullable")]
    pub region: String,
    #[serde(default, deserialize_with = "nullable")]
    pub size: String,
    #[serde(default, deserialize_with = "nullable")]
    pub backups: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub ipv6: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub private_networking: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub monitoring: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
}

impl ProviderSpec for DigitalOceanSpec {
    const KIND: &'static str = "digitalocean";

    const FIELDS: &'static [Field<Self>] = &[
        ("region", |s| s.region.clone().into()),
        ("size", |s| s.size.clone().into()),
        ("backups", |s| s.backups.into()),
        ("ipv6", |s| s.ipv6.into()),
        ("private_networking", |s| s.private_networking.into()),
        ("monitoring", |s| s.monitoring.into()),
        ("tags", |s| s.tags.clone().into()),
    ];
}
