//! Packet worker spec

use serde::Deserialize;

use super::{nullable, Field, ProviderSpec};

/// Worker settings for Packet bare-metal devices.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PacketSpec {
    #[serde(default, deserialize_with = "nullable", rename = "projectID")]
    pub project_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub facilities: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub instance_type: String,
}

impl ProviderSpec for PacketSpec {
    const KIND: &'static str = "packet";

    const FIELDS: &'static [Field<Self>] = &[
        ("projectID", |s| s.project_id.clone().into()),
        ("facilities", |s| s.facilities.clone().into()),
        ("instanceType", |s| s.instance_type.clone().into()),
    ];
}
