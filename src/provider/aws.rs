//! AWS worker spec

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{nullable, Field, ProviderSpec};

/// Worker settings for EC2 instances.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsSpec {
    #[serde(default, deserialize_with = "nullable")]
    pub ami: String,
    #[serde(default, deserialize_with = "nullable")]
    pub availability_zone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub instance_profile: String,
    #[serde(default, deserialize_with = "nullable")]
    pub region: String,
    #[serde(default, deserialize_with = "nullable", rename = "securityGroupIDs")]
    pub security_group_ids: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub subnet_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub vpc_id: String,
    #[serde(default)]
    pub instance_type: Option<String>,
    #[serde(default)]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub disk_type: Option<String>,
    #[serde(default)]
    pub disk_size: Option<i64>,
}

impl ProviderSpec for AwsSpec {
    const KIND: &'static str = "aws";

    const FIELDS: &'static [Field<Self>] = &[
        ("ami", |s| s.ami.clone().into()),
        ("availabilityZone", |s| s.availability_zone.clone().into()),
        ("instanceProfile", |s| s.instance_profile.clone().into()),
        ("region", |s| s.region.clone().into()),
        ("securityGroupIDs", |s| s.security_group_ids.clone().into()),
        ("subnetId", |s| s.subnet_id.clone().into()),
        ("vpcId", |s| s.vpc_id.clone().into()),
        ("instanceType", |s| s.instance_type.clone().into()),
        ("tags", |s| s.tags.clone().into()),
        ("diskType", |s| s.disk_type.clone().into()),
        ("diskSize", |s| s.disk_size.into()),
    ];

    // No upstream defaulting for the volume type yet.
    const DEFAULTS: &'static [(&'static str, &'static str)] = &[("diskType", "gp2")];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{apply_flags, EncodedDocument};
    use serde_json::{json, Value as JsonValue};

    fn apply(raw: JsonValue, existing: Option<&str>) -> JsonValue {
        let spec = AwsSpec::decode(&raw).unwrap();
        let mut target = existing.map(|e| EncodedDocument::from_json(e).unwrap());
        apply_flags(&mut target, &spec.flags()).unwrap();
        JsonValue::Object(target.unwrap().decode().unwrap())
    }

    #[test]
    fn test_full_document() {
        let settings = apply(
            json!({
                "ami": "ami-123",
                "availabilityZone": "eu-west-3a",
                "instanceProfile": "workers",
                "region": "eu-west-3",
                "securityGroupIDs": ["sg-1", "sg-2"],
                "subnetId": "subnet-1",
                "vpcId": "vpc-1",
                "instanceType": "t3.medium",
                "diskSize": 50,
                "tags": {"owner": "ops"}
            }),
            None,
        );

        assert_eq!(
            settings,
            json!({
                "ami": "ami-123",
                "availabilityZone": "eu-west-3a",
                "instanceProfile": "workers",
                "region": "eu-west-3",
                "securityGroupIDs": ["sg-1", "sg-2"],
                "subnetId": "subnet-1",
                "vpcId": "vpc-1",
                "instanceType": "t3.medium",
                "diskType": "gp2",
                "diskSize": 50,
                "tags": {"owner": "ops"}
            })
        );
    }

    #[test]
    fn test_disk_type_default_is_set_if_absent() {
        let settings = apply(json!({"region": "us-east-1"}), Some(r#"{"diskType":"io1"}"#));
        assert_eq!(settings["diskType"], "io1");

        let settings = apply(json!({"diskType": "st1"}), None);
        assert_eq!(settings["diskType"], "st1");
    }

    #[test]
    fn test_disk_size_only_when_present() {
        let settings = apply(json!({"region": "us-east-1"}), None);
        assert!(settings.get("diskSize").is_none());
    }
}
