//! Cloud provider adapters
//!
//! Each supported provider decodes its per-pool raw document into a typed
//! spec and describes that spec as a flat table of `(flag name, accessor)`
//! pairs. The table is turned into [`Flag`]s and written into the pool's
//! provider settings through [`apply_flags`], so every provider shares the
//! same set-if-absent merge and only differs in its table.
//!
//! # Supported Providers
//!
//! | Identifier     | Spec                 |
//! |----------------|----------------------|
//! | `aws`          | [`AwsSpec`]          |
//! | `azure`        | [`AzureSpec`]        |
//! | `digitalocean` | [`DigitalOceanSpec`] |
//! | `gce`          | [`GceSpec`]          |
//! | `hetzner`      | [`HetznerSpec`]      |
//! | `openstack`    | [`OpenStackSpec`]    |
//! | `packet`       | [`PacketSpec`]       |
//! | `vsphere`      | [`VSphereSpec`]      |
//!
//! # Example
//!
//! ```
//! use tf_reconcile::cluster::WorkerConfig;
//! use tf_reconcile::provider::CloudProvider;
//!
//! let provider: CloudProvider = "hetzner".parse().unwrap();
//! let raw = serde_json::json!({"serverType": "cx21", "location": "nbg1"});
//!
//! let mut pool = WorkerConfig::new("pool1");
//! let inserted = provider.apply(&mut pool, &raw).unwrap();
//! assert_eq!(inserted, vec!["serverType", "location"]);
//! ```

mod aws;
mod azure;
mod digitalocean;
mod gce;
mod hetzner;
mod openstack;
mod packet;
mod vsphere;

pub use aws::AwsSpec;
pub use azure::AzureSpec;
pub use digitalocean::DigitalOceanSpec;
pub use gce::GceSpec;
pub use hetzner::HetznerSpec;
pub use openstack::OpenStackSpec;
pub use packet::PacketSpec;
pub use vsphere::VSphereSpec;

use std::fmt;
use std::str::FromStr;

use serde::de::{DeserializeOwned, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use crate::cluster::WorkerConfig;
use crate::error::{Error, Result};
use crate::flags::{apply_flags, Flag, FlagValue};

/// One row of a provider table: the flag name and how to read it.
pub type Field<T> = (&'static str, fn(&T) -> FlagValue);

/// A provider-specific worker spec decoded from provisioning output.
pub trait ProviderSpec: DeserializeOwned + 'static {
    /// Short name used in error context.
    const KIND: &'static str;

    /// Flags read from the decoded spec, in application order.
    const FIELDS: &'static [Field<Self>];

    /// Hardcoded flags applied after [`Self::FIELDS`], still set-if-absent.
    const DEFAULTS: &'static [(&'static str, &'static str)] = &[];

    /// Decode a raw per-pool document.
    fn decode(raw: &JsonValue) -> Result<Self> {
        decode_object(raw, format!("{} worker spec", Self::KIND))
    }

    /// Build the ordered flag list for this spec.
    fn flags(&self) -> Vec<Flag> {
        Self::FIELDS
            .iter()
            .map(|(name, get)| Flag::new(*name, get(self)))
            .chain(
                Self::DEFAULTS
                    .iter()
                    .map(|(name, value)| Flag::new(*name, *value)),
            )
            .collect()
    }
}

/// Treat an explicit `null` the same as a missing field.
///
/// Provisioning tools emit `null` for unset outputs; plain fields fall back to
/// their default instead of failing to decode.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a JSON object into `T`.
///
/// Derived struct deserializers also accept a sequence and fill fields by
/// position, so anything but an object is rejected up front.
pub(crate) fn decode_object<T: DeserializeOwned>(
    raw: &JsonValue,
    context: impl Into<String>,
) -> Result<T> {
    let context = context.into();
    let unexpected = match raw {
        JsonValue::Object(_) => {
            return T::deserialize(raw).map_err(|e| Error::decode(context, e));
        }
        JsonValue::Null => Unexpected::Unit,
        JsonValue::Bool(b) => Unexpected::Bool(*b),
        JsonValue::Number(_) => Unexpected::Other("number"),
        JsonValue::String(s) => Unexpected::Str(s),
        JsonValue::Array(_) => Unexpected::Seq,
    };
    let source = <serde_json::Error as serde::de::Error>::invalid_type(unexpected, &"a JSON object");
    Err(Error::decode(context, source))
}

/// The closed set of supported cloud providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloudProvider {
    Aws,
    Azure,
    DigitalOcean,
    Gce,
    Hetzner,
    OpenStack,
    Packet,
    VSphere,
}

impl CloudProvider {
    pub const ALL: [CloudProvider; 8] = [
        CloudProvider::Aws,
        CloudProvider::Azure,
        CloudProvider::DigitalOcean,
        CloudProvider::Gce,
        CloudProvider::Hetzner,
        CloudProvider::OpenStack,
        CloudProvider::Packet,
        CloudProvider::VSphere,
    ];

    /// The identifier used in cluster specifications and provisioning output.
    pub fn as_str(self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
            CloudProvider::DigitalOcean => "digitalocean",
            CloudProvider::Gce => "gce",
            CloudProvider::Hetzner => "hetzner",
            CloudProvider::OpenStack => "openstack",
            CloudProvider::Packet => "packet",
            CloudProvider::VSphere => "vsphere",
        }
    }

    /// Decode a raw per-pool document and build its flag list.
    pub fn flags(self, raw: &JsonValue) -> Result<Vec<Flag>> {
        match self {
            CloudProvider::Aws => AwsSpec::decode(raw).map(|s| s.flags()),
            CloudProvider::Azure => AzureSpec::decode(raw).map(|s| s.flags()),
            CloudProvider::DigitalOcean => DigitalOceanSpec::decode(raw).map(|s| s.flags()),
            CloudProvider::Gce => GceSpec::decode(raw).map(|s| s.flags()),
            CloudProvider::Hetzner => HetznerSpec::decode(raw).map(|s| s.flags()),
            CloudProvider::OpenStack => OpenStackSpec::decode(raw).map(|s| s.flags()),
            CloudProvider::Packet => PacketSpec::decode(raw).map(|s| s.flags()),
            CloudProvider::VSphere => VSphereSpec::decode(raw).map(|s| s.flags()),
        }
    }

    /// Merge a raw per-pool document into the pool's provider settings.
    ///
    /// Returns the flag names that were inserted.
    pub fn apply(self, worker: &mut WorkerConfig, raw: &JsonValue) -> Result<Vec<&'static str>> {
        let flags = self.flags(raw)?;
        apply_flags(&mut worker.config.cloud_provider_spec, &flags)
    }
}

impl FromStr for CloudProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CloudProvider::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::UnknownProvider(s.to_string()))
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
