//! # Flag Setter
//!
//! Provider settings and operating-system options live on a worker pool as
//! opaque JSON documents, because the cluster specification does not type
//! every provider's shape. This module is the single seam where that untyped
//! data is touched.
//!
//! - [`FlagValue`] is the closed set of value kinds a provider adapter may
//!   write: integers, strings, string lists, string maps and booleans, each
//!   with an optional form.
//! - [`EncodedDocument`] is the stored form of an opaque document (encoded
//!   JSON text). It serializes as structured data so that a saved cluster
//!   specification stays readable.
//! - [`set_flag`] writes one flag into a document with set-if-absent
//!   semantics: empty values are ignored and existing keys are never
//!   overwritten. Every call decodes the stored document, merges, and
//!   re-encodes it, so keys unknown to this crate survive untouched.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};

/// A value an adapter can write into a provider settings document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Plain integer; zero counts as unset.
    Int(i64),
    OptInt(Option<i64>),
    /// Plain string; the empty string counts as unset.
    Str(String),
    OptStr(Option<String>),
    /// String list; an empty list counts as unset.
    StrList(Vec<String>),
    /// String map; absent or empty counts as unset.
    StrMap(Option<BTreeMap<String, String>>),
    /// Plain boolean. `false` is its zero form and is not written.
    Bool(bool),
    OptBool(Option<bool>),
}

impl FlagValue {
    /// Returns the JSON form of the value, or `None` when the value is the
    /// empty form of its kind and must not be written.
    pub fn to_json(&self) -> Option<JsonValue> {
        match self {
            FlagValue::Int(0) => None,
            FlagValue::Int(n) => Some(JsonValue::from(*n)),
            FlagValue::OptInt(n) => n.map(JsonValue::from),
            FlagValue::Str(s) if s.is_empty() => None,
            FlagValue::Str(s) => Some(JsonValue::from(s.clone())),
            FlagValue::OptStr(s) => s.clone().map(JsonValue::from),
            FlagValue::StrList(list) if list.is_empty() => None,
            FlagValue::StrList(list) => Some(JsonValue::from(list.clone())),
            FlagValue::StrMap(Some(map)) if !map.is_empty() => Some(JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), JsonValue::from(v.clone())))
                    .collect(),
            )),
            FlagValue::StrMap(_) => None,
            FlagValue::Bool(false) => None,
            FlagValue::Bool(true) => Some(JsonValue::Bool(true)),
            FlagValue::OptBool(b) => b.map(JsonValue::Bool),
        }
    }

    /// Whether [`set_flag`] ignores this value.
    pub fn is_empty(&self) -> bool {
        self.to_json().is_none()
    }
}

impl From<i64> for FlagValue {
    fn from(value: i64) -> Self {
        FlagValue::Int(value)
    }
}

impl From<Option<i64>> for FlagValue {
    fn from(value: Option<i64>) -> Self {
        FlagValue::OptInt(value)
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::Str(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Str(value.to_string())
    }
}

impl From<Option<String>> for FlagValue {
    fn from(value: Option<String>) -> Self {
        FlagValue::OptStr(value)
    }
}

impl From<Vec<String>> for FlagValue {
    fn from(value: Vec<String>) -> Self {
        FlagValue::StrList(value)
    }
}

impl From<Option<BTreeMap<String, String>>> for FlagValue {
    fn from(value: Option<BTreeMap<String, String>>) -> Self {
        FlagValue::StrMap(value)
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

impl From<Option<bool>> for FlagValue {
    fn from(value: Option<bool>) -> Self {
        FlagValue::OptBool(value)
    }
}

/// Reads a flag back from an untyped JSON value.
///
/// Fails with `Error::UnsupportedType` for values outside the recognized
/// kinds (floats, null, nested objects, lists of non-strings).
impl TryFrom<(&str, &JsonValue)> for FlagValue {
    type Error = Error;

    fn try_from((flag, value): (&str, &JsonValue)) -> Result<Self> {
        let unsupported = |kind: &str| Error::UnsupportedType {
            flag: flag.to_string(),
            kind: kind.to_string(),
        };

        match value {
            JsonValue::Bool(b) => Ok(FlagValue::Bool(*b)),
            JsonValue::Number(n) => n.as_i64().map(FlagValue::Int).ok_or_else(|| unsupported("float")),
            JsonValue::String(s) => Ok(FlagValue::Str(s.clone())),
            JsonValue::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(FlagValue::StrList)
                .ok_or_else(|| unsupported("list of non-strings")),
            JsonValue::Object(entries) => entries
                .iter()
                .map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect::<Option<BTreeMap<_, _>>>()
                .map(|map| FlagValue::StrMap(Some(map)))
                .ok_or_else(|| unsupported("nested object")),
            JsonValue::Null => Err(unsupported("null")),
        }
    }
}

/// A named flag as produced by a provider adapter's field table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub name: &'static str,
    pub value: FlagValue,
}

impl Flag {
    pub fn new(name: &'static str, value: impl Into<FlagValue>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// An opaque key-value document stored as encoded JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDocument(String);

impl EncodedDocument {
    /// Encodes a decoded document.
    pub fn encode(document: &Map<String, JsonValue>) -> Result<Self> {
        serde_json::to_string(document)
            .map(EncodedDocument)
            .map_err(|e| Error::encode("opaque document", e))
    }

    /// Wraps already-encoded JSON text, checking that it is an object.
    pub fn from_json(text: &str) -> Result<Self> {
        let document = EncodedDocument(text.to_string());
        document.decode()?;
        Ok(document)
    }

    /// Decodes the stored text into a key-value mapping.
    pub fn decode(&self) -> Result<Map<String, JsonValue>> {
        serde_json::from_str(&self.0).map_err(|e| Error::decode("opaque document", e))
    }

    /// The encoded JSON text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads a single flag back in its typed form.
    pub fn flag(&self, name: &str) -> Result<Option<FlagValue>> {
        let document = self.decode()?;
        document
            .get(name)
            .map(|value| FlagValue::try_from((name, value)))
            .transpose()
    }
}

impl fmt::Display for EncodedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EncodedDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let value: JsonValue =
            serde_json::from_str(&self.0).map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EncodedDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("expected a mapping"));
        }
        Ok(EncodedDocument(value.to_string()))
    }
}

/// Write one flag into an opaque document with set-if-absent semantics.
///
/// Returns `true` when the key was inserted, `false` when the value was empty
/// or the key was already present.
///
/// # Errors
///
/// Returns `Error::Decode` if the stored document is not a JSON object and
/// `Error::Encode` if the merged document cannot be re-encoded.
pub fn set_flag(target: &mut Option<EncodedDocument>, name: &str, value: &FlagValue) -> Result<bool> {
    let Some(json) = value.to_json() else {
        debug!("flag '{}' is empty, skipping", name);
        return Ok(false);
    };

    let mut document = match target.as_ref() {
        Some(encoded) => encoded.decode()?,
        None => Map::new(),
    };

    let inserted = if document.contains_key(name) {
        debug!("flag '{}' already set, keeping existing value", name);
        false
    } else {
        document.insert(name.to_string(), json);
        true
    };

    *target = Some(EncodedDocument::encode(&document)?);
    Ok(inserted)
}

/// Apply a table of flags in order, returning the names actually inserted.
pub fn apply_flags(target: &mut Option<EncodedDocument>, flags: &[Flag]) -> Result<Vec<&'static str>> {
    let mut inserted = Vec::new();
    for flag in flags {
        if set_flag(target, flag.name, &flag.value)? {
            inserted.push(flag.name);
        }
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: JsonValue) -> Option<EncodedDocument> {
        Some(EncodedDocument::from_json(&value.to_string()).unwrap())
    }

    fn decoded(target: &Option<EncodedDocument>) -> JsonValue {
        JsonValue::Object(target.as_ref().unwrap().decode().unwrap())
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let empties = [
            FlagValue::Int(0),
            FlagValue::OptInt(None),
            FlagValue::Str(String::new()),
            FlagValue::OptStr(None),
            FlagValue::StrList(vec![]),
            FlagValue::StrMap(None),
            FlagValue::StrMap(Some(BTreeMap::new())),
            FlagValue::Bool(false),
            FlagValue::OptBool(None),
        ];

        for value in &empties {
            let mut target = None;
            assert!(!set_flag(&mut target, "key", value).unwrap(), "{:?}", value);
            assert!(target.is_none(), "{:?} should not touch the document", value);
        }
    }

    #[test]
    fn test_optional_zero_values_are_written() {
        let mut target = None;
        assert!(set_flag(&mut target, "diskSize", &FlagValue::OptInt(Some(0))).unwrap());
        assert!(set_flag(&mut target, "zone", &FlagValue::OptStr(Some(String::new()))).unwrap());
        assert!(set_flag(&mut target, "regional", &FlagValue::OptBool(Some(false))).unwrap());
        assert_eq!(
            decoded(&target),
            json!({"diskSize": 0, "zone": "", "regional": false})
        );
    }

    #[test]
    fn test_plain_true_is_written() {
        let mut target = None;
        assert!(!set_flag(&mut target, "allowInsecure", &false.into()).unwrap());
        assert!(set_flag(&mut target, "allowInsecure", &true.into()).unwrap());
        assert_eq!(decoded(&target), json!({"allowInsecure": true}));
    }

    #[test]
    fn test_existing_key_is_never_overwritten() {
        let mut target = doc(json!({"cluster": "prod"}));
        assert!(!set_flag(&mut target, "cluster", &"other".into()).unwrap());
        assert!(set_flag(&mut target, "cpus", &FlagValue::Int(4)).unwrap());
        assert_eq!(decoded(&target), json!({"cluster": "prod", "cpus": 4}));
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let mut target = doc(json!({"custom": {"nested": [1.5, null]}}));
        set_flag(&mut target, "region", &"eu-west-1".into()).unwrap();
        assert_eq!(
            decoded(&target),
            json!({"custom": {"nested": [1.5, null]}, "region": "eu-west-1"})
        );
    }

    #[test]
    fn test_non_object_document_is_a_decode_error() {
        let mut target = Some(EncodedDocument("[1, 2]".to_string()));
        let err = set_flag(&mut target, "region", &"x".into()).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_string_map_and_list_encoding() {
        let mut target = None;
        let tags: BTreeMap<String, String> =
            [("env".to_string(), "prod".to_string())].into_iter().collect();
        set_flag(&mut target, "tags", &Some(tags).into()).unwrap();
        set_flag(&mut target, "securityGroups", &vec!["sg-1".to_string()].into()).unwrap();
        assert_eq!(
            decoded(&target),
            json!({"tags": {"env": "prod"}, "securityGroups": ["sg-1"]})
        );
    }

    #[test]
    fn test_apply_flags_reports_inserted_names() {
        let mut target = doc(json!({"region": "fixed"}));
        let flags = vec![
            Flag::new("region", "ignored"),
            Flag::new("size", "s-2vcpu-4gb"),
            Flag::new("tags", Vec::<String>::new()),
        ];
        let inserted = apply_flags(&mut target, &flags).unwrap();
        assert_eq!(inserted, vec!["size"]);
    }

    #[test]
    fn test_flag_read_back() {
        let target = doc(json!({"cpus": 2, "folder": "/vm", "ratio": 0.5, "none": null}));
        let encoded = target.unwrap();
        assert_eq!(encoded.flag("cpus").unwrap(), Some(FlagValue::Int(2)));
        assert_eq!(encoded.flag("folder").unwrap(), Some(FlagValue::Str("/vm".into())));
        assert_eq!(encoded.flag("missing").unwrap(), None);
        assert!(matches!(
            encoded.flag("ratio").unwrap_err(),
            Error::UnsupportedType { ref kind, .. } if kind == "float"
        ));
        assert!(matches!(
            encoded.flag("none").unwrap_err(),
            Error::UnsupportedType { .. }
        ));
    }

    #[test]
    fn test_encoded_document_serializes_structured() {
        let encoded = EncodedDocument::from_json(r#"{"b":1,"a":"x"}"#).unwrap();
        let yaml = serde_yaml::to_string(&encoded).unwrap();
        assert!(yaml.contains("a: x"));
        assert!(yaml.contains("b: 1"));

        let parsed: EncodedDocument = serde_yaml::from_str("region: eu\ncount: 3\n").unwrap();
        assert_eq!(parsed.flag("count").unwrap(), Some(FlagValue::Int(3)));
    }

    #[test]
    fn test_encoded_document_rejects_non_mapping() {
        assert!(serde_yaml::from_str::<EncodedDocument>("- a\n- b\n").is_err());
        assert!(EncodedDocument::from_json("42").is_err());
    }
}
