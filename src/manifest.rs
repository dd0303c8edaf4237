//! Multi-document YAML encoding
//!
//! Joins several items into one YAML stream, each followed by a `---`
//! separator. Pre-rendered text is written verbatim (trimmed); anything else
//! is serialized with `serde_yaml`.
//!
//! ```
//! use tf_reconcile::manifest::{to_yaml_documents, Document};
//!
//! let docs = vec![
//!     Document::text("# generated\nkind: Note\n"),
//!     Document::from_serialize(&serde_json::json!({"name": "demo"})).unwrap(),
//! ];
//! let out = to_yaml_documents(&docs).unwrap();
//! assert_eq!(out, "# generated\nkind: Note\n---\nname: demo\n---\n");
//! ```

use serde::Serialize;

use crate::error::Result;

/// One document of a YAML stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Already rendered YAML.
    Text(String),
    /// A structured value to serialize.
    Value(serde_yaml::Value),
}

impl Document {
    pub fn text(text: impl Into<String>) -> Self {
        Document::Text(text.into())
    }

    /// Convert any serializable item into a document.
    pub fn from_serialize<T: Serialize>(item: &T) -> Result<Self> {
        Ok(Document::Value(serde_yaml::to_value(item)?))
    }
}

/// Encode documents as a single YAML stream separated by `---`.
pub fn to_yaml_documents(items: &[Document]) -> Result<String> {
    let mut buffer = String::new();

    for item in items {
        let encoded = match item {
            Document::Text(text) => text.trim().to_string(),
            Document::Value(value) => serde_yaml::to_string(value)?.trim_end().to_string(),
        };
        buffer.push_str(&encoded);
        buffer.push_str("\n---\n");
    }

    Ok(buffer)
}
