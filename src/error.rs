//! # Error Handling
//!
//! This module defines the centralized error type for `tf-reconcile`. It uses
//! the `thiserror` library to build a single `Error` enum that covers every
//! failure mode of a reconciliation run.
//!
//! ## Key Components
//!
//! - **`Error`**: All failures that can surface from decoding provisioning
//!   output, merging it into a cluster specification, or loading and saving
//!   that specification. Variants carry the field name, pool name or raw value
//!   that caused the failure.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Every error is fatal for the current reconciliation. Nothing is retried;
//! callers fix the input and run the whole process again.

use thiserror::Error;

/// Main error type for reconciliation operations
#[derive(Error, Debug)]
pub enum Error {
    /// The provisioning output, or one of its sub-documents, does not have the
    /// expected shape.
    #[error("Decode error in {context}: {source}")]
    Decode {
        /// Which document was being decoded (e.g. "provisioning output", "aws worker spec")
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provisioning output declares no control-plane hosts.
    #[error("No control plane hosts are given")]
    MissingControlPlane,

    /// A field holds a value that cannot be converted to its target type.
    #[error("Malformed field {field}: {value:?}: {message}")]
    MalformedField {
        field: String,
        value: String,
        message: String,
    },

    /// The cluster's cloud provider has no matching adapter.
    #[error("Unknown provider {0:?}")]
    UnknownProvider(String),

    /// A value of a kind the flag setter does not recognize was passed for a flag.
    #[error("Unsupported type for flag {flag}: {kind}")]
    UnsupportedType { flag: String, kind: String },

    /// An opaque document could not be re-encoded.
    #[error("Encode error in {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A failure while reconciling a single worker pool.
    #[error("Failed to update {stage} config for workerset {pool:?} from terraform config: {source}")]
    WorkerPool {
        pool: String,
        /// Either "provider-specific" or "common"
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Decode {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn encode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Encode {
            context: context.into(),
            source,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
