//! Error types for the metadata layer.
//!
//! Reads never fail: an unknown count or value is reported as `None`. Errors
//! only arise from writes, root access and backend-specific checks.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use ome_model::{Field, SchemaError, ValueType};
use thiserror::Error;

/// The error type for metadata store operations.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Root access is not defined for this store.
    ///
    /// Always returned by the aggregating store, which cannot merge the roots
    /// of several independent backends into one handle.
    #[error(
        "{operation} is unsupported with AggregateMetadata; use delegates() and access each delegate's root"
    )]
    UnsupportedRootAccess { operation: &'static str },

    /// The index tuple does not match the field's arity.
    #[error("{field} takes {expected} indices, got {actual}")]
    IndexArity {
        field: Field,
        expected: usize,
        actual: usize,
    },

    /// The value's type does not match the field's declared type.
    #[error("{field} holds {expected} values, got {actual}")]
    TypeMismatch {
        field: Field,
        expected: ValueType,
        actual: ValueType,
    },

    /// A root handle created by a different kind of backend was supplied.
    #[error("backend {backend} cannot adopt a root that is not a {expected}")]
    IncompatibleRoot {
        backend: String,
        expected: &'static str,
    },

    /// A backend failed for its own reasons.
    #[error("backend {backend_name} failed: {message}")]
    Backend {
        backend_name: String,
        message: String,
    },

    /// A field name or path could not be resolved.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A snapshot could not be serialized or deserialized.
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl MetadataError {
    /// Creates a generic backend failure.
    pub fn backend(backend_name: impl Into<String>, message: impl Into<String>) -> Self {
        MetadataError::Backend {
            backend_name: backend_name.into(),
            message: message.into(),
        }
    }

    /// Returns true for the aggregate root rejection.
    pub fn is_unsupported_root_access(&self) -> bool {
        matches!(self, MetadataError::UnsupportedRootAccess { .. })
    }
}

/// Result type for metadata store operations.
pub type MetadataResult<T> = Result<T, MetadataError>;
