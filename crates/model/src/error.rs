//! Error types for schema lookups and field-path parsing.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// Errors raised when resolving names or paths against the schema catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No value field with this schema name exists.
    #[error("unknown field: {name}")]
    UnknownField { name: String },

    /// No repeated entity with this schema name exists.
    #[error("unknown entity: {name}")]
    UnknownEntity { name: String },

    /// The path is syntactically valid but matches no field template.
    #[error("invalid field path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    /// The number of indices does not match the field's arity.
    #[error("{name} takes {expected} indices, got {actual}")]
    IndexCount {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
