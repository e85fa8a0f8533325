//! Schema declaration errors
//!
//! All of these surface at registration time, before any conversion runs.
//! Schemas are defined once at program startup; a rejected schema is a
//! programming error in the caller, not a data error.

use thiserror::Error;

/// Result type for schema declaration and registration
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Structural and registration errors for record schemas
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Schema declared without a type name
    #[error("Schema type name must not be empty")]
    EmptyTypeName,

    /// Schema declared a field with an empty name
    #[error("Schema '{type_name}' declares a field with an empty name")]
    EmptyFieldName { type_name: String },

    /// Field names must be unique within a schema
    #[error("Schema '{type_name}' declares field '{field}' more than once")]
    DuplicateField { type_name: String, field: String },

    /// Schemas are immutable once registered
    #[error("Schema '{type_name}' is already registered and cannot be replaced")]
    SchemaImmutable { type_name: String },
}
