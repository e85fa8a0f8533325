//! Conversion errors
//!
//! Every variant here is fatal to the enclosing `instantiate` call:
//! construction is all-or-nothing, the whole tree is abandoned, and nothing
//! is retried. Unsupported input keys are deliberately NOT represented here —
//! they are dropped with a warning diagnostic and never affect the outcome.

use thiserror::Error;

use crate::schema::KeyType;

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Fatal conversion failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// Required single nested-record field received null or was absent
    #[error("Missing required field of type {type_name}")]
    MissingRequiredField { type_name: String },

    /// Required list field received null or was absent
    #[error("Missing required list field of type List[{type_name}]")]
    MissingRequiredList { type_name: String },

    /// Required mapping field received null or was absent
    #[error("Missing required mapping field of type Mapping[{key_type}, {type_name}]")]
    MissingRequiredMapping {
        key_type: KeyType,
        type_name: String,
    },

    /// Raw mapping key could not be coerced to the declared key type
    #[error("Cannot coerce mapping key '{key}' to {key_type}")]
    KeyCoercion { key: String, key_type: KeyType },

    /// Record construction was fed input that is not a key/value mapping
    #[error("Cannot construct '{type_name}' from {actual} input")]
    Constructor {
        type_name: String,
        actual: &'static str,
    },
}
