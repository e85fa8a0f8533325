//! Decomposition: the mirror of instantiation
//!
//! Flattens a typed instance tree back into generic data for an external
//! encoder:
//! - records become plain mappings of field name to decomposed value
//! - keyed mappings become plain mappings with keys rendered to strings
//! - sequences keep their order, scalars pass through unchanged
//!
//! Decomposition is idempotent on already-generic data, so one round-trip
//! through `instantiate` and back is stable. It does not reproduce the
//! original raw input exactly: coerced keys stay coerced and unsupported
//! keys stay dropped.

use crate::value::{Record, Value};

/// Flattens any value, typed or generic, into a generic value.
pub fn decompose(value: &Value) -> Value {
    match value {
        Value::Record(record) => decompose_record(record),
        Value::Sequence(items) => Value::Sequence(items.iter().map(decompose).collect()),
        Value::Mapping(entries) => Value::Mapping(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), decompose(value)))
                .collect(),
        ),
        Value::KeyedMapping(entries) => Value::Mapping(
            entries
                .iter()
                .map(|(key, value)| (key.to_string(), decompose(value)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// Flattens a record instance into a generic mapping, recursing through
/// every field.
pub fn decompose_record(record: &Record) -> Value {
    Value::Mapping(
        record
            .fields()
            .map(|(name, value)| (name.to_string(), decompose(value)))
            .collect(),
    )
}
