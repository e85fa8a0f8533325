//! The instantiation engine
//!
//! Builds a typed record tree from a generic key/value mapping:
//!
//! - input keys not declared by the schema are dropped and reported through a
//!   warning diagnostic, never an error (schemas must stay compatible with
//!   older and newer producers)
//! - each declared field's converter is selected statically from `FieldKind`
//!   and invoked exactly once per call
//! - requiredness is enforced centrally: a required field behaves identically
//!   whether its key is absent or present with an explicit null
//! - any fatal error unwinds the whole call; there is no partial instance
//!
//! Conversion is deterministic: a repeated call with identical input produces
//! the identical outcome, success or failure.

use std::collections::BTreeMap;

use tracing::warn;

use crate::schema::{FieldKind, KeyType, SchemaRegistry};
use crate::value::{MapKey, Record, Value};

use super::errors::{ConvertError, ConvertResult};

/// Instantiates a record of `type_name` from a raw value.
///
/// The raw value must be a key/value mapping (or an already-typed `Record`,
/// which passes through unchanged). If `type_name` is not registered, it is
/// treated as an opaque constructible type and the mapping becomes the
/// record's fields verbatim — the non-recursive base case.
pub fn instantiate(
    registry: &SchemaRegistry,
    type_name: &str,
    raw: Value,
) -> ConvertResult<Record> {
    // Re-converting an already-typed value is a no-op.
    if let Value::Record(record) = raw {
        return Ok(record);
    }

    let raw_fields = match raw {
        Value::Mapping(entries) => entries,
        other => {
            return Err(ConvertError::Constructor {
                type_name: type_name.to_string(),
                actual: other.kind_name(),
            })
        }
    };

    let Some(schema) = registry.get(type_name) else {
        // Opaque type: forward the mapping verbatim as constructor arguments.
        return Ok(Record::new(type_name, raw_fields));
    };

    let mut raw_fields = raw_fields;
    let unsupported: Vec<String> = raw_fields
        .keys()
        .filter(|key| schema.field(key).is_none())
        .cloned()
        .collect();
    if !unsupported.is_empty() {
        warn!(
            type_name = %schema.type_name,
            keys = ?unsupported,
            "dropping input keys not declared by the schema"
        );
    }

    let mut fields = BTreeMap::new();
    for def in &schema.fields {
        let converted = match raw_fields.remove(&def.name) {
            Some(value) => convert_field(registry, &def.kind, value)?,
            None => default_field(&def.kind)?,
        };
        fields.insert(def.name.clone(), converted);
    }

    Ok(Record::new(schema.type_name.clone(), fields))
}

/// Schema default for a field whose key is absent from the input.
///
/// Required descriptors fail here exactly as they would on an explicit null,
/// so omission and null cannot diverge.
fn default_field(kind: &FieldKind) -> ConvertResult<Value> {
    match kind {
        FieldKind::Plain => Ok(Value::Null),
        FieldKind::Single { target, required } => {
            if *required {
                Err(ConvertError::MissingRequiredField {
                    type_name: target.clone(),
                })
            } else {
                Ok(Value::Null)
            }
        }
        FieldKind::List { target, required } => {
            if *required {
                Err(ConvertError::MissingRequiredList {
                    type_name: target.clone(),
                })
            } else {
                Ok(Value::Sequence(Vec::new()))
            }
        }
        FieldKind::Mapping {
            key,
            target,
            required,
        } => {
            if *required {
                Err(ConvertError::MissingRequiredMapping {
                    key_type: *key,
                    type_name: target.clone(),
                })
            } else {
                Ok(Value::KeyedMapping(BTreeMap::new()))
            }
        }
    }
}

/// Applies the converter selected by the field's kind.
fn convert_field(
    registry: &SchemaRegistry,
    kind: &FieldKind,
    value: Value,
) -> ConvertResult<Value> {
    match kind {
        FieldKind::Plain => Ok(value),
        FieldKind::Single { target, required } => {
            convert_single(registry, target, *required, value)
        }
        FieldKind::List { target, required } => convert_list(registry, target, *required, value),
        FieldKind::Mapping {
            key,
            target,
            required,
        } => convert_mapping(registry, *key, target, *required, value),
    }
}

fn convert_single(
    registry: &SchemaRegistry,
    target: &str,
    required: bool,
    value: Value,
) -> ConvertResult<Value> {
    match value {
        Value::Null if required => Err(ConvertError::MissingRequiredField {
            type_name: target.to_string(),
        }),
        Value::Null => Ok(Value::Null),
        Value::Mapping(_) => Ok(Value::Record(instantiate(registry, target, value)?)),
        // Already typed, or a scalar: pass through unchanged.
        other => Ok(other),
    }
}

fn convert_list(
    registry: &SchemaRegistry,
    target: &str,
    required: bool,
    value: Value,
) -> ConvertResult<Value> {
    match value {
        Value::Null if required => Err(ConvertError::MissingRequiredList {
            type_name: target.to_string(),
        }),
        Value::Null => Ok(Value::Sequence(Vec::new())),
        Value::Sequence(items) => {
            let converted = items
                .into_iter()
                .map(|item| convert_element(registry, target, item))
                .collect::<ConvertResult<Vec<Value>>>()?;
            Ok(Value::Sequence(converted))
        }
        // A bare value where a list was expected: tolerate producers that
        // return a single object instead of a list of one.
        single => Ok(Value::Sequence(vec![convert_element(
            registry, target, single,
        )?])),
    }
}

fn convert_mapping(
    registry: &SchemaRegistry,
    key_type: KeyType,
    target: &str,
    required: bool,
    value: Value,
) -> ConvertResult<Value> {
    match value {
        Value::Null if required => Err(ConvertError::MissingRequiredMapping {
            key_type,
            type_name: target.to_string(),
        }),
        Value::Null => Ok(Value::KeyedMapping(BTreeMap::new())),
        Value::Mapping(entries) => {
            let mut converted = BTreeMap::new();
            for (raw_key, raw_value) in entries {
                let key = coerce_key(key_type, &raw_key)?;
                converted.insert(key, convert_element(registry, target, raw_value)?);
            }
            Ok(Value::KeyedMapping(converted))
        }
        // Already typed: pass through unchanged.
        Value::KeyedMapping(entries) => Ok(Value::KeyedMapping(entries)),
        other => Ok(other),
    }
}

/// Per-element rule shared by the List and Mapping converters: mappings are
/// instantiated recursively, everything else passes through.
fn convert_element(
    registry: &SchemaRegistry,
    target: &str,
    value: Value,
) -> ConvertResult<Value> {
    match value {
        Value::Mapping(_) => Ok(Value::Record(instantiate(registry, target, value)?)),
        other => Ok(other),
    }
}

/// Coerces a raw string key to the declared key type.
///
/// Failure is fatal to the enclosing call, never a silent drop.
fn coerce_key(key_type: KeyType, raw: &str) -> ConvertResult<MapKey> {
    match key_type {
        KeyType::String => Ok(MapKey::String(raw.to_string())),
        KeyType::Int => raw
            .trim()
            .parse::<i64>()
            .map(MapKey::Int)
            .map_err(|_| ConvertError::KeyCoercion {
                key: raw.to_string(),
                key_type,
            }),
        KeyType::Bool => match raw {
            "true" => Ok(MapKey::Bool(true)),
            "false" => Ok(MapKey::Bool(false)),
            _ => Err(ConvertError::KeyCoercion {
                key: raw.to_string(),
                key_type,
            }),
        },
    }
}
