//! Typed record instances
//!
//! A `Record` is the result of instantiating a schema: the target type's name
//! plus its converted fields. Records exclusively own their nested values —
//! conversion always allocates a fresh tree with no aliasing back into the
//! caller's input.

use std::collections::BTreeMap;

use super::generic::Value;

/// A typed instance of a record schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(type_name: impl Into<String>, fields: BTreeMap<String, Value>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Returns the name of the schema this record was instantiated from.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterates over fields in deterministic (sorted) order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
