//! Schema type definitions
//!
//! A schema declares the shape of one record type:
//! - field names are unique within the schema, declaration order is preserved
//! - a field is either Plain (passed through unconverted) or carries one of
//!   the three nested-record descriptors (Single, List, Mapping)
//! - descriptors name the target type and a required flag; Mapping also names
//!   the key type used to coerce raw mapping keys
//!
//! The descriptor-to-converter binding is resolved by static dispatch over
//! `FieldKind` in the conversion engine; schemas carry no closures.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// Key type of a Mapping descriptor field.
///
/// Raw mapping keys arrive as strings from the decoder and are coerced to
/// this type during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    String,
    Int,
    Bool,
}

impl KeyType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            KeyType::String => "string",
            KeyType::Int => "int",
            KeyType::Bool => "bool",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Conversion behavior declared on a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Opaque scalar field, passed through unconverted
    Plain,
    /// Exactly one nested record of the target type
    Single {
        target: String,
        #[serde(default)]
        required: bool,
    },
    /// Ordered sequence of nested records of the target type
    List {
        target: String,
        #[serde(default)]
        required: bool,
    },
    /// Key/value mapping of nested records, keyed by the declared key type
    Mapping {
        key: KeyType,
        target: String,
        #[serde(default)]
        required: bool,
    },
}

impl FieldKind {
    /// Returns the kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldKind::Plain => "plain",
            FieldKind::Single { .. } => "single",
            FieldKind::List { .. } => "list",
            FieldKind::Mapping { .. } => "mapping",
        }
    }

    /// Whether the field must be present with a non-null value
    pub fn is_required(&self) -> bool {
        match self {
            FieldKind::Plain => false,
            FieldKind::Single { required, .. }
            | FieldKind::List { required, .. }
            | FieldKind::Mapping { required, .. } => *required,
        }
    }
}

/// Field definition: a name plus its conversion behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, matched against raw input keys
    pub name: String,
    /// Conversion behavior
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDef {
    /// Create a plain field with no conversion attached
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Plain,
        }
    }

    /// Create a required single nested-record field
    pub fn required_single(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Single {
                target: target.into(),
                required: true,
            },
        }
    }

    /// Create an optional single nested-record field
    pub fn optional_single(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Single {
                target: target.into(),
                required: false,
            },
        }
    }

    /// Create a required list-of-records field
    pub fn required_list(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::List {
                target: target.into(),
                required: true,
            },
        }
    }

    /// Create an optional list-of-records field
    pub fn optional_list(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::List {
                target: target.into(),
                required: false,
            },
        }
    }

    /// Create a required mapping-of-records field
    pub fn required_mapping(
        name: impl Into<String>,
        key: KeyType,
        target: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Mapping {
                key,
                target: target.into(),
                required: true,
            },
        }
    }

    /// Create an optional mapping-of-records field
    pub fn optional_mapping(
        name: impl Into<String>,
        key: KeyType,
        target: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Mapping {
                key,
                target: target.into(),
                required: false,
            },
        }
    }
}

/// Complete schema definition for one record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Unique record type name
    pub type_name: String,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDef>,
}

impl Schema {
    /// Create a new schema
    pub fn new(type_name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Looks up a field definition by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Validates the schema structure itself (not input data).
    ///
    /// Field names must be non-empty and unique; the type name must be
    /// non-empty.
    pub fn validate_structure(&self) -> SchemaResult<()> {
        if self.type_name.is_empty() {
            return Err(SchemaError::EmptyTypeName);
        }

        for (index, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName {
                    type_name: self.type_name.clone(),
                });
            }

            let duplicated = self.fields[..index]
                .iter()
                .any(|earlier| earlier.name == field.name);
            if duplicated {
                return Err(SchemaError::DuplicateField {
                    type_name: self.type_name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        Ok(())
    }
}
