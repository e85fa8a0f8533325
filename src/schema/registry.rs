//! In-memory schema registry
//!
//! Schemas are registered once at program startup and are immutable
//! afterwards. Conversion consults the registry read-only, so a shared
//! reference can be handed to any number of concurrent instantiation calls
//! without locking.

use std::collections::HashMap;

use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;

/// Registry of record schemas, keyed by type name.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Registers a schema.
    ///
    /// The schema's structure is validated first. Re-registering an existing
    /// type name is rejected: schema shape is fixed once declared.
    pub fn register(&mut self, schema: Schema) -> SchemaResult<()> {
        schema.validate_structure()?;

        if self.schemas.contains_key(&schema.type_name) {
            return Err(SchemaError::SchemaImmutable {
                type_name: schema.type_name.clone(),
            });
        }

        self.schemas.insert(schema.type_name.clone(), schema);
        Ok(())
    }

    /// Returns the schema for a type name, if registered.
    ///
    /// Unregistered names are not an error: the conversion engine treats
    /// them as opaque constructible types.
    pub fn get(&self, type_name: &str) -> Option<&Schema> {
        self.schemas.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.schemas.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
