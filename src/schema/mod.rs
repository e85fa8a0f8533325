//! Schema declaration subsystem
//!
//! Record schemas are declared once, at program startup, and registered in a
//! `SchemaRegistry`. A schema marks each field as Plain or as one of three
//! nested-record descriptors:
//!
//! - `Single` — exactly one nested record (null/absent if optional)
//! - `List` — ordered sequence of nested records (empty if optional/absent)
//! - `Mapping` — key-coerced mapping of nested records (empty if optional/absent)
//!
//! # Design Principles
//!
//! - Schemas are immutable once registered
//! - Field names are unique within a schema
//! - Descriptors are data, not closures: the conversion engine dispatches
//!   statically on `FieldKind`

mod errors;
mod registry;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use registry::SchemaRegistry;
pub use types::{FieldDef, FieldKind, KeyType, Schema};
