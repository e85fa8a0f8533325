//! Conversion engine subsystem
//!
//! Two operations, mirror images of each other:
//!
//! - `instantiate` builds a typed record tree from generic decoded data
//! - `decompose` flattens a typed tree back into generic data
//!
//! # Design Principles
//!
//! - Deterministic: identical input yields the identical outcome
//! - All-or-nothing: a fatal error abandons the whole tree
//! - Tolerant: unknown input keys are dropped with a warning, never an error
//! - Synchronous and pure: no shared state, no retries, no suspension points

mod decompose;
mod errors;
mod instantiate;

pub use decompose::{decompose, decompose_record};
pub use errors::{ConvertError, ConvertResult};
pub use instantiate::instantiate;
