//! Value model for the conversion engine
//!
//! Two layers share one enum:
//!
//! - The generic subset (null, bool, int, float, string, sequence, mapping)
//!   is the universal intermediate representation exchanged with external
//!   decoders and encoders.
//! - `Record` and `KeyedMapping` appear only in typed instance trees built
//!   by the conversion engine.

mod generic;
mod record;

pub use generic::{MapKey, Value};
pub use record::Record;
