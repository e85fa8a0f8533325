//! restruct - declarative conversion between loosely-typed data and
//! strongly-typed records
//!
//! A caller registers record schemas once at startup. `convert::instantiate`
//! then builds typed instance trees from generic decoded data (e.g. the
//! output of a JSON decoder), and `convert::decompose` flattens typed trees
//! back into generic data for an external encoder.

pub mod convert;
pub mod schema;
pub mod value;
