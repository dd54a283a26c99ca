//! Class schema — the facts about the game model that the grammar is built from.
//!
//! Instead of reflecting over live classes, the grammar reads a table of
//! [`ClassDescriptor`]s produced ahead of time (one entry per class, with its
//! annotations spelled out as attribute structs). Any [`TypeProvider`] can
//! stand in for the table; [`Schema`] is the file-backed one.

mod error;
mod provider;
mod types;

pub use error::SchemaError;
pub use provider::{SCHEMA_VERSION, Schema, TypeProvider};
pub use types::{
    ClassAttributes, ClassDescriptor, ClassKind, ConstructorDescriptor, NestedEnum,
    ParamAttributes, ParamDescriptor,
};
