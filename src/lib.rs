//! Schema construction and validation core for the graph store console.
//!
//! The rendering layer hands raw field values in; this crate hands schema
//! fragments, typed validation failures and combined error strings back out.

pub mod diagnostics;
pub mod notify;
pub mod render;
pub mod sanitize;
pub mod schema;

pub type Result<T> = anyhow::Result<T>;

pub use notify::{Alert, NotificationLog};
pub use schema::{
    EdgeDefinition, EntityDefinition, GraphSchema, SchemaAccumulator, SchemaDocument,
    ValidationError,
};
