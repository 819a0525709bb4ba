//! Schema layer: element definitions, incremental construction and the raw
//! document shape.
//!
//! This module never renders anything. It owns:
//! - definitions (edges, entities, the schema they form)
//! - the accumulator that validates fragments before merging them
//! - form drafts and their pure transitions
//! - the serde-facing document and its replay

pub mod accumulator;
pub mod definition;
pub mod document;
pub mod draft;
pub mod error;

pub use accumulator::{GroupbyDraft, SchemaAccumulator, check_groupby_key};
pub use definition::{EdgeDefinition, EntityDefinition, GraphSchema, Properties};
pub use document::{BuiltSchema, SchemaDocument};
pub use draft::{DraftAction, ElementDraft, reduce};
pub use error::{GroupKind, ValidationError};
