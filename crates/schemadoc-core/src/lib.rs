//! Core contracts for schemadoc.
//!
//! This crate defines the metadata document produced by introspection and
//! consumed by the renderers, along with the shared error type and the
//! post-assembly invariant checks.

pub mod document;
pub mod error;
pub mod validation;

pub use document::{
    Column, EnumType, ForeignKey, Function, Index, MetadataDocument, Table, Trigger,
    TriggerOrientation,
};
pub use error::{Error, Result};
pub use validation::validate_document;
