//! A Rust library for mapping domain objects and key/value maps onto the
//! field set declared by a schema type, producing results whose fields are
//! computed lazily and memoized after first access.
//!
//! The crate is pure in-process mediation: a [`SchemaType`] enumerates the
//! declared fields, a converter adapter decides how each field's value is
//! obtained (resolver override, backing-object accessor, hash entry, or
//! delegation to a nested adapter), and the [`LazyResult`] it produces
//! computes each field at most once, on demand.

pub mod converter;
pub mod error;
pub mod result;
pub mod schema;

// Re-export the most common types for easier use
// Core types
pub use error::{ConverterError, Result};
pub use result::{Computation, LazyResult};
pub use schema::{SchemaField, SchemaType};

// Converter adapters
pub use converter::{
    ConverterAdapter, Context, FieldSource, HashConverter, HashConverterBuilder, HashConverterDef,
    ObjectConverter, ObjectConverterBuilder, ObjectConverterDef, SerdeSource,
};
