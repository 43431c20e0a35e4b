//! Converter adapters mapping backing values onto schema-declared fields.
//!
//! Two variants exist, one per backing shape. The object-backed variant
//! resolves each field through a resolver override when one is registered,
//! falling back to the backing object's same-named accessor. The hash-backed
//! variant prefers a present, non-null hash entry and otherwise delegates to
//! a nested object-backed adapter's memoized result.

// Define converter modules
pub mod hash;
pub mod object;

// Re-export the adapter types
pub use hash::{HashConverter, HashConverterBuilder, HashConverterDef, NestedAdapterFn};
pub use object::{ObjectConverter, ObjectConverterBuilder, ObjectConverterDef, OverrideFn};

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{ConverterError, Result};
use crate::result::LazyResult;
use crate::schema::SchemaType;

/// Auxiliary data handed to a converter and passed through to resolver
/// overrides unchanged; the crate never inspects it
pub type Context = Map<String, Value>;

/// Duck-typed access to a backing object's accessors
///
/// Any type that can resolve an accessor identifier to a value can back an
/// object converter. An accessor the source does not expose fails with
/// `MissingAccessor`, and that failure surfaces unmodified to whoever reads
/// the corresponding result field.
pub trait FieldSource: Send + Sync {
    /// Resolve a single accessor to its value
    fn field(&self, accessor: &str) -> Result<Value>;
}

impl FieldSource for Map<String, Value> {
    fn field(&self, accessor: &str) -> Result<Value> {
        self.get(accessor)
            .cloned()
            .ok_or_else(|| ConverterError::MissingAccessor(accessor.to_string()))
    }
}

/// Backing source over any serializable domain model
///
/// The model is serialized once at construction; accessors then resolve
/// against the serialized field map. Useful when the backing value is a
/// plain data struct rather than a type with hand-written accessors.
#[derive(Debug, Clone)]
pub struct SerdeSource {
    fields: Map<String, Value>,
}

impl SerdeSource {
    /// Wrap a serializable model; fails unless it serializes to an object
    pub fn new<T: serde::Serialize>(model: &T) -> Result<Self> {
        match serde_json::to_value(model) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(other) => Err(ConverterError::Configuration(format!(
                "backing model must serialize to an object, got {other:?}"
            ))),
            Err(e) => Err(ConverterError::Configuration(format!(
                "backing model failed to serialize: {e}"
            ))),
        }
    }
}

impl FieldSource for SerdeSource {
    fn field(&self, accessor: &str) -> Result<Value> {
        self.fields.field(accessor)
    }
}

/// Common surface of the two converter variants
pub trait ConverterAdapter {
    /// The schema type this converter is bound to
    fn schema_type(&self) -> &Arc<SchemaType>;

    /// Build a lazy result over the schema type's declared fields
    ///
    /// Each call builds a fresh result with its own memoization; nothing is
    /// computed until a field is read.
    fn result(&self) -> Result<LazyResult>;
}
