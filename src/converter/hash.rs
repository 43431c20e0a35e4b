//! Hash-backed converter adapter.
//!
//! Resolves each field against the backing hash first; a present, non-null
//! entry is returned as-is. Everything else delegates to a nested
//! object-backed converter, whose result is built once per hash converter
//! and shared by every field that falls back to it. A key that is absent
//! and a key holding an explicit null behave identically: both delegate.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use super::object::ObjectConverter;
use super::{ConverterAdapter, Context, FieldSource};
use crate::error::{ConverterError, Result};
use crate::result::{Computation, LazyResult};
use crate::schema::SchemaType;

/// Supplier for the nested object-backed converter used as fallback
pub type NestedAdapterFn<S> = Box<dyn Fn() -> ObjectConverter<S> + Send + Sync>;

/// One-time definition binding a schema type to a nested-adapter supplier
pub struct HashConverterDef<S> {
    schema_type: Arc<SchemaType>,
    nested: NestedAdapterFn<S>,
}

impl<S: FieldSource + 'static> HashConverterDef<S> {
    /// Start building a definition
    #[must_use] pub fn builder() -> HashConverterBuilder<S> {
        HashConverterBuilder::new()
    }

    /// Get the bound schema type
    #[must_use] pub fn schema_type(&self) -> &Arc<SchemaType> {
        &self.schema_type
    }

    /// Create a converter for one backing hash and context
    #[must_use]
    pub fn converter(self: &Arc<Self>, hash: Map<String, Value>, context: Context) -> HashConverter<S> {
        HashConverter {
            hash: Arc::new(hash),
            context: Arc::new(context),
            nested: Arc::new(NestedResultCell {
                def: Arc::clone(self),
                memo: Mutex::new(None),
            }),
        }
    }
}

impl<S> fmt::Debug for HashConverterDef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashConverterDef")
            .field("schema_type", &self.schema_type.name())
            .finish()
    }
}

/// Builder for `HashConverterDef`
pub struct HashConverterBuilder<S> {
    schema_type: Option<Arc<SchemaType>>,
    nested: Option<NestedAdapterFn<S>>,
}

impl<S: FieldSource + 'static> HashConverterBuilder<S> {
    /// Create an empty builder
    #[must_use] pub fn new() -> Self {
        Self {
            schema_type: None,
            nested: None,
        }
    }

    /// Bind the schema type whose fields the converter will produce
    #[must_use]
    pub fn schema_type(mut self, schema_type: Arc<SchemaType>) -> Self {
        self.schema_type = Some(schema_type);
        self
    }

    /// Supply the nested object-backed converter used for fallback values
    ///
    /// The supplier runs lazily, the first time any field falls back; a
    /// converter whose hash satisfies every field never invokes it.
    #[must_use]
    pub fn nested_adapter<F>(mut self, f: F) -> Self
    where
        F: Fn() -> ObjectConverter<S> + Send + Sync + 'static,
    {
        self.nested = Some(Box::new(f));
        self
    }

    /// Build the definition
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if no schema type was bound or no nested
    /// adapter was supplied.
    pub fn build(self) -> Result<Arc<HashConverterDef<S>>> {
        let schema_type = self.schema_type.ok_or_else(|| {
            ConverterError::Configuration("schema type must be provided".to_string())
        })?;
        let nested = self.nested.ok_or_else(|| {
            ConverterError::Configuration("nested adapter must be provided".to_string())
        })?;
        Ok(Arc::new(HashConverterDef {
            schema_type,
            nested,
        }))
    }
}

impl<S: FieldSource + 'static> Default for HashConverterBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

// Lazily-built nested result, shared by every field that falls back.
// The explicit memo cell keeps the supplier and the nested result() call
// to at most one invocation per hash converter.
struct NestedResultCell<S> {
    def: Arc<HashConverterDef<S>>,
    memo: Mutex<Option<Arc<LazyResult>>>,
}

impl<S: FieldSource + 'static> NestedResultCell<S> {
    fn result(&self) -> Result<Arc<LazyResult>> {
        let mut memo = self.memo.lock().unwrap();
        if let Some(result) = &*memo {
            return Ok(Arc::clone(result));
        }
        log::debug!(
            "building nested fallback result for {}",
            self.def.schema_type.name()
        );
        let result = Arc::new((self.def.nested)().result()?);
        *memo = Some(Arc::clone(&result));
        Ok(result)
    }
}

/// Per-request converter over a backing hash
///
/// The definition is owned by the nested-result cell and reached through it.
pub struct HashConverter<S> {
    hash: Arc<Map<String, Value>>,
    context: Arc<Context>,
    nested: Arc<NestedResultCell<S>>,
}

impl<S: FieldSource + 'static> HashConverter<S> {
    /// Get the backing hash
    #[must_use] pub fn hash(&self) -> &Map<String, Value> {
        &self.hash
    }

    /// Get the context
    #[must_use] pub fn context(&self) -> &Context {
        &self.context
    }

    fn computation(&self, accessor: &str) -> Computation {
        match self.hash.get(accessor) {
            Some(value) if !value.is_null() => {
                log::trace!("field '{accessor}': hash value");
                let value = value.clone();
                Box::new(move || Ok(value.clone()))
            }
            _ => {
                log::trace!("field '{accessor}': nested adapter fallback");
                let accessor = accessor.to_string();
                let nested = Arc::clone(&self.nested);
                Box::new(move || nested.result()?.get(&accessor))
            }
        }
    }
}

impl<S: FieldSource + 'static> ConverterAdapter for HashConverter<S> {
    fn schema_type(&self) -> &Arc<SchemaType> {
        self.nested.def.schema_type()
    }

    fn result(&self) -> Result<LazyResult> {
        let schema_type = Arc::clone(self.nested.def.schema_type());
        log::debug!(
            "building hash result for {} ({} fields)",
            schema_type.name(),
            schema_type.fields().len()
        );
        let computations = schema_type
            .fields()
            .iter()
            .map(|field| (field.accessor.clone(), self.computation(&field.accessor)))
            .collect();
        Ok(LazyResult::new(schema_type, computations))
    }
}

impl<S> fmt::Debug for HashConverter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashConverter")
            .field("def", &self.nested.def)
            .field("hash_keys", &self.hash.keys().collect::<Vec<_>>())
            .finish()
    }
}
