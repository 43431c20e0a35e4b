//! Object-backed converter adapter.
//!
//! The adapter is split into a one-time definition and a per-request
//! converter. The definition binds a schema type to a table of resolver
//! overrides and is built once, up front; converters are then created
//! cheaply from the shared definition, one per backing object.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::Value;

use super::{ConverterAdapter, Context, FieldSource};
use crate::error::{ConverterError, Result};
use crate::result::{Computation, LazyResult};
use crate::schema::SchemaType;

/// A resolver override: computes one field from the backing object and context
pub type OverrideFn<S> = Arc<dyn Fn(&S, &Context) -> Result<Value> + Send + Sync>;

/// One-time definition binding a schema type to resolver overrides
///
/// Plays the role a converter subclass plays in a dynamic runtime: shared
/// across all conversion requests for the type, with the override table
/// resolved once at build time instead of through per-call reflection.
pub struct ObjectConverterDef<S> {
    schema_type: Arc<SchemaType>,
    overrides: FxHashMap<String, OverrideFn<S>>,
}

impl<S: FieldSource + 'static> ObjectConverterDef<S> {
    /// Start building a definition
    #[must_use] pub fn builder() -> ObjectConverterBuilder<S> {
        ObjectConverterBuilder::new()
    }

    /// Get the bound schema type
    #[must_use] pub fn schema_type(&self) -> &Arc<SchemaType> {
        &self.schema_type
    }

    /// Create a converter for one backing object and context
    #[must_use]
    pub fn converter(self: &Arc<Self>, object: S, context: Context) -> ObjectConverter<S> {
        ObjectConverter {
            def: Arc::clone(self),
            object: Arc::new(object),
            context: Arc::new(context),
        }
    }
}

impl<S> fmt::Debug for ObjectConverterDef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectConverterDef")
            .field("schema_type", &self.schema_type.name())
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for `ObjectConverterDef`
pub struct ObjectConverterBuilder<S> {
    schema_type: Option<Arc<SchemaType>>,
    overrides: FxHashMap<String, OverrideFn<S>>,
}

impl<S: FieldSource + 'static> ObjectConverterBuilder<S> {
    /// Create an empty builder
    #[must_use] pub fn new() -> Self {
        Self {
            schema_type: None,
            overrides: FxHashMap::default(),
        }
    }

    /// Bind the schema type whose fields the converter will produce
    #[must_use]
    pub fn schema_type(mut self, schema_type: Arc<SchemaType>) -> Self {
        self.schema_type = Some(schema_type);
        self
    }

    /// Register a resolver override for an accessor identifier
    ///
    /// An override always wins over the backing object's accessor, whether
    /// or not the object could also satisfy the field.
    #[must_use]
    pub fn override_field<F>(mut self, accessor: impl Into<String>, f: F) -> Self
    where
        F: Fn(&S, &Context) -> Result<Value> + Send + Sync + 'static,
    {
        self.overrides.insert(accessor.into(), Arc::new(f));
        self
    }

    /// Build the definition
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if no schema type was bound.
    pub fn build(self) -> Result<Arc<ObjectConverterDef<S>>> {
        let schema_type = self.schema_type.ok_or_else(|| {
            ConverterError::Configuration("schema type must be provided".to_string())
        })?;
        Ok(Arc::new(ObjectConverterDef {
            schema_type,
            overrides: self.overrides,
        }))
    }
}

impl<S: FieldSource + 'static> Default for ObjectConverterBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-request converter over a backing object
pub struct ObjectConverter<S> {
    def: Arc<ObjectConverterDef<S>>,
    object: Arc<S>,
    context: Arc<Context>,
}

impl<S: FieldSource + 'static> ObjectConverter<S> {
    /// Get the backing object
    #[must_use] pub fn object(&self) -> &S {
        &self.object
    }

    /// Get the context
    #[must_use] pub fn context(&self) -> &Context {
        &self.context
    }

    fn computation(&self, accessor: &str) -> Computation {
        let accessor = accessor.to_string();
        if let Some(override_fn) = self.def.overrides.get(&accessor) {
            log::trace!("field '{accessor}': resolver override");
            let override_fn = Arc::clone(override_fn);
            let object = Arc::clone(&self.object);
            let context = Arc::clone(&self.context);
            Box::new(move || override_fn(&object, &context))
        } else {
            log::trace!("field '{accessor}': backing object accessor");
            let object = Arc::clone(&self.object);
            Box::new(move || object.field(&accessor))
        }
    }
}

impl<S: FieldSource + 'static> ConverterAdapter for ObjectConverter<S> {
    fn schema_type(&self) -> &Arc<SchemaType> {
        self.def.schema_type()
    }

    fn result(&self) -> Result<LazyResult> {
        let schema_type = Arc::clone(self.def.schema_type());
        log::debug!(
            "building result for {} ({} fields)",
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

impl<S> fmt::Debug for ObjectConverter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectConverter")
            .field("def", &self.def)
            .finish()
    }
}
