//! Lazily computed, memoized field results.
//!
//! A `LazyResult` carries one deferred computation per declared field. The
//! computation runs on the field's first successful read and never again for
//! that instance; the stored value is returned from then on. Memoization is
//! tracked with an explicit computed state rather than value presence, so
//! null, false, zero, and empty values are cached like any other.

use std::fmt;
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::error::{ConverterError, Result};
use crate::schema::SchemaType;

/// A deferred, zero-argument field computation
pub type Computation = Box<dyn Fn() -> Result<Value> + Send + Sync>;

enum FieldState {
    Pending,
    Ready(Value),
}

struct FieldCell {
    computation: Computation,
    state: Mutex<FieldState>,
}

/// A result object whose fields are computed on first access and cached
///
/// Fields are keyed by the accessor identifiers the converter adapter used
/// when building the computations. Only fields present at construction are
/// accessible; anything else fails with `UnknownField`.
pub struct LazyResult {
    schema_type: Arc<SchemaType>,
    order: Vec<String>,
    fields: FxHashMap<String, FieldCell>,
}

impl LazyResult {
    /// Create a result from an ordered list of (field, computation) pairs
    #[must_use]
    pub fn new(schema_type: Arc<SchemaType>, computations: Vec<(String, Computation)>) -> Self {
        let mut order = Vec::with_capacity(computations.len());
        let mut fields =
            FxHashMap::with_capacity_and_hasher(computations.len(), Default::default());
        for (name, computation) in computations {
            order.push(name.clone());
            fields.insert(
                name,
                FieldCell {
                    computation,
                    state: Mutex::new(FieldState::Pending),
                },
            );
        }
        Self {
            schema_type,
            order,
            fields,
        }
    }

    /// Get the schema type this result was built for
    #[must_use] pub fn schema_type(&self) -> &Arc<SchemaType> {
        &self.schema_type
    }

    /// Iterate over the field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Read a field, computing and caching it on first access
    ///
    /// A failing computation propagates its error and leaves the field
    /// uncomputed; already-computed and not-yet-read fields are unaffected.
    pub fn get(&self, name: &str) -> Result<Value> {
        let cell = self.cell(name)?;
        let mut state = cell.state.lock().unwrap();
        if let FieldState::Ready(value) = &*state {
            return Ok(value.clone());
        }
        log::trace!("computing field '{name}' of {}", self.schema_type.name());
        let value = (cell.computation)()?;
        *state = FieldState::Ready(value.clone());
        Ok(value)
    }

    /// Write a field, suppressing its computation from then on
    ///
    /// The write succeeds whether or not the field was ever read.
    pub fn set(&self, name: &str, value: Value) -> Result<()> {
        let cell = self.cell(name)?;
        *cell.state.lock().unwrap() = FieldState::Ready(value);
        Ok(())
    }

    /// Check whether a field has a cached value (computed or written)
    #[must_use] pub fn is_computed(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .is_some_and(|cell| matches!(&*cell.state.lock().unwrap(), FieldState::Ready(_)))
    }

    fn cell(&self, name: &str) -> Result<&FieldCell> {
        self.fields
            .get(name)
            .ok_or_else(|| ConverterError::UnknownField(name.to_string()))
    }
}

impl fmt::Debug for LazyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyResult")
            .field("schema_type", &self.schema_type.name())
            .field("fields", &self.order)
            .finish()
    }
}
