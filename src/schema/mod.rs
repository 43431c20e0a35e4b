//! Schema type descriptors consumed by converter adapters.
//!
//! The schema system itself lives outside this crate; converters only need
//! an ordered enumeration of declared fields and the accessor identifier to
//! invoke for each one. `SchemaType` is that boundary: a named descriptor
//! holding (declared name, accessor identifier) pairs in declaration order.

use std::fmt;

/// A single field declared by a schema type
///
/// The declared name is what the schema exposes to its consumers; the
/// accessor identifier is the name converters use to resolve the value
/// (override lookup, backing-object accessor, hash key). In the common case
/// the two coincide, but they may differ in spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    /// Name of the field as declared by the schema type
    pub name: String,
    /// Accessor identifier used to resolve the field's value
    pub accessor: String,
}

/// A schema type descriptor: a name plus an ordered field set
#[derive(Debug, Clone)]
pub struct SchemaType {
    name: String,
    fields: Vec<SchemaField>,
}

impl SchemaType {
    /// Create a new schema type with no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declare a field whose accessor identifier matches its name
    #[must_use]
    pub fn with_field(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let accessor = name.clone();
        self.with_field_accessor(name, accessor)
    }

    /// Declare a field resolved through a differently-spelled accessor
    #[must_use]
    pub fn with_field_accessor(
        mut self,
        name: impl Into<String>,
        accessor: impl Into<String>,
    ) -> Self {
        self.fields.push(SchemaField {
            name: name.into(),
            accessor: accessor.into(),
        });
        self
    }

    /// Get the schema type's name
    #[must_use] pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared fields in declaration order
    #[must_use] pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Iterate over the accessor identifiers in declaration order
    pub fn accessors(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.accessor.as_str())
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} fields)", self.name, self.fields.len())
    }
}
