//! Error handling for converter adapters and lazy results.

/// Errors that can occur while configuring converters or resolving fields
#[derive(Debug, thiserror::Error)]
pub enum ConverterError {
    /// A converter definition was built without its required wiring
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A result field was requested that the schema type does not declare
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The backing source does not expose the requested accessor
    #[error("Missing accessor: {0}")]
    MissingAccessor(String),
}

/// Alias for Result with `ConverterError`
pub type Result<T> = std::result::Result<T, ConverterError>;
