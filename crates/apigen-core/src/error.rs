//! Error types for binding generation

use thiserror::Error;

/// Result type alias for generation operations
pub type GenResult<T> = Result<T, GenError>;

/// Error type for generation operations
///
/// Every variant is terminal for the object being generated. Callers that
/// process several objects keep going with the next one.
#[derive(Error, Debug)]
pub enum GenError {
    /// The parent chain of an object loops back on itself
    #[error("inheritance cycle: {object} reaches {repeated} twice")]
    InheritanceCycle { object: String, repeated: String },

    /// A marshaler was asked about a C type it cannot classify
    #[error("unsupported C type `{c_type}` in {function}")]
    UnsupportedType { function: String, c_type: String },

    /// An input record is internally inconsistent
    #[error("malformed declaration {name}: {reason}")]
    Malformed { name: String, reason: String },

    /// Several objects map to the same module
    #[error("module {module} would be generated by several objects: {}", objects.join(", "))]
    DuplicateModule {
        module: String,
        objects: Vec<String>,
    },

    /// The requested object is not part of the API model
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl GenError {
    /// Shorthand for [`GenError::UnsupportedType`]
    pub fn unsupported(function: &str, c_type: &str) -> Self {
        GenError::UnsupportedType {
            function: function.to_string(),
            c_type: c_type.to_string(),
        }
    }
}

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        GenError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for GenError {
    fn from(err: toml::de::Error) -> Self {
        GenError::ConfigError(err.to_string())
    }
}
