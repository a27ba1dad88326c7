//! Error types for the spatial type-mapping library.

use thiserror::Error;

/// Exit code for configuration errors (invalid YAML, bad values, no mapping).
pub const EXIT_CONFIG_ERROR: u8 = 1;

/// Exit code for invalid arguments supplied by the caller.
pub const EXIT_INVALID_ARGUMENT: u8 = 2;

/// Exit code for geometry parsing and SRID errors.
pub const EXIT_GEOMETRY_ERROR: u8 = 3;

/// Exit code for I/O errors (file not found, permission denied).
pub const EXIT_IO_ERROR: u8 = 7;

/// Main error type for type-mapping operations.
#[derive(Error, Debug)]
pub enum MappingError {
    /// Configuration error (invalid YAML, out-of-range values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required argument was absent or unusable.
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// The SRID cannot be used for the requested column kind.
    #[error("Invalid SRID {srid} for {store_type}: {message}")]
    InvalidSrid {
        srid: i32,
        store_type: String,
        message: String,
    },

    /// Well-known text could not be parsed into a geometry.
    #[error("WKT parse error: {0}")]
    WktParse(String),

    /// A parsed geometry does not match the application type of the mapping.
    #[error("Geometry kind mismatch: mapping expects {expected}, got {actual}")]
    GeometryKindMismatch { expected: String, actual: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MappingError {
    /// Create an InvalidArgument error for a missing argument.
    pub fn missing_argument(name: impl Into<String>) -> Self {
        MappingError::InvalidArgument {
            name: name.into(),
            message: "value cannot be absent".to_string(),
        }
    }

    /// Create an InvalidSrid error.
    pub fn invalid_srid(
        srid: i32,
        store_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        MappingError::InvalidSrid {
            srid,
            store_type: store_type.into(),
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            MappingError::Config(_) | MappingError::Yaml(_) | MappingError::Json(_) => {
                EXIT_CONFIG_ERROR
            }
            MappingError::InvalidArgument { .. } => EXIT_INVALID_ARGUMENT,
            MappingError::InvalidSrid { .. }
            | MappingError::WktParse(_)
            | MappingError::GeometryKindMismatch { .. } => EXIT_GEOMETRY_ERROR,
            MappingError::Io(_) => EXIT_IO_ERROR,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for type-mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
