//! Core error types for trainroom-core.
//!
//! The estimation and fit engines never fail: constraint violations are
//! reported as data (`FitResult::reason`). The errors here belong to the
//! boundary: parsing user input, loading catalogs and config, and
//! importing project documents.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for trainroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Project import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Exercise catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Config directory could not be determined or created
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Malformed clock time
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidClockTime(String),

    /// Unknown enumerated value
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Referenced entity does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },
}

/// Errors raised while importing a project document.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Document is not valid JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Document root is not an object
    #[error("Project document must be a JSON object")]
    NotAnObject,

    /// Required field missing
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// Field present with the wrong JSON type
    #[error("Field '{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// Schema version newer than this build understands
    #[error("Unsupported schema_version {found} (supported: {supported})")]
    UnsupportedSchema { found: u64, supported: u32 },

    /// Required fields are present but the document does not match the model
    #[error("Malformed project: {0}")]
    Malformed(String),
}

/// Exercise catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read the catalog file
    #[error("Failed to read catalog {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse catalog TOML
    #[error("Failed to parse catalog: {0}")]
    ParseFailed(String),

    /// Catalog has no exercises
    #[error("Catalog contains no exercises")]
    Empty,

    /// Two exercises share an id
    #[error("Duplicate exercise id '{0}'")]
    DuplicateId(String),

    /// An exercise carries an inverted range
    #[error("Exercise '{id}' has {field} min greater than max")]
    InvertedRange { id: String, field: &'static str },
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
