//! Error types for the oc client core.

use thiserror::Error;

/// Errors raised while building or indexing structural models.
///
/// Key misses are not errors: navigation reports them as `Node::Missing`.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Expected an object, got {0}")]
    NotAnObject(String),

    #[error("Unknown object definition type: {0}")]
    UnsupportedDefinition(String),

    #[error("Failed to decode object definition: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to decode YAML object definition: {0}")]
    DecodeYaml(#[from] serde_yaml::Error),

    #[error("Cannot set through {key:?}: expected an object, got {found}")]
    PathBlocked { key: String, found: &'static str },

    #[error("Empty key path")]
    EmptyPath,
}

/// Client-level errors surfaced to callers driving the CLI.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Timeout: an enclosing deadline has expired")]
    OutOfTime,

    #[error("{operation}: command exited with status {status}: {err}")]
    CommandFailed {
        operation: String,
        status: i32,
        err: String,
    },

    #[error("Runner error: {0}")]
    Runner(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        ClientError::ConfigError(err.to_string())
    }
}
