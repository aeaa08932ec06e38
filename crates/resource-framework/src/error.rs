//! # Framework Errors
//!
//! The error types shared by every resource built on this framework. Domain
//! crates wrap these with `#[from]` in their own error enums, the same way each
//! resource keeps a single error type for all of its operations.

/// Failures raised by an [`Adapter`](crate::Adapter) implementation.
///
/// The framework never inspects these beyond propagating them: no retry, no
/// swallowing.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// The service answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The request never produced a usable reply (connection, TLS, decoding).
    #[error("transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

impl AdapterError {
    /// Wraps any transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// Errors produced while populating a [`LazyCollection`](crate::LazyCollection).
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// The reply was not a list of objects.
    #[error("unexpected response body from {path}: expected {expected}, got {found}")]
    UnexpectedBody {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A returned row carried no natural key, so it cannot be indexed.
    #[error("{kind} returned by {path} has no natural key")]
    MissingKey { kind: &'static str, path: String },
}

/// Short JSON type name used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
