//! Error types for account-level operations.

use crate::config::ConfigError;
use resource_framework::{AdapterError, CollectionError};
use thiserror::Error;

/// Errors raised by [`Account`](super::Account), its top-level collections and
/// its field catalog.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// `/fields` replied with something that is not a list of field definitions.
    #[error("malformed field catalog: {0}")]
    MalformedFields(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
