//! Error types for member operations.

use crate::account::AccountError;
use resource_framework::{AdapterError, CollectionError};
use thiserror::Error;

/// Errors that can occur during member operations.
///
/// The three `NoMember*` variants are precondition failures: they are returned
/// before any request is issued and are fixed by supplying the missing
/// attribute.
#[derive(Debug, Error)]
pub enum MemberError {
    /// The operation needs a persisted member (a `member_id`).
    #[error("member has no member_id; save it first")]
    NoMemberId,

    /// The operation needs an `email` attribute.
    #[error("member has no email")]
    NoMemberEmail,

    /// The operation needs a `status` attribute.
    #[error("member has no status")]
    NoMemberStatus,

    /// The shortcut is not in the account's field catalog.
    #[error("unknown member field: {0}")]
    UnknownField(String),

    /// The service replied with a body of the wrong shape.
    #[error("unexpected response from {path}: expected {expected}")]
    UnexpectedResponse { path: String, expected: &'static str },

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}
