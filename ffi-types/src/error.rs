//! Error types for the core FFI.
//!
//! Every operation fails in exactly one of two channels: an expected,
//! operation-specific [`UiError`](crate::UiError) variant, or an unexpected
//! diagnostic string. [`ContractViolation`] describes the local failures that
//! are folded into the unexpected channel.

use std::fmt;

use thiserror::Error;

/// The failure side of every operation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FfiError<E> {
    /// A named, anticipated failure specific to the operation.
    UiError(E),
    /// Anything else: a core fault or a broken native/managed contract.
    Unexpected(String),
}

impl<E> FfiError<E> {
    /// Build an unexpected error from any displayable diagnostic.
    pub fn unexpected(msg: impl fmt::Display) -> Self {
        FfiError::Unexpected(msg.to_string())
    }

    /// True for the unexpected channel.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, FfiError::Unexpected(_))
    }

    /// The expected variant, if this is one.
    pub fn expected(&self) -> Option<&E> {
        match self {
            FfiError::UiError(e) => Some(e),
            FfiError::Unexpected(_) => None,
        }
    }

    /// The diagnostic message, if this is unexpected.
    pub fn unexpected_message(&self) -> Option<&str> {
        match self {
            FfiError::UiError(_) => None,
            FfiError::Unexpected(msg) => Some(msg),
        }
    }
}

impl<E> From<ContractViolation> for FfiError<E> {
    fn from(violation: ContractViolation) -> Self {
        FfiError::Unexpected(violation.to_string())
    }
}

impl<E: fmt::Debug> fmt::Display for FfiError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiError::UiError(e) => write!(f, "{e:?}"),
            FfiError::Unexpected(msg) => write!(f, "unexpected error: {msg}"),
        }
    }
}

impl<E: fmt::Debug> std::error::Error for FfiError<E> {}

/// A response that does not honour the native/managed contract.
///
/// These are detected locally and are never confused with an `Unexpected`
/// error reported by the core itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// The response is not JSON at all.
    #[error("contract error: response is not valid JSON ({reason}): {raw}")]
    InvalidJson {
        /// Parser diagnostic.
        reason: String,
        /// The raw response.
        raw: String,
    },

    /// The response is JSON but not an object.
    #[error("contract error: response is not a JSON object: {0}")]
    NotAnObject(String),

    /// The top-level `tag` is missing or not a string.
    #[error("contract error (no tag): {0}")]
    MissingTag(String),

    /// The top-level `content` is missing.
    #[error("contract error (no content): {0}")]
    MissingContent(String),

    /// The top-level `tag` is neither `Ok` nor `Err`.
    #[error("contract error (tag neither Ok nor Err): {0}")]
    UnknownTag(String),

    /// The `Err` content has no string `tag`.
    #[error("contract error (no err tag): {0}")]
    MissingErrTag(String),

    /// The `Err` content has no `content`, or it is not a string.
    #[error("contract error (no err content): {0}")]
    MissingErrContent(String),

    /// The `Err` content tag is neither `UiError` nor `Unexpected`.
    #[error("contract error (err content tag neither UiError nor Unexpected): {0}")]
    UnknownErrTag(String),

    /// A `UiError` name outside the operation's table.
    #[error("contract error (unknown UiError): {0}")]
    UnknownUiError(String),

    /// The `Ok` content does not match the operation's success shape.
    #[error("contract error: could not parse Ok content for {entry}: {reason}")]
    BadOkContent {
        /// Native entry point name.
        entry: String,
        /// Deserializer diagnostic.
        reason: String,
    },

    /// A legacy-shaped response that is ambiguous or malformed.
    #[error("contract error (legacy envelope): {0}")]
    BadLegacyEnvelope(String),
}
