//! Error types for lb-ffi-bridge.
//!
//! These cover failures on the managed side of the boundary: marshaling,
//! the blocking call itself, and configuration. Anything that reaches a
//! caller of [`CoreHandle`](crate::CoreHandle) is flattened into the
//! unexpected channel of [`FfiError`].

use lb_ffi_types::{EntryPoint, FfiError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors from the bridge itself, before or after the core runs.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A string argument contains a NUL byte and cannot cross as a C string.
    #[error("marshaling error: argument {index} of {entry} contains a NUL byte")]
    InteriorNul {
        /// Entry point being called.
        entry: EntryPoint,
        /// Position of the offending argument, writeable path included.
        index: usize,
    },

    /// An argument's type does not match the C parameter it fills.
    #[error("marshaling error: wrong argument type for {param} of {entry}")]
    ArgKind {
        /// Entry point being called.
        entry: EntryPoint,
        /// Name of the C parameter.
        param: &'static str,
    },

    /// An argument has no native representation.
    #[error("marshaling error: {0}")]
    Unmarshalable(String),

    /// Wrong number of arguments for the entry point.
    #[error("marshaling error: {entry} takes {expected} arguments, got {got}")]
    Arity {
        /// Entry point being called.
        entry: EntryPoint,
        /// Arguments the symbol takes, writeable path included.
        expected: usize,
        /// Arguments supplied.
        got: usize,
    },

    /// The core returned a null pointer where a response string was due.
    #[error("native call returned no response: {0}")]
    NullResponse(EntryPoint),

    /// The blocking task running the call panicked or was cancelled.
    #[error("native call aborted: {0}")]
    Aborted(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl<E> From<BridgeError> for FfiError<E> {
    fn from(err: BridgeError) -> Self {
        FfiError::Unexpected(err.to_string())
    }
}
