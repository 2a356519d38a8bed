//! The generic response decoder.
//!
//! One function, instantiated per [`Operation`], turns a raw response string
//! into `Result<Success, FfiError<Error>>`. It never panics: every local
//! failure is a [`ContractViolation`] folded into [`FfiError::Unexpected`].

use serde_json::Value;
use tracing::{debug, warn};

use crate::envelope::{Envelope, ErrKind, WireCompat};
use crate::{ContractViolation, FfiError, Operation, UiError};

/// Result of one decoded call.
pub type OpResult<O> = Result<<O as Operation>::Success, FfiError<<O as Operation>::Error>>;

/// Decode a raw response for operation `O`.
pub fn decode<O: Operation>(raw: &str, compat: WireCompat) -> OpResult<O> {
    match classify::<O>(raw, compat) {
        Ok(outcome) => outcome,
        Err(violation) => {
            warn!(entry = %O::ENTRY, %violation, "core response violates the FFI contract");
            Err(violation.into())
        }
    }
}

fn classify<O: Operation>(raw: &str, compat: WireCompat) -> Result<OpResult<O>, ContractViolation> {
    if !O::ENVELOPED {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| ContractViolation::InvalidJson {
                reason: e.to_string(),
                raw: raw.to_string(),
            })?;
        return Ok(Ok(success::<O>(value)?));
    }

    match Envelope::parse(raw, compat)? {
        Envelope::Ok(content) => Ok(Ok(success::<O>(content)?)),
        Envelope::Err(ErrKind::UiError(name)) => match O::Error::from_name(&name) {
            Some(variant) => Ok(Err(FfiError::UiError(variant))),
            None => Err(ContractViolation::UnknownUiError(name)),
        },
        Envelope::Err(ErrKind::Unexpected(msg)) => {
            debug!(entry = %O::ENTRY, "core reported an unexpected error");
            Ok(Err(FfiError::Unexpected(msg)))
        }
    }
}

fn success<O: Operation>(content: Value) -> Result<O::Success, ContractViolation> {
    serde_json::from_value(content).map_err(|e| ContractViolation::BadOkContent {
        entry: O::ENTRY.symbol().to_string(),
        reason: e.to_string(),
    })
}
