//! # lb-ffi-types
//!
//! Protocol types for talking to the Lockbook core over its C interface.
//!
//! This crate has no I/O. It describes what comes back across the boundary
//! and how to classify it:
//! - [`EntryPoint`] - The native symbols and their C parameter lists
//! - [`Envelope`] - The `{tag, content}` response wrapper (and the legacy shape)
//! - [`FfiError`] - Expected vs unexpected failure channels
//! - [`UiError`] - Per-operation closed tables of expected-error names
//! - [`Operation`] - Binds an entry point to its payload and error table
//! - [`decode()`] - The one generic decoder every operation goes through

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decode;
mod entry;
pub mod envelope;
mod error;
pub mod model;
pub mod operation;
pub mod ui_errors;

pub use decode::{decode, OpResult};
pub use entry::{EntryPoint, Param, ParamKind, ResponseKind, WRITEABLE_PATH};
pub use envelope::{Envelope, ErrKind, WireCompat};
pub use error::{ContractViolation, FfiError};
pub use model::{
    Account, DbState, ErrorVariants, File, FileType, FileUsage, PathFilter, UsageItemMetric,
    UsageMetrics, VariantDrift, WorkCalculated, WorkUnit,
};
pub use operation::Operation;
pub use ui_errors::UiError;
