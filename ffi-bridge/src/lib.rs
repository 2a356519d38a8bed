//! # lb-ffi-bridge
//!
//! Typed async facade over the Lockbook core's C interface.
//!
//! [`CoreHandle`] exposes one method per core operation. Each call is
//! marshaled into C strings, run on a blocking thread under the shared
//! [`CoreLock`], copied out of native memory, released, and decoded by
//! `lb-ffi-types` into `Result<T, FfiError<E>>`.
//!
//! ## Design
//!
//! - One [`CoreLock`] per native library, injected, never global
//! - Every response buffer is owned by a [`NativeString`] and released on drop
//! - The adapter never interprets JSON; the decoder never touches pointers
//! - [`NativeCore`] is the only seam with raw pointers, so tests run on
//!   [`MockCore`] and production links `lockbook_core` (feature `link-core`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod config;
pub mod error;
pub mod handle;
pub mod logging;
pub mod native;
pub mod types;

pub use adapter::{Arg, CallAdapter, CoreLock, LineEndings, NativeString};
pub use config::{BridgeConfig, ConfigError, CoreConfig, FfiConfig, LoggingConfig};
pub use error::BridgeError;
pub use handle::CoreHandle;
pub use native::{MockCore, NativeArg, NativeCore, RecordedArg, RecordedCall};
#[cfg(feature = "link-core")]
pub use native::LinkedCore;
pub use types::Session;
