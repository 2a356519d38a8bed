//! Native call adapter.
//!
//! Moves a call off the async executor, serializes it against every other
//! call into the same library, copies the response out of native memory and
//! releases the native buffer. It never looks inside the response.

use std::borrow::Cow;
use std::ffi::{c_char, CStr};
use std::ptr::NonNull;
use std::sync::Arc;
use std::time::Instant;

use lb_ffi_types::{EntryPoint, ParamKind, ResponseKind};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::BridgeError;
use crate::native::{NativeArg, NativeCore};

/// The process-wide lock serializing calls into one native library.
///
/// Create one per library and hand clones to every adapter that targets it.
/// Clones share the same lock.
#[derive(Debug, Clone, Default)]
pub struct CoreLock {
    inner: Arc<Mutex<()>>,
}

impl CoreLock {
    /// Create a new, unshared lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while some call holds the lock.
    pub fn is_held(&self) -> bool {
        self.inner.try_lock().is_err()
    }

    /// True if both handles guard the same library.
    pub fn same_as(&self, other: &CoreLock) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Owner of a response buffer returned by the core.
///
/// The buffer is handed back to the core when this value drops, so it is
/// released exactly once on every path.
pub struct NativeString<'a, C: NativeCore + ?Sized> {
    core: &'a C,
    ptr: NonNull<c_char>,
}

impl<'a, C: NativeCore + ?Sized> NativeString<'a, C> {
    /// Take ownership of `ptr`. Returns `None` for null.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a NUL-terminated buffer returned by `core` that
    /// has not been released.
    pub unsafe fn from_raw(core: &'a C, ptr: *mut c_char) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { core, ptr })
    }

    /// Copy the buffer into an owned string. Invalid UTF-8 is replaced.
    pub fn to_string_lossy(&self) -> String {
        // SAFETY: `ptr` is live until drop, by construction.
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }
}

impl<C: NativeCore + ?Sized> Drop for NativeString<'_, C> {
    fn drop(&mut self) {
        // SAFETY: we own the only reference to this buffer.
        unsafe { self.core.release(self.ptr.as_ptr()) }
    }
}

/// Line-ending translation at the boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEndings {
    /// Pass text through unchanged.
    #[default]
    Lf,
    /// CRLF to LF on the way in, LF to CRLF on document text coming out.
    Crlf,
}

impl LineEndings {
    /// Normalize text headed into the core.
    pub fn inbound<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            LineEndings::Crlf if text.contains("\r\n") => Cow::Owned(text.replace("\r\n", "\n")),
            _ => Cow::Borrowed(text),
        }
    }

    /// Translate document text coming out of the core.
    pub fn outbound(&self, text: String) -> String {
        match self {
            LineEndings::Crlf if text.contains('\n') => text
                .replace("\r\n", "\n")
                .replace('\n', "\r\n"),
            _ => text,
        }
    }
}

/// A managed-side argument, before marshaling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Text.
    Str(String),
    /// Unsigned integer.
    Int(u64),
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<u64> for Arg {
    fn from(n: u64) -> Self {
        Arg::Int(n)
    }
}

/// Runs blocking native calls for one core.
pub struct CallAdapter<C: NativeCore> {
    core: Arc<C>,
    lock: CoreLock,
    line_endings: LineEndings,
}

impl<C: NativeCore> Clone for CallAdapter<C> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            lock: self.lock.clone(),
            line_endings: self.line_endings,
        }
    }
}

impl<C: NativeCore> CallAdapter<C> {
    /// Create an adapter over `core`, serialized by `lock`.
    pub fn new(core: Arc<C>, lock: CoreLock, line_endings: LineEndings) -> Self {
        Self {
            core,
            lock,
            line_endings,
        }
    }

    /// The line-ending policy in force.
    pub fn line_endings(&self) -> LineEndings {
        self.line_endings
    }

    /// The lock this adapter serializes on.
    pub fn lock(&self) -> &CoreLock {
        &self.lock
    }

    /// Call an entry point that returns a response string.
    pub async fn call_json(&self, entry: EntryPoint, args: Vec<Arg>) -> Result<String, BridgeError> {
        self.invoke(entry, args)
            .await?
            .ok_or(BridgeError::NullResponse(entry))
    }

    /// Call an entry point that returns nothing.
    pub async fn call_void(&self, entry: EntryPoint, args: Vec<Arg>) -> Result<(), BridgeError> {
        self.invoke(entry, args).await.map(|_| ())
    }

    async fn invoke(&self, entry: EntryPoint, args: Vec<Arg>) -> Result<Option<String>, BridgeError> {
        let native = self.marshal(entry, &args)?;
        let core = Arc::clone(&self.core);
        let lock = Arc::clone(&self.lock.inner);
        let started = Instant::now();

        let result = tokio::task::spawn_blocking(move || {
            let _guard = lock.blocking_lock();
            let ptr = core.call(entry, &native);
            match entry.response_kind() {
                ResponseKind::Void => None,
                // SAFETY: `ptr` was just returned by `core` and is owned here.
                ResponseKind::Json => unsafe { NativeString::from_raw(&*core, ptr) }
                    .map(|response| response.to_string_lossy()),
            }
        })
        .await
        .map_err(|e| BridgeError::Aborted(e.to_string()));

        debug!(
            entry = %entry,
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "native call finished"
        );
        result
    }

    fn marshal(&self, entry: EntryPoint, args: &[Arg]) -> Result<Vec<NativeArg>, BridgeError> {
        let params = entry.params();
        if args.len() != params.len() {
            return Err(BridgeError::Arity {
                entry,
                expected: params.len(),
                got: args.len(),
            });
        }

        params
            .iter()
            .zip(args)
            .enumerate()
            .map(|(index, (param, arg))| match (param.kind, arg) {
                (ParamKind::Str, Arg::Str(s)) => {
                    NativeArg::string(entry, index, &self.line_endings.inbound(s))
                }
                (ParamKind::U64, Arg::Int(n)) => Ok(NativeArg::Int(*n)),
                _ => Err(BridgeError::ArgKind {
                    entry,
                    param: param.name,
                }),
            })
            .collect()
    }
}
