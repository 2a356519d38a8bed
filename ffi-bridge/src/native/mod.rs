//! The native seam.
//!
//! [`NativeCore`] is the only place raw pointers cross into or out of the
//! core. The adapter owns everything around it: marshaling, locking,
//! copying and releasing.
//!
//! - [`LinkedCore`] calls the real `lockbook_core` symbols (feature `link-core`)
//! - [`MockCore`] hands out queued responses and audits every release

#[cfg(feature = "link-core")]
mod linked;
mod mock;

#[cfg(feature = "link-core")]
pub use linked::LinkedCore;
pub use mock::{MockCore, RecordedArg, RecordedCall};

use std::ffi::{c_char, CString};

use lb_ffi_types::EntryPoint;

use crate::error::BridgeError;

/// One marshaled argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeArg {
    /// A null-terminated UTF-8 string.
    Str(CString),
    /// An unsigned 64-bit integer.
    Int(u64),
}

impl NativeArg {
    /// Marshal a string argument.
    ///
    /// `index` is only used to report which argument failed.
    pub fn string(entry: EntryPoint, index: usize, value: &str) -> Result<Self, BridgeError> {
        CString::new(value)
            .map(NativeArg::Str)
            .map_err(|_| BridgeError::InteriorNul { entry, index })
    }

    /// Pointer to the string, or null for non-string arguments.
    pub fn as_ptr(&self) -> *const c_char {
        match self {
            NativeArg::Str(s) => s.as_ptr(),
            NativeArg::Int(_) => std::ptr::null(),
        }
    }

    /// The integer, or zero for non-integer arguments.
    pub fn as_int(&self) -> u64 {
        match self {
            NativeArg::Int(n) => *n,
            NativeArg::Str(_) => 0,
        }
    }
}

/// The core's C interface.
///
/// Implementations are not required to be reentrant; callers serialize
/// every call through a [`CoreLock`](crate::CoreLock).
pub trait NativeCore: Send + Sync + 'static {
    /// Invoke `entry` with fully marshaled arguments in C parameter order,
    /// writeable path first.
    ///
    /// Returns the core's response buffer, or null for entry points that
    /// return nothing.
    fn call(&self, entry: EntryPoint, args: &[NativeArg]) -> *mut c_char;

    /// Hand a response buffer back to the core.
    ///
    /// # Safety
    ///
    /// `ptr` must have come from [`NativeCore::call`] on this core and must
    /// not have been released already. It must not be read afterwards.
    unsafe fn release(&self, ptr: *mut c_char);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_arg_rejects_interior_nul() {
        let err = NativeArg::string(EntryPoint::RenameFile, 2, "bad\0name").unwrap_err();
        assert!(matches!(
            err,
            BridgeError::InteriorNul {
                entry: EntryPoint::RenameFile,
                index: 2
            }
        ));
    }

    #[test]
    fn string_arg_keeps_bytes() {
        let arg = NativeArg::string(EntryPoint::RenameFile, 0, "notes.md").unwrap();
        assert_eq!(arg, NativeArg::Str(CString::new("notes.md").unwrap()));
        assert!(!arg.as_ptr().is_null());
    }

    #[test]
    fn int_arg_has_no_pointer() {
        let arg = NativeArg::Int(42);
        assert!(arg.as_ptr().is_null());
        assert_eq!(arg.as_int(), 42);
    }
}
