//! Calls into the `lockbook_core` shared library.
//!
//! Declarations mirror the core's C interface one to one. Every symbol but
//! `get_variants` and `release_pointer` takes the writeable path first.

use std::ffi::c_char;

use lb_ffi_types::EntryPoint;

use super::{NativeArg, NativeCore};

#[link(name = "lockbook_core")]
extern "C" {
    fn release_pointer(s: *mut c_char);
    fn init_logger_safely(writeable_path: *const c_char);
    fn get_db_state(writeable_path: *const c_char) -> *mut c_char;
    fn migrate_db(writeable_path: *const c_char) -> *mut c_char;
    fn create_account(
        writeable_path: *const c_char,
        username: *const c_char,
        api_url: *const c_char,
    ) -> *mut c_char;
    fn import_account(writeable_path: *const c_char, account_string: *const c_char)
        -> *mut c_char;
    fn export_account(writeable_path: *const c_char) -> *mut c_char;
    fn get_account(writeable_path: *const c_char) -> *mut c_char;
    fn create_file_at_path(
        writeable_path: *const c_char,
        path_and_name: *const c_char,
    ) -> *mut c_char;
    fn write_document(
        writeable_path: *const c_char,
        id: *const c_char,
        content: *const c_char,
    ) -> *mut c_char;
    fn create_file(
        writeable_path: *const c_char,
        name: *const c_char,
        parent: *const c_char,
        file_type: *const c_char,
    ) -> *mut c_char;
    fn get_root(writeable_path: *const c_char) -> *mut c_char;
    fn get_children(writeable_path: *const c_char, id: *const c_char) -> *mut c_char;
    fn get_file_by_path(writeable_path: *const c_char, path: *const c_char) -> *mut c_char;
    fn delete_file(writeable_path: *const c_char, id: *const c_char) -> *mut c_char;
    fn read_document(writeable_path: *const c_char, id: *const c_char) -> *mut c_char;
    fn list_paths(writeable_path: *const c_char, filter: *const c_char) -> *mut c_char;
    fn rename_file(
        writeable_path: *const c_char,
        id: *const c_char,
        new_name: *const c_char,
    ) -> *mut c_char;
    fn list_metadatas(writeable_path: *const c_char) -> *mut c_char;
    fn move_file(
        writeable_path: *const c_char,
        id: *const c_char,
        new_parent: *const c_char,
    ) -> *mut c_char;
    fn calculate_work(writeable_path: *const c_char) -> *mut c_char;
    fn execute_work(writeable_path: *const c_char, work_unit: *const c_char) -> *mut c_char;
    fn sync_all(writeable_path: *const c_char) -> *mut c_char;
    fn set_last_synced(writeable_path: *const c_char, last_sync: u64) -> *mut c_char;
    fn get_last_synced(writeable_path: *const c_char) -> *mut c_char;
    fn get_usage(writeable_path: *const c_char) -> *mut c_char;
    fn get_variants() -> *mut c_char;
}

/// The core library linked into this process.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkedCore;

impl LinkedCore {
    /// Handle to the linked library.
    pub fn new() -> Self {
        Self
    }
}

impl NativeCore for LinkedCore {
    fn call(&self, entry: EntryPoint, args: &[NativeArg]) -> *mut c_char {
        // Count and kind of every argument are checked against
        // `entry.params()` by the adapter before the lock is taken.
        let s = |i: usize| args.get(i).map_or(std::ptr::null(), NativeArg::as_ptr);
        let n = |i: usize| args.get(i).map_or(0, NativeArg::as_int);

        // SAFETY: every string pointer borrows a CString in `args`, which
        // outlives the call.
        unsafe {
            match entry {
                EntryPoint::InitLoggerSafely => {
                    init_logger_safely(s(0));
                    std::ptr::null_mut()
                }
                EntryPoint::GetDbState => get_db_state(s(0)),
                EntryPoint::MigrateDb => migrate_db(s(0)),
                EntryPoint::CreateAccount => create_account(s(0), s(1), s(2)),
                EntryPoint::ImportAccount => import_account(s(0), s(1)),
                EntryPoint::ExportAccount => export_account(s(0)),
                EntryPoint::GetAccount => get_account(s(0)),
                EntryPoint::CreateFileAtPath => create_file_at_path(s(0), s(1)),
                EntryPoint::WriteDocument => write_document(s(0), s(1), s(2)),
                EntryPoint::CreateFile => create_file(s(0), s(1), s(2), s(3)),
                EntryPoint::GetRoot => get_root(s(0)),
                EntryPoint::GetChildren => get_children(s(0), s(1)),
                EntryPoint::GetFileByPath => get_file_by_path(s(0), s(1)),
                EntryPoint::DeleteFile => delete_file(s(0), s(1)),
                EntryPoint::ReadDocument => read_document(s(0), s(1)),
                EntryPoint::ListPaths => list_paths(s(0), s(1)),
                EntryPoint::RenameFile => rename_file(s(0), s(1), s(2)),
                EntryPoint::ListMetadatas => list_metadatas(s(0)),
                EntryPoint::MoveFile => move_file(s(0), s(1), s(2)),
                EntryPoint::CalculateWork => calculate_work(s(0)),
                EntryPoint::ExecuteWork => execute_work(s(0), s(1)),
                EntryPoint::SyncAll => sync_all(s(0)),
                EntryPoint::SetLastSynced => set_last_synced(s(0), n(1)),
                EntryPoint::GetLastSynced => get_last_synced(s(0)),
                EntryPoint::GetUsage => get_usage(s(0)),
                EntryPoint::GetVariants => get_variants(),
            }
        }
    }

    unsafe fn release(&self, ptr: *mut c_char) {
        release_pointer(ptr);
    }
}
