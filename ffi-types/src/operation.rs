//! Operation - binds an entry point to its success payload and error table.
//!
//! Each marker type below is one row of the operation catalogue. The generic
//! decoder is instantiated once per marker, so adding an operation means
//! adding a row here, not writing another converter.

use serde::de::DeserializeOwned;

use crate::model::{Account, DbState, ErrorVariants, File, UsageMetrics, WorkCalculated};
use crate::ui_errors::*;
use crate::EntryPoint;

/// One core operation, as seen from the managed side.
pub trait Operation {
    /// The native symbol that performs it.
    const ENTRY: EntryPoint;

    /// Whether the response is wrapped in a `{tag, content}` envelope.
    ///
    /// Only the variant catalogue is returned bare.
    const ENVELOPED: bool = true;

    /// Payload of a successful call.
    type Success: DeserializeOwned + Send + 'static;

    /// Closed set of expected errors.
    type Error: UiError;
}

macro_rules! operations {
    ($(
        $(#[$meta:meta])*
        $name:ident => $entry:ident, $success:ty, $error:ty $(, enveloped = $env:expr)?;
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name;

            impl Operation for $name {
                const ENTRY: EntryPoint = EntryPoint::$entry;
                $(const ENVELOPED: bool = $env;)?
                type Success = $success;
                type Error = $error;
            }
        )*
    };
}

operations! {
    /// `init_logger_safely`. The native call returns nothing.
    InitLogger => InitLoggerSafely, (), InitLoggerError;
    /// `get_db_state`.
    GetDbState => GetDbState, DbState, GetStateError;
    /// `migrate_db`.
    MigrateDb => MigrateDb, (), MigrationError;
    /// `create_account`.
    CreateAccount => CreateAccount, (), CreateAccountError;
    /// `import_account`.
    ImportAccount => ImportAccount, (), ImportError;
    /// `export_account`. Succeeds with the account string.
    ExportAccount => ExportAccount, String, AccountExportError;
    /// `get_account`.
    GetAccount => GetAccount, Account, GetAccountError;
    /// `create_file`.
    CreateFile => CreateFile, File, CreateFileError;
    /// `create_file_at_path`.
    CreateFileAtPath => CreateFileAtPath, File, CreateFileAtPathError;
    /// `write_document`.
    WriteDocument => WriteDocument, (), WriteToDocumentError;
    /// `read_document`. Succeeds with the document text.
    ReadDocument => ReadDocument, String, ReadDocumentError;
    /// `rename_file`.
    RenameFile => RenameFile, (), RenameFileError;
    /// `move_file`.
    MoveFile => MoveFile, (), MoveFileError;
    /// `delete_file`.
    DeleteFile => DeleteFile, (), FileDeleteError;
    /// `get_root`.
    GetRoot => GetRoot, File, GetRootError;
    /// `get_children`.
    GetChildren => GetChildren, Vec<File>, GetChildrenError;
    /// `get_file_by_path`.
    GetFileByPath => GetFileByPath, File, GetFileByPathError;
    /// `list_metadatas`.
    ListMetadatas => ListMetadatas, Vec<File>, ListMetadatasError;
    /// `list_paths`.
    ListPaths => ListPaths, Vec<String>, ListPathsError;
    /// `sync_all`.
    SyncAll => SyncAll, (), SyncAllError;
    /// `calculate_work`.
    CalculateWork => CalculateWork, WorkCalculated, CalculateWorkError;
    /// `execute_work`.
    ExecuteWork => ExecuteWork, (), ExecuteWorkError;
    /// `set_last_synced`.
    SetLastSynced => SetLastSynced, (), SetLastSyncedError;
    /// `get_last_synced`. Milliseconds since the epoch, `0` if never synced.
    GetLastSynced => GetLastSynced, u64, GetLastSyncedError;
    /// `get_usage`.
    GetUsage => GetUsage, UsageMetrics, GetUsageError;
    /// `get_variants`. Returns the catalogue as a bare JSON object.
    GetVariants => GetVariants, ErrorVariants, GetVariantsError, enveloped = false;
}
