//! EntryPoint - the native symbols exported by the core's C interface.
//!
//! Every entry point except `get_variants` takes the core's writeable path as
//! its first parameter; the core opens its state under that directory on each
//! call. [`EntryPoint::params`] is the full C parameter list in declaration
//! order and is what the adapter checks arguments against.

use std::fmt;

/// A native entry point of the core library.
///
/// Symbol names follow the core's snake_case verb-noun convention and are
/// used verbatim when linking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// Install the core's file logger under the writeable path.
    InitLoggerSafely,
    /// Report whether the local database is usable.
    GetDbState,
    /// Migrate the local database to the current schema.
    MigrateDb,
    /// Register a new account with the server.
    CreateAccount,
    /// Import an account from an exported account string.
    ImportAccount,
    /// Export the account as a string.
    ExportAccount,
    /// Read the local account.
    GetAccount,
    /// Create a file (and missing folders) at a path.
    CreateFileAtPath,
    /// Overwrite a document's content.
    WriteDocument,
    /// Create a file under a parent folder.
    CreateFile,
    /// Fetch the root folder.
    GetRoot,
    /// List the direct children of a folder.
    GetChildren,
    /// Fetch a file by path.
    GetFileByPath,
    /// Delete a file.
    DeleteFile,
    /// Read a document's content.
    ReadDocument,
    /// List paths, optionally filtered.
    ListPaths,
    /// Rename a file.
    RenameFile,
    /// List every file's metadata.
    ListMetadatas,
    /// Move a file to a new parent.
    MoveFile,
    /// Compute pending sync work without performing it.
    CalculateWork,
    /// Perform one unit of sync work.
    ExecuteWork,
    /// Push local changes and pull remote ones.
    SyncAll,
    /// Record the last successful sync time.
    SetLastSynced,
    /// Read the last successful sync time.
    GetLastSynced,
    /// Read server usage.
    GetUsage,
    /// Read the catalogue of every expected-error variant.
    GetVariants,
}

/// How a native entry point hands back its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Returns a pointer to a JSON string that must be released.
    Json,
    /// Returns nothing.
    Void,
}

/// C type of one native parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `*const c_char`, a NUL-terminated UTF-8 string.
    Str,
    /// `u64`.
    U64,
}

/// One parameter of a native entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Parameter name in the C declaration.
    pub name: &'static str,
    /// C type.
    pub kind: ParamKind,
}

impl Param {
    const fn str(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Str,
        }
    }
}

/// The session parameter, first on every entry point that takes one.
pub const WRITEABLE_PATH: Param = Param::str("writeable_path");

const USERNAME: Param = Param::str("username");
const API_URL: Param = Param::str("api_url");
const ACCOUNT_STRING: Param = Param::str("account_string");
const PATH_AND_NAME: Param = Param::str("path_and_name");
const ID: Param = Param::str("id");
const CONTENT: Param = Param::str("content");
const NAME: Param = Param::str("name");
const PARENT: Param = Param::str("parent");
const FILE_TYPE: Param = Param::str("file_type");
const PATH: Param = Param::str("path");
const FILTER: Param = Param::str("filter");
const NEW_NAME: Param = Param::str("new_name");
const NEW_PARENT: Param = Param::str("new_parent");
const WORK_UNIT: Param = Param::str("work_unit");
const LAST_SYNC: Param = Param {
    name: "last_sync",
    kind: ParamKind::U64,
};

impl EntryPoint {
    /// Every entry point, in the order the core declares them.
    pub const ALL: &'static [EntryPoint] = &[
        EntryPoint::InitLoggerSafely,
        EntryPoint::GetDbState,
        EntryPoint::MigrateDb,
        EntryPoint::CreateAccount,
        EntryPoint::ImportAccount,
        EntryPoint::ExportAccount,
        EntryPoint::GetAccount,
        EntryPoint::CreateFileAtPath,
        EntryPoint::WriteDocument,
        EntryPoint::CreateFile,
        EntryPoint::GetRoot,
        EntryPoint::GetChildren,
        EntryPoint::GetFileByPath,
        EntryPoint::DeleteFile,
        EntryPoint::ReadDocument,
        EntryPoint::ListPaths,
        EntryPoint::RenameFile,
        EntryPoint::ListMetadatas,
        EntryPoint::MoveFile,
        EntryPoint::CalculateWork,
        EntryPoint::ExecuteWork,
        EntryPoint::SyncAll,
        EntryPoint::SetLastSynced,
        EntryPoint::GetLastSynced,
        EntryPoint::GetUsage,
        EntryPoint::GetVariants,
    ];

    /// The exported C symbol name.
    pub fn symbol(self) -> &'static str {
        match self {
            EntryPoint::InitLoggerSafely => "init_logger_safely",
            EntryPoint::GetDbState => "get_db_state",
            EntryPoint::MigrateDb => "migrate_db",
            EntryPoint::CreateAccount => "create_account",
            EntryPoint::ImportAccount => "import_account",
            EntryPoint::ExportAccount => "export_account",
            EntryPoint::GetAccount => "get_account",
            EntryPoint::CreateFileAtPath => "create_file_at_path",
            EntryPoint::WriteDocument => "write_document",
            EntryPoint::CreateFile => "create_file",
            EntryPoint::GetRoot => "get_root",
            EntryPoint::GetChildren => "get_children",
            EntryPoint::GetFileByPath => "get_file_by_path",
            EntryPoint::DeleteFile => "delete_file",
            EntryPoint::ReadDocument => "read_document",
            EntryPoint::ListPaths => "list_paths",
            EntryPoint::RenameFile => "rename_file",
            EntryPoint::ListMetadatas => "list_metadatas",
            EntryPoint::MoveFile => "move_file",
            EntryPoint::CalculateWork => "calculate_work",
            EntryPoint::ExecuteWork => "execute_work",
            EntryPoint::SyncAll => "sync_all",
            EntryPoint::SetLastSynced => "set_last_synced",
            EntryPoint::GetLastSynced => "get_last_synced",
            EntryPoint::GetUsage => "get_usage",
            EntryPoint::GetVariants => "get_variants",
        }
    }

    /// The C parameter list, in declaration order, session included.
    pub fn params(self) -> &'static [Param] {
        match self {
            EntryPoint::CreateAccount => &[WRITEABLE_PATH, USERNAME, API_URL],
            EntryPoint::ImportAccount => &[WRITEABLE_PATH, ACCOUNT_STRING],
            EntryPoint::CreateFileAtPath => &[WRITEABLE_PATH, PATH_AND_NAME],
            EntryPoint::WriteDocument => &[WRITEABLE_PATH, ID, CONTENT],
            EntryPoint::CreateFile => &[WRITEABLE_PATH, NAME, PARENT, FILE_TYPE],
            EntryPoint::GetChildren | EntryPoint::DeleteFile | EntryPoint::ReadDocument => {
                &[WRITEABLE_PATH, ID]
            }
            EntryPoint::GetFileByPath => &[WRITEABLE_PATH, PATH],
            EntryPoint::ListPaths => &[WRITEABLE_PATH, FILTER],
            EntryPoint::RenameFile => &[WRITEABLE_PATH, ID, NEW_NAME],
            EntryPoint::MoveFile => &[WRITEABLE_PATH, ID, NEW_PARENT],
            EntryPoint::ExecuteWork => &[WRITEABLE_PATH, WORK_UNIT],
            EntryPoint::SetLastSynced => &[WRITEABLE_PATH, LAST_SYNC],
            EntryPoint::GetVariants => &[],
            EntryPoint::InitLoggerSafely
            | EntryPoint::GetDbState
            | EntryPoint::MigrateDb
            | EntryPoint::ExportAccount
            | EntryPoint::GetAccount
            | EntryPoint::GetRoot
            | EntryPoint::ListMetadatas
            | EntryPoint::CalculateWork
            | EntryPoint::SyncAll
            | EntryPoint::GetLastSynced
            | EntryPoint::GetUsage => &[WRITEABLE_PATH],
        }
    }

    /// Whether the entry point returns a releasable JSON string.
    pub fn response_kind(self) -> ResponseKind {
        match self {
            EntryPoint::InitLoggerSafely => ResponseKind::Void,
            _ => ResponseKind::Json,
        }
    }

    /// Whether the writeable path is passed as the first argument.
    pub fn takes_session(self) -> bool {
        self.params().first() == Some(&WRITEABLE_PATH)
    }

    /// Number of arguments after the writeable path.
    pub fn arity(self) -> usize {
        self.params().len() - usize::from(self.takes_session())
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
