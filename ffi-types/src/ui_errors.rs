//! Expected-error tables, one closed enum per operation.
//!
//! Variant names are the exact identifiers the core emits inside
//! `{"tag": "UiError", "content": "<Name>"}`. Matching is plain string
//! equality; there is no fallback variant. An enum with no variants means
//! the operation has no expected errors and any `UiError` it reports is a
//! contract violation.

use std::fmt;

/// A closed set of expected errors for one operation.
pub trait UiError: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// The enum's name as it appears in the core's variant catalogue.
    const TYPE_NAME: &'static str;

    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// The wire name of this variant.
    fn name(self) -> &'static str;

    /// Look up a wire name. `None` for names outside the table.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.name() == name)
    }
}

macro_rules! ui_errors {
    ($(
        $(#[$meta:meta])*
        $name:ident { $($variant:ident),* $(,)? }
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum $name {
                $(
                    #[doc = concat!("The core reported `", stringify!($variant), "`.")]
                    $variant,
                )*
            }

            impl UiError for $name {
                const TYPE_NAME: &'static str = stringify!($name);
                const ALL: &'static [Self] = &[$($name::$variant,)*];

                fn name(self) -> &'static str {
                    match self {
                        $($name::$variant => stringify!($variant),)*
                    }
                }
            }
        )*

        /// Every table this layer knows, as `(type name, variant names)`.
        pub fn known_tables() -> Vec<(&'static str, Vec<&'static str>)> {
            vec![$(
                (
                    <$name as UiError>::TYPE_NAME,
                    <$name as UiError>::ALL.iter().map(|v| v.name()).collect(),
                ),
            )*]
        }
    };
}

ui_errors! {
    /// `init_logger_safely` has no expected errors.
    InitLoggerError {}

    /// `get_db_state` has no expected errors.
    GetStateError {}

    /// Expected errors of `migrate_db`.
    MigrationError { StateRequiresCleaning }

    /// Expected errors of `create_account`.
    CreateAccountError {
        UsernameTaken,
        InvalidUsername,
        CouldNotReachServer,
        AccountExistsAlready,
        ClientUpdateRequired,
    }

    /// Expected errors of `import_account`.
    ImportError {
        AccountStringCorrupted,
        AccountExistsAlready,
        AccountDoesNotExist,
        UsernamePKMismatch,
        CouldNotReachServer,
        ClientUpdateRequired,
    }

    /// Expected errors of `export_account`.
    AccountExportError { NoAccount }

    /// Expected errors of `get_account`.
    GetAccountError { NoAccount }

    /// Expected errors of `create_file_at_path`.
    CreateFileAtPathError {
        FileAlreadyExists,
        NoAccount,
        NoRoot,
        PathContainsEmptyFile,
        PathDoesntStartWithRoot,
        DocumentTreatedAsFolder,
    }

    /// Expected errors of `write_document`.
    WriteToDocumentError {
        NoAccount,
        FileDoesNotExist,
        FolderTreatedAsDocument,
    }

    /// Expected errors of `create_file`.
    CreateFileError {
        NoAccount,
        DocumentTreatedAsFolder,
        CouldNotFindAParent,
        FileNameNotAvailable,
        FileNameContainsSlash,
        FileNameEmpty,
    }

    /// Expected errors of `get_root`.
    GetRootError { NoRoot }

    /// `get_children` has no expected errors.
    GetChildrenError {}

    /// Expected errors of a lookup by id.
    GetFileByIdError { NoFileWithThatId }

    /// Expected errors of `get_file_by_path`.
    GetFileByPathError { NoFileAtThatPath }

    /// Expected errors of `delete_file`.
    FileDeleteError { FileDoesNotExist, CannotDeleteRoot }

    /// Expected errors of `read_document`.
    ReadDocumentError {
        TreatedFolderAsDocument,
        NoAccount,
        FileDoesNotExist,
    }

    /// `list_paths` has no expected errors.
    ListPathsError {}

    /// Expected errors of `rename_file`.
    RenameFileError {
        FileDoesNotExist,
        NewNameContainsSlash,
        FileNameNotAvailable,
        NewNameEmpty,
        CannotRenameRoot,
    }

    /// `list_metadatas` has no expected errors.
    ListMetadatasError {}

    /// Expected errors of `move_file`.
    MoveFileError {
        NoAccount,
        FileDoesNotExist,
        DocumentTreatedAsFolder,
        TargetParentDoesNotExist,
        TargetParentHasChildNamedThat,
        CannotMoveRoot,
        FolderMovedIntoItself,
    }

    /// Expected errors of `calculate_work`.
    CalculateWorkError {
        NoAccount,
        CouldNotReachServer,
        ClientUpdateRequired,
    }

    /// Expected errors of `execute_work`. `BadAccount` means no usable
    /// local account was found for the work.
    ExecuteWorkError {
        CouldNotReachServer,
        ClientUpdateRequired,
        BadAccount,
    }

    /// Expected errors of `sync_all`.
    SyncAllError {
        NoAccount,
        CouldNotReachServer,
        ClientUpdateRequired,
    }

    /// `set_last_synced` has no expected errors.
    SetLastSyncedError {}

    /// `get_last_synced` has no expected errors.
    GetLastSyncedError {}

    /// Expected errors of `get_usage`.
    GetUsageError {
        NoAccount,
        CouldNotReachServer,
        ClientUpdateRequired,
    }

    /// `get_variants` has no expected errors.
    GetVariantsError {}
}
