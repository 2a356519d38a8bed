//! Payload records decoded from the `content` of successful responses.
//!
//! These are plain immutable values with no behavior of their own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ui_errors::known_tables;

/// Whether a file is a document or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    /// Holds content.
    Document,
    /// Holds other files.
    Folder,
}

impl FileType {
    /// The argument string `create_file` expects.
    pub fn as_arg(self) -> &'static str {
        match self {
            FileType::Document => "Document",
            FileType::Folder => "Folder",
        }
    }
}

/// Which paths `list_paths` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PathFilter {
    /// Every path.
    #[default]
    Unfiltered,
    /// Documents only.
    DocumentsOnly,
    /// Folders only.
    FoldersOnly,
    /// Files with no children.
    LeafNodesOnly,
}

impl PathFilter {
    /// The argument string `list_paths` expects.
    pub fn as_arg(self) -> &'static str {
        match self {
            PathFilter::Unfiltered => "Unfiltered",
            PathFilter::DocumentsOnly => "DocumentsOnly",
            PathFilter::FoldersOnly => "FoldersOnly",
            PathFilter::LeafNodesOnly => "LeafNodesOnly",
        }
    }
}

/// Decrypted file metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// File identifier.
    pub id: Uuid,
    /// Parent folder. The root is its own parent.
    pub parent: Uuid,
    /// File name.
    pub name: String,
    /// Document or folder.
    pub file_type: FileType,
    /// Last modification, milliseconds since the epoch.
    pub last_modified: u64,
    /// Username of the last modifier.
    pub last_modified_by: String,
}

impl File {
    /// True for the root folder.
    pub fn is_root(&self) -> bool {
        self.id == self.parent
    }

    /// True for folders.
    pub fn is_folder(&self) -> bool {
        self.file_type == FileType::Folder
    }
}

/// The local account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account username.
    pub username: String,
    /// Server the account lives on.
    pub api_url: String,
}

/// One pending unit of sync work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkUnit {
    /// A local change waiting to be pushed.
    LocalChange {
        /// The changed file.
        metadata: File,
    },
    /// A server change waiting to be pulled.
    ServerChange {
        /// The changed file.
        metadata: File,
    },
}

impl WorkUnit {
    /// The file this unit concerns.
    pub fn file(&self) -> &File {
        match self {
            WorkUnit::LocalChange { metadata } | WorkUnit::ServerChange { metadata } => metadata,
        }
    }
}

/// Result of `calculate_work`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalculated {
    /// Pending work.
    pub work_units: Vec<WorkUnit>,
    /// Timestamp of the newest server update seen.
    pub most_recent_update_from_server: u64,
}

/// A byte count with its human-friendly rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageItemMetric {
    /// Exact byte count.
    pub exact: u64,
    /// Rendering such as `"1.2 MB"`.
    pub readable: String,
}

/// Server usage of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUsage {
    /// File identifier.
    pub file_id: Uuid,
    /// Bytes stored on the server.
    pub size_bytes: u64,
}

/// Result of `get_usage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetrics {
    /// Per-file usage.
    pub usages: Vec<FileUsage>,
    /// Total server usage.
    pub server_usage: UsageItemMetric,
    /// The account's data cap.
    pub data_cap: UsageItemMetric,
}

impl UsageMetrics {
    /// True when usage has reached the data cap.
    pub fn is_over_cap(&self) -> bool {
        self.server_usage.exact >= self.data_cap.exact
    }
}

/// State of the local database, from `get_db_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DbState {
    /// Usable as is.
    ReadyToUse,
    /// No database yet.
    Empty,
    /// Needs `migrate_db` first.
    MigrationRequired,
    /// Unrecoverable; local state must be cleared.
    StateRequiresClearing,
}

/// The core's catalogue of expected-error variants, from `get_variants`.
///
/// Shaped as `{ "ErrorName": ["Variant", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorVariants(pub BTreeMap<String, Vec<String>>);

/// Disagreement between the core's catalogue and one local table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDrift {
    /// Error enum name.
    pub type_name: String,
    /// Names the core emits that the local table lacks.
    pub unknown_locally: Vec<String>,
    /// Names the local table has that the core no longer emits.
    pub unknown_to_core: Vec<String>,
}

impl ErrorVariants {
    /// Compare the catalogue against the local tables.
    ///
    /// Only error enums present on both sides are compared. An empty result
    /// means every shared table agrees.
    pub fn drift(&self) -> Vec<VariantDrift> {
        let mut drift = Vec::new();
        for (type_name, local) in known_tables() {
            let Some(remote) = self.0.get(type_name) else {
                continue;
            };
            let unknown_locally: Vec<String> = remote
                .iter()
                .filter(|name| !local.contains(&name.as_str()))
                .cloned()
                .collect();
            let unknown_to_core: Vec<String> = local
                .iter()
                .filter(|name| !remote.iter().any(|r| r == *name))
                .map(|name| name.to_string())
                .collect();
            if !unknown_locally.is_empty() || !unknown_to_core.is_empty() {
                drift.push(VariantDrift {
                    type_name: type_name.to_string(),
                    unknown_locally,
                    unknown_to_core,
                });
            }
        }
        drift
    }
}
