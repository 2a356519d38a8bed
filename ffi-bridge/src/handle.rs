//! CoreHandle - one typed async method per core operation.
//!
//! Every method marshals its arguments, runs the entry point through the
//! [`CallAdapter`], and decodes the response with that operation's payload
//! type and error table. Expected and unexpected failures are returned
//! exactly as decoded.

use std::path::Path;
use std::sync::Arc;

use lb_ffi_types::operation::{self as op, Operation};
use lb_ffi_types::ui_errors::GetFileByIdError;
use lb_ffi_types::{decode, FfiError, File, FileType, OpResult, PathFilter, WireCompat, WorkUnit};
use tracing::warn;
use uuid::Uuid;

use crate::adapter::{Arg, CallAdapter, CoreLock};
use crate::config::{BridgeConfig, FfiConfig};
use crate::error::BridgeError;
use crate::native::NativeCore;
use crate::types::Session;

/// Typed facade over one native core.
pub struct CoreHandle<C: NativeCore> {
    adapter: CallAdapter<C>,
    compat: WireCompat,
}

impl<C: NativeCore> Clone for CoreHandle<C> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
            compat: self.compat,
        }
    }
}

impl<C: NativeCore> CoreHandle<C> {
    /// Create a handle over `core`, serialized by `lock`.
    pub fn new(core: Arc<C>, lock: CoreLock, ffi: &FfiConfig) -> Self {
        Self {
            adapter: CallAdapter::new(core, lock, ffi.line_endings),
            compat: ffi.wire_compat,
        }
    }

    /// Load a TOML config and build a handle with its session.
    ///
    /// Installs no log subscriber; embedding applications that want the
    /// bridge's events call [`logging::init_from_config`](crate::logging::init_from_config)
    /// themselves.
    pub fn from_config_file(
        core: Arc<C>,
        lock: CoreLock,
        path: &Path,
    ) -> Result<(Self, Session), BridgeError> {
        let config = BridgeConfig::from_file(path)?;
        let session = Session::new(&config.core)?;
        Ok((Self::new(core, lock, &config.ffi), session))
    }

    /// The lock this handle serializes on.
    pub fn lock(&self) -> &CoreLock {
        self.adapter.lock()
    }

    /// Install the core's own file logger under the session's writeable path.
    pub async fn init_logger(&self, session: &Session) -> OpResult<op::InitLogger> {
        self.adapter
            .call_void(op::InitLogger::ENTRY, vec![session.as_str().into()])
            .await
            .map_err(|e| bridge_failure(op::InitLogger::ENTRY, e))
    }

    /// Report whether the local database is usable.
    pub async fn get_db_state(&self, session: &Session) -> OpResult<op::GetDbState> {
        self.run::<op::GetDbState>(Some(session), vec![]).await
    }

    /// Migrate the local database to the current schema.
    pub async fn migrate_db(&self, session: &Session) -> OpResult<op::MigrateDb> {
        self.run::<op::MigrateDb>(Some(session), vec![]).await
    }

    /// Register `username` on the server at `api_url`.
    pub async fn create_account(
        &self,
        session: &Session,
        username: &str,
        api_url: &str,
    ) -> OpResult<op::CreateAccount> {
        self.run::<op::CreateAccount>(Some(session), vec![username.into(), api_url.into()])
            .await
    }

    /// Import an account from an exported account string.
    pub async fn import_account(
        &self,
        session: &Session,
        account_string: &str,
    ) -> OpResult<op::ImportAccount> {
        self.run::<op::ImportAccount>(Some(session), vec![account_string.into()])
            .await
    }

    /// Export the local account as a string.
    pub async fn export_account(&self, session: &Session) -> OpResult<op::ExportAccount> {
        self.run::<op::ExportAccount>(Some(session), vec![]).await
    }

    /// Read the local account.
    pub async fn get_account(&self, session: &Session) -> OpResult<op::GetAccount> {
        self.run::<op::GetAccount>(Some(session), vec![]).await
    }

    /// Create a document or folder named `name` under `parent`.
    pub async fn create_file(
        &self,
        session: &Session,
        name: &str,
        parent: Uuid,
        file_type: FileType,
    ) -> OpResult<op::CreateFile> {
        self.run::<op::CreateFile>(
            Some(session),
            vec![
                name.into(),
                parent.to_string().into(),
                file_type.as_arg().into(),
            ],
        )
        .await
    }

    /// Create a file at `path`, creating missing folders. A trailing `/`
    /// makes a folder.
    pub async fn create_file_at_path(
        &self,
        session: &Session,
        path: &str,
    ) -> OpResult<op::CreateFileAtPath> {
        self.run::<op::CreateFileAtPath>(Some(session), vec![path.into()])
            .await
    }

    /// Overwrite a document's content.
    pub async fn write_document(
        &self,
        session: &Session,
        id: Uuid,
        content: &str,
    ) -> OpResult<op::WriteDocument> {
        self.run::<op::WriteDocument>(Some(session), vec![id.to_string().into(), content.into()])
            .await
    }

    /// Read a document's content.
    pub async fn read_document(&self, session: &Session, id: Uuid) -> OpResult<op::ReadDocument> {
        let text = self
            .run::<op::ReadDocument>(Some(session), vec![id.to_string().into()])
            .await?;
        Ok(self.adapter.line_endings().outbound(text))
    }

    /// Rename a file.
    pub async fn rename_file(
        &self,
        session: &Session,
        id: Uuid,
        new_name: &str,
    ) -> OpResult<op::RenameFile> {
        self.run::<op::RenameFile>(Some(session), vec![id.to_string().into(), new_name.into()])
            .await
    }

    /// Move a file under `new_parent`.
    pub async fn move_file(
        &self,
        session: &Session,
        id: Uuid,
        new_parent: Uuid,
    ) -> OpResult<op::MoveFile> {
        self.run::<op::MoveFile>(
            Some(session),
            vec![id.to_string().into(), new_parent.to_string().into()],
        )
        .await
    }

    /// Delete a file.
    pub async fn delete_file(&self, session: &Session, id: Uuid) -> OpResult<op::DeleteFile> {
        self.run::<op::DeleteFile>(Some(session), vec![id.to_string().into()])
            .await
    }

    /// Fetch the root folder.
    pub async fn get_root(&self, session: &Session) -> OpResult<op::GetRoot> {
        self.run::<op::GetRoot>(Some(session), vec![]).await
    }

    /// List the direct children of a folder.
    pub async fn get_children(&self, session: &Session, id: Uuid) -> OpResult<op::GetChildren> {
        self.run::<op::GetChildren>(Some(session), vec![id.to_string().into()])
            .await
    }

    /// Fetch a file by id.
    ///
    /// The core exports no lookup by id, so this scans `list_metadatas`.
    pub async fn get_file_by_id(
        &self,
        session: &Session,
        id: Uuid,
    ) -> Result<File, FfiError<GetFileByIdError>> {
        let files = self.list_metadatas(session).await.map_err(|e| match e {
            FfiError::UiError(none) => match none {},
            FfiError::Unexpected(msg) => FfiError::Unexpected(msg),
        })?;
        files
            .into_iter()
            .find(|file| file.id == id)
            .ok_or(FfiError::UiError(GetFileByIdError::NoFileWithThatId))
    }

    /// Fetch a file by path.
    pub async fn get_file_by_path(
        &self,
        session: &Session,
        path: &str,
    ) -> OpResult<op::GetFileByPath> {
        self.run::<op::GetFileByPath>(Some(session), vec![path.into()])
            .await
    }

    /// List every file's metadata.
    pub async fn list_metadatas(&self, session: &Session) -> OpResult<op::ListMetadatas> {
        self.run::<op::ListMetadatas>(Some(session), vec![]).await
    }

    /// List paths matching `filter`.
    pub async fn list_paths(
        &self,
        session: &Session,
        filter: PathFilter,
    ) -> OpResult<op::ListPaths> {
        self.run::<op::ListPaths>(Some(session), vec![filter.as_arg().into()])
            .await
    }

    /// Push local changes and pull remote ones.
    pub async fn sync_all(&self, session: &Session) -> OpResult<op::SyncAll> {
        self.run::<op::SyncAll>(Some(session), vec![]).await
    }

    /// Compute pending sync work without performing it.
    pub async fn calculate_work(&self, session: &Session) -> OpResult<op::CalculateWork> {
        self.run::<op::CalculateWork>(Some(session), vec![]).await
    }

    /// Perform one unit of sync work.
    pub async fn execute_work(
        &self,
        session: &Session,
        work: &WorkUnit,
    ) -> OpResult<op::ExecuteWork> {
        let work = serde_json::to_string(work).map_err(|e| {
            bridge_failure(
                op::ExecuteWork::ENTRY,
                BridgeError::Unmarshalable(e.to_string()),
            )
        })?;
        self.run::<op::ExecuteWork>(Some(session), vec![work.into()])
            .await
    }

    /// Record the last successful sync, in milliseconds since the epoch.
    pub async fn set_last_synced(
        &self,
        session: &Session,
        millis: u64,
    ) -> OpResult<op::SetLastSynced> {
        self.run::<op::SetLastSynced>(Some(session), vec![millis.into()])
            .await
    }

    /// Read the last successful sync time.
    pub async fn get_last_synced(&self, session: &Session) -> OpResult<op::GetLastSynced> {
        self.run::<op::GetLastSynced>(Some(session), vec![]).await
    }

    /// Read server usage.
    pub async fn get_usage(&self, session: &Session) -> OpResult<op::GetUsage> {
        self.run::<op::GetUsage>(Some(session), vec![]).await
    }

    /// Read the core's catalogue of expected-error names.
    ///
    /// Compare it against this build with
    /// [`ErrorVariants::drift`](lb_ffi_types::ErrorVariants::drift).
    pub async fn get_variants(&self) -> OpResult<op::GetVariants> {
        self.run::<op::GetVariants>(None, vec![]).await
    }

    async fn run<O: Operation>(&self, session: Option<&Session>, args: Vec<Arg>) -> OpResult<O> {
        let mut full = Vec::with_capacity(args.len() + 1);
        if let Some(session) = session {
            full.push(Arg::Str(session.as_str().to_string()));
        }
        full.extend(args);

        let raw = self
            .adapter
            .call_json(O::ENTRY, full)
            .await
            .map_err(|e| bridge_failure(O::ENTRY, e))?;
        decode::<O>(&raw, self.compat)
    }
}

#[cfg(feature = "link-core")]
impl CoreHandle<crate::native::LinkedCore> {
    /// Handle over the linked `lockbook_core` library.
    pub fn linked(lock: CoreLock, ffi: &FfiConfig) -> Self {
        Self::new(Arc::new(crate::native::LinkedCore::new()), lock, ffi)
    }
}

impl<C: NativeCore> std::fmt::Debug for CoreHandle<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreHandle")
            .field("compat", &self.compat)
            .field("line_endings", &self.adapter.line_endings())
            .finish_non_exhaustive()
    }
}

fn bridge_failure<E>(entry: lb_ffi_types::EntryPoint, err: BridgeError) -> FfiError<E> {
    warn!(entry = %entry, error = %err, "native call failed before decoding");
    err.into()
}

