//! Session - the value every core call is made against.

use std::path::{Path, PathBuf};

use crate::config::CoreConfig;
use crate::error::BridgeError;

/// One logical core session.
///
/// The core opens its state under the writeable path on every call, so the
/// session is that path as a UTF-8 string, passed verbatim as the first
/// argument of every entry point that takes one. Built once by the embedding
/// application and borrowed by every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    path: String,
    writeable_path: PathBuf,
    api_url: String,
}

impl Session {
    /// Build a session from core settings.
    ///
    /// Fails if the writeable path is not valid UTF-8.
    pub fn new(config: &CoreConfig) -> Result<Self, BridgeError> {
        let path = config.writeable_path.to_str().ok_or_else(|| {
            BridgeError::Unmarshalable(format!(
                "writeable path is not valid UTF-8: {}",
                config.writeable_path.display()
            ))
        })?;

        Ok(Self {
            path: path.to_string(),
            writeable_path: config.writeable_path.clone(),
            api_url: config.api_url.clone(),
        })
    }

    /// The writeable path as passed to the core.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Where the core keeps its state.
    pub fn writeable_path(&self) -> &Path {
        &self.writeable_path
    }

    /// Server new accounts are created on.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}
