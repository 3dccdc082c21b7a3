//! Local durable cache
//!
//! Keeps the cart and the signed-in session between runs in a single JSON
//! document. A missing or unreadable document is never fatal: loading falls
//! back to an empty cart and no session.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use storefront::{carts::Cart, sessions::UserSession};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while saving the cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing the cache file failed.
    #[error("cache file error at {path}: {source}")]
    Io {
        /// Cache file location
        path: PathBuf,

        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The state could not be encoded.
    #[error("failed to encode cache state")]
    Encode(#[from] serde_json::Error),
}

/// Everything persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Cart contents
    #[serde(default)]
    pub cart: Option<Cart>,

    /// Signed-in user
    #[serde(default)]
    pub session: Option<UserSession>,
}

/// JSON file backed store for [`PersistedState`].
#[derive(Debug, Clone)]
pub struct LocalCache {
    path: PathBuf,
}

impl LocalCache {
    /// Cache stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load persisted state, falling back to defaults when the file is absent
    /// or corrupt.
    #[tracing::instrument(name = "cache.load", skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> PersistedState {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("no cached state, starting empty");

                return PersistedState::default();
            }
            Err(error) => {
                warn!(error = %error, "failed to read cached state, starting empty");

                return PersistedState::default();
            }
        };

        match serde_json::from_slice(&contents) {
            Ok(state) => state,
            Err(error) => {
                warn!(error = %error, "cached state is corrupt, starting empty");

                PersistedState::default()
            }
        }
    }

    /// Persist `state`, replacing the previous document atomically.
    ///
    /// # Errors
    ///
    /// Returns an error when the state cannot be encoded or written.
    #[tracing::instrument(name = "cache.save", skip(self, state), fields(path = %self.path.display()), err)]
    pub async fn save(&self, state: &PersistedState) -> Result<(), CacheError> {
        let contents = serde_json::to_vec_pretty(state)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        let staging = self.staging_path();

        tokio::fs::write(&staging, &contents)
            .await
            .map_err(|source| self.io_error(source))?;

        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        debug!(bytes = contents.len(), "saved cached state");

        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_default();
        name.push(".tmp");

        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
