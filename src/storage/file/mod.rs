//! File-based backend.
//!
//! Each namespace is one JSON document, kept in memory and rewritten on every
//! write. Suitable for desktop and single-node deployments.
//!
//! Directory structure:
//! ```text
//! data/
//! ├── {namespace}.json           live document
//! ├── {namespace}.json.lock      lock held while the document is read or replaced
//! ├── {namespace}.json.tmp       in-flight write (transient)
//! └── {namespace}.json.corrupt   last document that failed to parse
//! ```

mod document;

use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use crate::config::FileStoreConfig;
use crate::domain::Scalar;
use crate::error::{BackendError, BackendResult};
use crate::storage::traits::Backend;

pub use document::SettingsDocument;

/// File-based backend implementation.
///
/// Writes are durable when `write` returns, so `flush` has nothing to do.
pub struct FileBackend {
    /// Path of the live document.
    path: PathBuf,
    /// Committed document, mirroring the file. `None` while the file exists
    /// but could not be loaded; writes are refused until it loads.
    document: RwLock<Option<SettingsDocument>>,
    /// Serializes writers so each rewrite starts from the latest document.
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Open the backend for a namespace.
    ///
    /// Never fails. A missing document is an empty store. A document that
    /// cannot be parsed is moved aside to `{namespace}.json.corrupt` and the
    /// store starts empty. A document that cannot be read at all leaves the
    /// store degraded: reads see nothing, and writes retry the load and fail
    /// rather than overwrite settings that were never loaded.
    #[must_use]
    pub fn open(config: &FileStoreConfig) -> Self {
        Self::open_path(config.document_path())
    }

    /// Open the backend at an explicit document path.
    #[must_use]
    pub fn open_path(path: PathBuf) -> Self {
        let document = Self::load_document(&path);

        Self {
            path,
            document: RwLock::new(document),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the live document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the document failed to load.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.document.read().is_none()
    }

    fn load_document(path: &Path) -> Option<SettingsDocument> {
        match document::load(path) {
            Ok(Some(doc)) => {
                tracing::debug!(path = ?path, entries = doc.entries.len(), "Settings loaded");
                Some(doc)
            }
            Ok(None) => Some(SettingsDocument::default()),
            Err(BackendError::Serialization(e)) => {
                tracing::warn!(path = ?path, error = %e, "Settings file is corrupt, starting empty");
                match document::quarantine(path) {
                    Ok(moved) => {
                        tracing::warn!(path = ?moved, "Corrupt settings file preserved");
                        Some(SettingsDocument::default())
                    }
                    Err(e) => {
                        tracing::error!(path = ?path, error = %e, "Failed to move corrupt settings file");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::error!(path = ?path, error = %e, "Settings file unreadable, writes disabled");
                None
            }
        }
    }
}

impl Backend for FileBackend {
    fn read(&self, key: &str) -> Option<Scalar> {
        self.document
            .read()
            .as_ref()
            .and_then(|doc| doc.entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: Scalar) -> BackendResult<()> {
        if let Scalar::Float(v) = value
            && !v.is_finite()
        {
            return Err(BackendError::InvalidValue(format!(
                "non-finite float {v} cannot be stored in a JSON document"
            )));
        }

        let _guard = self.write_lock.lock();

        let current = self.document.read().clone();
        let mut next = match current {
            Some(doc) => doc,
            None => Self::load_document(&self.path).ok_or(BackendError::Unavailable)?,
        };
        next.insert(key, value);
        next.updated_at = chrono::Utc::now().timestamp_millis();

        document::persist(&self.path, &next)?;

        *self.document.write() = Some(next);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
