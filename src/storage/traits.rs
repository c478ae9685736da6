//! Backend trait definition.
//!
//! This trait is the whole contract between the settings accessors and a
//! physical medium. Backends store [`Scalar`] values by string key and know
//! nothing about the Rust types layered on top.

use crate::domain::Scalar;
use crate::error::BackendResult;

/// Key-value medium for settings.
///
/// Writes that fail, in `write` or in the following `flush`, must not become
/// visible to later reads.
pub trait Backend: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `None` when the key is missing or the value cannot be read;
    /// callers cannot tell the two apart.
    fn read(&self, key: &str) -> Option<Scalar>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: Scalar) -> BackendResult<()>;

    /// Commit pending writes to durable storage.
    ///
    /// Backends whose `write` is already durable return `Ok(())`. A failed
    /// flush discards the writes staged since the last successful one.
    fn flush(&self) -> BackendResult<()> {
        Ok(())
    }

    /// Get the backend name.
    fn backend_name(&self) -> &'static str;
}

/// Trait object alias for Backend.
pub type DynBackend = dyn Backend;
