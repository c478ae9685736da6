//! Backend factory.
//!
//! Creates the appropriate backend based on configuration.

use std::sync::Arc;

use crate::config::{StoreBackend, StoreConfig};
use crate::storage::file::FileBackend;
use crate::storage::memory::MemoryBackend;
use crate::storage::traits::DynBackend;

/// Create a backend based on configuration.
///
/// Construction cannot fail; a file backend that cannot read its document
/// starts empty.
#[must_use]
pub fn create_backend(config: &StoreConfig) -> Arc<DynBackend> {
    let backend: Arc<DynBackend> = match config.backend {
        StoreBackend::File => Arc::new(FileBackend::open(&config.file)),
        StoreBackend::Memory => Arc::new(MemoryBackend::new()),
    };

    tracing::info!(backend = backend.backend_name(), "Settings backend initialized");

    backend
}
