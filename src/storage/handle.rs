//! Lazily-initialized owner of a backend.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::config::StoreConfig;
use crate::storage::factory::create_backend;
use crate::storage::traits::DynBackend;

type BackendFactory = Box<dyn Fn() -> Arc<DynBackend> + Send + Sync>;

/// Shared handle to one backend.
///
/// The backend is built on the first call to [`StoreHandle::get`] and kept for
/// the lifetime of the handle. Concurrent first calls build it exactly once and
/// all of them observe the same instance.
///
/// Build one handle during application setup and share it as
/// `Arc<StoreHandle>` with every accessor.
pub struct StoreHandle {
    backend: OnceCell<Arc<DynBackend>>,
    factory: BackendFactory,
}

impl StoreHandle {
    /// Create a handle that builds its backend from configuration.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self::with_factory(move || create_backend(&config))
    }

    /// Create a handle with a custom backend constructor.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<DynBackend> + Send + Sync + 'static,
    {
        Self {
            backend: OnceCell::new(),
            factory: Box::new(factory),
        }
    }

    /// Create a handle around an existing backend.
    #[must_use]
    pub fn from_backend(backend: Arc<DynBackend>) -> Self {
        let handle = Self::with_factory({
            let backend = Arc::clone(&backend);
            move || Arc::clone(&backend)
        });
        let _ = handle.backend.set(backend);
        handle
    }

    /// Get the backend, building it on first use.
    pub fn get(&self) -> &Arc<DynBackend> {
        self.backend.get_or_init(|| (self.factory)())
    }

    /// Check whether the backend has been built.
    pub fn is_initialized(&self) -> bool {
        self.backend.get().is_some()
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field(
                "backend",
                &self.backend.get().map(|backend| backend.backend_name()),
            )
            .finish_non_exhaustive()
    }
}
