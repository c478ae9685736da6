//! Typed accessor over a store handle.

use std::sync::Arc;

use crate::domain::{ScalarKind, SettingValue};
use crate::error::PersistenceError;
use crate::settings::setting::Setting;
use crate::storage::StoreHandle;

/// Outcome of reading a setting, before any default is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// A usable value is stored.
    Stored(T),
    /// Nothing stored, or the backend could not read it.
    Absent,
    /// A value is stored but does not convert to the requested type.
    ///
    /// `expected` and `found` may be equal when the kind matches but the
    /// value is out of range (e.g. `300` read as `u8`).
    Mismatch {
        /// Kind the accessor reads.
        expected: ScalarKind,
        /// Kind of the value found in the backend.
        found: ScalarKind,
    },
}

impl<T> Lookup<T> {
    /// Return the stored value, or `default` for any other outcome.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Stored(value) => value,
            Self::Absent | Self::Mismatch { .. } => default,
        }
    }

    /// Convert into an `Option`, discarding why a value is missing.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Stored(value) => Some(value),
            Self::Absent | Self::Mismatch { .. } => None,
        }
    }

    /// Check if a usable value is stored.
    pub const fn is_stored(&self) -> bool {
        matches!(self, Self::Stored(_))
    }
}

/// Get/set surface for settings of type `T`, with a fallback default.
///
/// The setting name is the storage key. Reads never fail: a missing entry,
/// an entry of another type, or an unreadable backend all yield the default.
/// Writes go straight through to the backend and are flushed before `set`
/// returns.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use settings_store::config::StoreConfig;
/// use settings_store::settings::Accessor;
/// use settings_store::storage::StoreHandle;
///
/// let store = Arc::new(StoreHandle::new(StoreConfig::memory()));
/// let theme = Accessor::new(Arc::clone(&store), "Light".to_string());
///
/// assert_eq!(theme.get("Theme"), "Light");
/// theme.set("Theme", "Dark".to_string()).unwrap();
/// assert_eq!(theme.get("Theme"), "Dark");
/// ```
#[derive(Debug, Clone)]
pub struct Accessor<T> {
    store: Arc<StoreHandle>,
    default: T,
}

impl<T: SettingValue> Accessor<T> {
    /// Create an accessor. Does not touch the backend.
    #[must_use]
    pub const fn new(store: Arc<StoreHandle>, default: T) -> Self {
        Self { store, default }
    }

    /// Get the configured default.
    #[must_use]
    pub const fn default_value(&self) -> &T {
        &self.default
    }

    /// Read `name` without applying the default.
    pub fn lookup(&self, name: &str) -> Lookup<T> {
        let Some(scalar) = self.store.get().read(name) else {
            return Lookup::Absent;
        };

        let found = scalar.kind();
        T::from_scalar(scalar).map_or(
            Lookup::Mismatch {
                expected: T::KIND,
                found,
            },
            Lookup::Stored,
        )
    }

    /// Read `name`, falling back to the default.
    pub fn get(&self, name: &str) -> T {
        match self.lookup(name) {
            Lookup::Stored(value) => value,
            Lookup::Absent => {
                tracing::debug!(key = %name, "Setting absent, using default");
                self.default.clone()
            }
            Lookup::Mismatch { expected, found } => {
                tracing::debug!(
                    key = %name,
                    expected = %expected,
                    found = %found,
                    "Stored setting does not match, using default"
                );
                self.default.clone()
            }
        }
    }

    /// Write `value` under `name` and flush it.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] carrying `name` if the backend write or
    /// flush fails. The value is then not visible to later reads.
    pub fn set(&self, name: &str, value: T) -> Result<(), PersistenceError> {
        let backend = self.store.get();

        backend
            .write(name, value.into_scalar())
            .and_then(|()| backend.flush())
            .map_err(|cause| {
                tracing::error!(
                    key = %name,
                    backend = backend.backend_name(),
                    error = %cause,
                    "Failed to persist setting"
                );
                PersistenceError::new(name, cause)
            })
    }

    /// Bind this accessor to a single key.
    pub fn bind(self, key: impl Into<String>) -> Setting<T> {
        Setting::from_accessor(key, self)
    }
}
