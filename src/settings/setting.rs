//! Settings bound to a fixed key.

use std::sync::Arc;

use crate::domain::SettingValue;
use crate::error::PersistenceError;
use crate::settings::accessor::{Accessor, Lookup};
use crate::storage::StoreHandle;

/// Get/set access to one setting.
///
/// Host types hold [`Setting`] fields and forward their own getters and
/// setters through this trait.
///
/// ```
/// use std::sync::Arc;
///
/// use settings_store::config::StoreConfig;
/// use settings_store::settings::{Property, Setting};
/// use settings_store::storage::StoreHandle;
///
/// struct Appearance {
///     theme: Setting<String>,
///     font_size: Setting<u16>,
/// }
///
/// impl Appearance {
///     fn new(store: &Arc<StoreHandle>) -> Self {
///         Self {
///             theme: Setting::new(Arc::clone(store), "Theme", "Light".to_string()),
///             font_size: Setting::new(Arc::clone(store), "FontSize", 12),
///         }
///     }
///
///     fn theme(&self) -> String {
///         self.theme.get()
///     }
/// }
///
/// let store = Arc::new(StoreHandle::new(StoreConfig::memory()));
/// let appearance = Appearance::new(&store);
/// assert_eq!(appearance.theme(), "Light");
/// assert_eq!(appearance.font_size.get(), 12);
/// ```
pub trait Property<T> {
    /// Current value, or the default.
    fn get(&self) -> T;

    /// Persist a new value.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the value could not be persisted.
    fn set(&self, value: T) -> Result<(), PersistenceError>;
}

/// An [`Accessor`] bound to one key.
#[derive(Debug, Clone)]
pub struct Setting<T> {
    key: String,
    accessor: Accessor<T>,
}

impl<T: SettingValue> Setting<T> {
    /// Create a setting for `key` with a default.
    pub fn new(store: Arc<StoreHandle>, key: impl Into<String>, default: T) -> Self {
        Self::from_accessor(key, Accessor::new(store, default))
    }

    pub(crate) fn from_accessor(key: impl Into<String>, accessor: Accessor<T>) -> Self {
        Self {
            key: key.into(),
            accessor,
        }
    }

    /// Storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Default returned when nothing usable is stored.
    #[must_use]
    pub const fn default_value(&self) -> &T {
        self.accessor.default_value()
    }

    /// Read without applying the default.
    pub fn lookup(&self) -> Lookup<T> {
        self.accessor.lookup(&self.key)
    }
}

impl<T: SettingValue> Property<T> for Setting<T> {
    fn get(&self) -> T {
        self.accessor.get(&self.key)
    }

    fn set(&self, value: T) -> Result<(), PersistenceError> {
        self.accessor.set(&self.key, value)
    }
}
