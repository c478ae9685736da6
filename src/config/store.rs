//! Store configuration.

use std::path::PathBuf;

use config::ConfigError;
use serde::Deserialize;

/// Backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// JSON file per namespace.
    #[default]
    File,
    /// Process-local map, nothing persisted.
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Backend type.
    #[serde(default)]
    pub backend: StoreBackend,

    /// File backend configuration.
    #[serde(default)]
    pub file: FileStoreConfig,
}

impl StoreConfig {
    /// In-memory store configuration.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            ..Default::default()
        }
    }

    /// Validate the store configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file namespace cannot be used as a file name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.backend {
            StoreBackend::File => self.file.validate(),
            StoreBackend::Memory => Ok(()),
        }
    }
}

/// File backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FileStoreConfig {
    /// Directory holding the settings files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Namespace; the settings live in `{data_dir}/{namespace}.json`.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl FileStoreConfig {
    /// Path of the settings document.
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.namespace))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.is_empty() {
            return Err(ConfigError::Message(
                "store.file.namespace cannot be empty".to_string(),
            ));
        }

        let valid = self
            .namespace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid || self.namespace.starts_with('.') {
            return Err(ConfigError::Message(format!(
                "store.file.namespace '{}' is not a valid file name",
                self.namespace
            )));
        }

        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_namespace() -> String {
    "settings".to_string()
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            namespace: default_namespace(),
        }
    }
}
