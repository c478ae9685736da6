//! In-memory backend.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::Scalar;
use crate::error::BackendResult;
use crate::storage::traits::Backend;

/// Process-local backend. Nothing survives the process.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, Scalar>>,
}

impl MemoryBackend {
    /// Create an empty memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Backend for MemoryBackend {
    fn read(&self, key: &str) -> Option<Scalar> {
        self.entries.read().get(key).cloned()
    }

    fn write(&self, key: &str, value: Scalar) -> BackendResult<()> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        let backend = MemoryBackend::new();
        assert!(backend.is_empty());
        assert_eq!(backend.read("Theme"), None);

        backend
            .write("Theme", Scalar::Text("Dark".to_string()))
            .unwrap();
        assert_eq!(backend.read("Theme"), Some(Scalar::Text("Dark".to_string())));

        // Overwrite replaces, including the kind
        backend.write("Theme", Scalar::Int(2)).unwrap();
        assert_eq!(backend.read("Theme"), Some(Scalar::Int(2)));
        assert_eq!(backend.len(), 1);

        assert!(backend.flush().is_ok());
        assert_eq!(backend.backend_name(), "memory");
    }
}
