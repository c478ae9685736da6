//! On-disk settings document.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::Scalar;
use crate::error::{BackendError, BackendResult};

/// Everything persisted for one namespace.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SettingsDocument {
    /// Last write time, milliseconds since the Unix epoch.
    pub updated_at: i64,
    /// Settings by key.
    pub entries: BTreeMap<String, Scalar>,
    /// Entries that do not decode as a [`Scalar`], kept verbatim so rewrites preserve them.
    pub undecoded: BTreeMap<String, serde_json::Value>,
}

impl SettingsDocument {
    /// Store `value` under `key`, superseding any undecodable entry of that name.
    pub fn insert(&mut self, key: &str, value: Scalar) {
        self.undecoded.remove(key);
        self.entries.insert(key.to_string(), value);
    }
}

/// Wire form of [`SettingsDocument`]; entries stay loose so one bad entry does not discard the rest.
#[derive(Serialize, Deserialize)]
struct RawDocument {
    #[serde(default)]
    updated_at: i64,
    #[serde(default)]
    entries: BTreeMap<String, serde_json::Value>,
}

/// Load a document under a shared lock.
///
/// Returns `Ok(None)` if the file does not exist. Entries that are not a
/// valid [`Scalar`] end up in [`SettingsDocument::undecoded`].
pub fn load(path: &Path) -> BackendResult<Option<SettingsDocument>> {
    if !path.exists() {
        return Ok(None);
    }

    let lock = lock_file(path)?;
    lock.lock_shared()
        .map_err(|e| BackendError::LockFailed(e.to_string()))?;

    let file = File::open(path)?;
    let raw: RawDocument = serde_json::from_reader(&file).map_err(|e| {
        if e.is_io() {
            BackendError::FileIO(e.to_string())
        } else {
            BackendError::from(e)
        }
    })?;
    lock.unlock()
        .map_err(|e| BackendError::LockFailed(e.to_string()))?;

    let mut document = SettingsDocument {
        updated_at: raw.updated_at,
        ..Default::default()
    };
    for (key, value) in raw.entries {
        match Scalar::deserialize(&value) {
            Ok(scalar) => {
                document.entries.insert(key, scalar);
            }
            Err(e) => {
                tracing::warn!(path = ?path, key = %key, error = %e, "Keeping undecodable setting entry as is");
                document.undecoded.insert(key, value);
            }
        }
    }

    Ok(Some(document))
}

/// Replace the document at `path`.
///
/// Runs under an exclusive lock on `{path}.lock`. The content goes to a
/// sibling temporary file first, is synced, and is then renamed over `path`,
/// so readers see either the old or the new document.
pub fn persist(path: &Path, document: &SettingsDocument) -> BackendResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut entries = document.undecoded.clone();
    for (key, scalar) in &document.entries {
        entries.insert(key.clone(), serde_json::to_value(scalar)?);
    }
    let raw = RawDocument {
        updated_at: document.updated_at,
        entries,
    };

    let lock = lock_file(path)?;
    lock.lock_exclusive()
        .map_err(|e| BackendError::LockFailed(e.to_string()))?;

    let tmp_path = sibling(path, "tmp");
    let result = write_synced(&tmp_path, &raw)
        .and_then(|()| std::fs::rename(&tmp_path, path).map_err(BackendError::from));

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }

    lock.unlock()
        .map_err(|e| BackendError::LockFailed(e.to_string()))?;

    result
}

/// Move an unreadable document out of the way, returning its new path.
pub fn quarantine(path: &Path) -> BackendResult<PathBuf> {
    let target = sibling(path, "corrupt");
    std::fs::rename(path, &target)?;
    Ok(target)
}

/// Open the namespace lock file, creating it if needed.
fn lock_file(path: &Path) -> BackendResult<File> {
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(sibling(path, "lock"))?;
    Ok(file)
}

fn write_synced(path: &Path, raw: &RawDocument) -> BackendResult<()> {
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    serde_json::to_writer_pretty(&file, raw)?;
    file.sync_all()?;

    Ok(())
}

/// `settings.json` -> `settings.json.{suffix}`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(load(&temp.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn test_persist_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/settings.json");

        let mut document = SettingsDocument {
            updated_at: 42,
            ..Default::default()
        };
        document.insert("Theme", Scalar::Text("Dark".to_string()));
        document.insert("Volume", Scalar::Int(7));

        persist(&path, &document).unwrap();
        assert!(!sibling(&path, "tmp").exists());

        let loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded, document);
    }

    #[test]
    fn test_undecodable_entries_survive_rewrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{
                "entries": {
                    "Theme": { "type": "text", "value": "Dark" },
                    "Accent": { "type": "colour", "value": "red" },
                    "Untagged": 5
                }
            }"#,
        )
        .unwrap();

        let mut loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.undecoded.len(), 2);

        loaded.insert("Volume", Scalar::Int(5));
        persist(&path, &loaded).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            raw["entries"]["Accent"],
            serde_json::json!({ "type": "colour", "value": "red" })
        );
        assert_eq!(raw["entries"]["Untagged"], serde_json::json!(5));
        assert_eq!(
            raw["entries"]["Volume"],
            serde_json::json!({ "type": "int", "value": 5 })
        );
    }

    #[test]
    fn test_insert_supersedes_undecoded_entry() {
        let mut document = SettingsDocument::default();
        document
            .undecoded
            .insert("Accent".to_string(), serde_json::json!(5));

        document.insert("Accent", Scalar::Text("red".to_string()));
        assert!(document.undecoded.is_empty());
        assert_eq!(
            document.entries.get("Accent"),
            Some(&Scalar::Text("red".to_string()))
        );
    }

    #[test]
    fn test_unparsable_document_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load(&path), Err(BackendError::Serialization(_))));

        let moved = quarantine(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(moved, temp.path().join("settings.json.corrupt"));
        assert_eq!(std::fs::read_to_string(moved).unwrap(), "{ not json");
    }

    #[test]
    fn test_unreadable_document_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(load(&path), Err(BackendError::FileIO(_))));
    }

    #[test]
    fn test_persist_waits_for_lock() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");

        let held = lock_file(&path).unwrap();
        held.lock_exclusive().unwrap();

        let (tx, rx) = mpsc::channel();
        let writer_path = path.clone();
        let writer = std::thread::spawn(move || {
            let result = persist(&writer_path, &SettingsDocument::default());
            tx.send(()).unwrap();
            result
        });

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        assert!(!path.exists());

        held.unlock().unwrap();
        writer.join().unwrap().unwrap();
        assert!(path.exists());
    }
}
