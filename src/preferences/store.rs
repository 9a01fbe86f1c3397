//! Key-value backends for user preferences.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use thiserror::Error;

use crate::cache::lock::{mutex_lock, rw_read, rw_write};

const SOURCE: &str = "preferences::store";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preference file {path} is not valid TOML: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("no shell action is registered as `{0}`")]
    UnknownAction(String),
}

/// String values persisted under string keys.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(rw_read(&self.values, SOURCE, "memory.get").get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        rw_write(&self.values, SOURCE, "memory.set").insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat TOML table on disk.
///
/// A missing file reads as empty; it is created on the first `set`.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(PreferenceError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        toml::from_str(&text).map_err(|source| PreferenceError::Decode {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_table()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let _guard = mutex_lock(&self.write_lock, SOURCE, "file.set");
        let mut table = self.read_table()?;
        table.insert(key.to_string(), value.to_string());

        let text = toml::to_string(&table)?;
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, text).map_err(|source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryPreferenceStore::default();
        assert_eq!(store.get("app-language").expect("get"), None);

        store.set("app-language", "dk").expect("set");
        assert_eq!(
            store.get("app-language").expect("get"),
            Some("dk".to_string())
        );
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("prefs.toml");

        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.get("app-theme").expect("missing file reads empty"), None);
        store.set("app-theme", "ocean").expect("set theme");
        store.set("app-language", "de").expect("set language");

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(
            reopened.get("app-theme").expect("get"),
            Some("ocean".to_string())
        );
        assert_eq!(
            reopened.get("app-language").expect("get"),
            Some("de".to_string())
        );
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "this is = = not toml").expect("write");

        let store = FilePreferenceStore::new(&path);
        let err = store.get("app-theme").expect_err("decode failure");
        assert!(matches!(err, PreferenceError::Decode { .. }));
    }
}
