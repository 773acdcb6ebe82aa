use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A durable string slot per key
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`. A single write is all-or-nothing.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` entirely; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Store under the platform data directory, e.g. `~/.local/share/quick-translate`
    pub fn in_data_dir() -> Result<Self, StorageError> {
        let dir = app_data_dir().ok_or_else(|| StorageError::Io {
            path: PathBuf::from("<data dir>"),
            source: io::Error::new(io::ErrorKind::NotFound, "no data directory"),
        })?;
        Self::open(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!(".{key}.json.tmp"));

        // Write-then-rename so readers never see a half-written slot
        fs::write(&tmp_path, value).map_err(|source| StorageError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &path).map_err(|source| StorageError::Io { path, source })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

/// Process-local store, used when no data directory is available
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

/// Application data directory (`$XDG_DATA_HOME/quick-translate` on Linux)
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("quick-translate"))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Storage whose writes always fail
    pub struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                path: key.into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.set(key, "")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(temp.path().join("nested")).unwrap();

        assert_eq!(store.get("qt-history").unwrap(), None);

        store.set("qt-history", "[1,2,3]").unwrap();
        assert_eq!(store.get("qt-history").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(store.dir().join("qt-history.json").exists());

        store.set("qt-history", "[]").unwrap();
        assert_eq!(store.get("qt-history").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_remove_deletes_file() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(temp.path()).unwrap();

        store.set("qt-history", "[]").unwrap();
        store.remove("qt-history").unwrap();

        assert_eq!(store.get("qt-history").unwrap(), None);
        assert!(!temp.path().join("qt-history.json").exists());
    }

    #[test]
    fn test_file_store_remove_missing_key_is_ok() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(temp.path()).unwrap();
        assert!(store.remove("never-written").is_ok());
    }

    #[test]
    fn test_file_store_leaves_no_temp_file() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(temp.path()).unwrap();
        store.set("qt-history", "[]").unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["qt-history.json".to_string()]);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
