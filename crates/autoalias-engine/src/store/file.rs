use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StoreError};

/// Stores each key as `<key>.json` in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    ///
    /// Keys are restricted to ASCII letters, digits, `-`, `_` and `.` and may
    /// not start with `.`, so a key can never name a path outside `root`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path).map(Some).map_err(io_error(&path))
    }

    /// Writes through a temp file and rename so readers never see a partial blob.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;

        let temp_path = path.with_extension("json.tmp");
        {
            let mut file = File::create(&temp_path).map_err(io_error(&temp_path))?;
            file.write_all(value.as_bytes())
                .map_err(io_error(&temp_path))?;
            file.sync_all().map_err(io_error(&temp_path))?;
        }

        fs::rename(&temp_path, &path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            StoreError::Io {
                path: path.clone(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("roam-autoalias_dictionary").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("nested/store"));

        store.set("dict", r#"{"cat":"Animals"}"#).unwrap();

        assert!(dir.path().join("nested/store/dict.json").exists());
        assert!(!dir.path().join("nested/store/dict.json.tmp").exists());
        assert_eq!(
            store.get("dict").unwrap().as_deref(),
            Some(r#"{"cat":"Animals"}"#)
        );
    }

    #[test]
    fn set_replaces_previous_value() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("dict", "old").unwrap();
        store.set("dict", "new").unwrap();
        assert_eq!(store.get("dict").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn rejects_keys_that_escape_root() {
        let store = FileStore::new("/tmp/store");
        for key in ["", "../evil", ".hidden", "a/b", "a b"] {
            assert!(
                matches!(store.path_for(key), Err(StoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
        assert_eq!(
            store.path_for("roam-autoalias_dictionary").unwrap(),
            PathBuf::from("/tmp/store/roam-autoalias_dictionary.json")
        );
    }

    #[test]
    fn unreadable_value_is_an_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as a string
        std::fs::create_dir(dir.path().join("dict.json")).unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.get("dict"), Err(StoreError::Io { .. })));
    }
}
