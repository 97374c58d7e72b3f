use std::path::PathBuf;

use tracing::debug;

use super::{KeyValueStore, StoreError};

/// Stores each key as `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> std::io::Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key)?;
        if !path.exists() {
            debug!(key, "No stored value");
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StoreError::Read {
                key: key.to_string(),
                path,
                source,
            })
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        // Write to a sibling file first so a crash never leaves half a value.
        let tmp = path.with_extension("json.tmp");
        let to_write_err = |source: std::io::Error| StoreError::Write {
            key: key.to_string(),
            path: path.clone(),
            source,
        };
        std::fs::write(&tmp, value).map_err(to_write_err)?;
        std::fs::rename(&tmp, &path).map_err(to_write_err)?;
        Ok(())
    }
}
