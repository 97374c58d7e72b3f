//! Persisted key/value storage.
//!
//! The load sequencer only ever needs one get/set pair of text values, so
//! storage is abstracted behind `KeyValueStore`:
//! - `FileStore`: one JSON file per key under the cache directory
//! - `MemoryStore`: process-local map, for tests and ephemeral runs

pub mod file;
pub mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {key} from {path}: {source}")]
    Read {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {key} to {path}: {source}")]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Text values keyed by name, persisted across runs.
pub trait KeyValueStore: Send + Sync {
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
