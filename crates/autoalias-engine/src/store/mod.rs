//! # Dictionary Persistence
//!
//! A flat key-value store is all the host needs to keep the dictionary
//! between sessions. [`KeyValueStore`] is that seam; [`DictionaryStore`]
//! stores one [`crate::dictionary::AliasDictionary`] as a JSON blob under a
//! fixed key and turns every failure into "no dictionary".

pub mod dictionary_store;
pub mod file;
pub mod memory;

use std::path::PathBuf;

pub use dictionary_store::DictionaryStore;
pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A flat string-to-string store.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}
