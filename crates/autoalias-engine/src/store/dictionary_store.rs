use super::KeyValueStore;
use crate::dictionary::AliasDictionary;

/// Persists one alias dictionary as a JSON blob under a fixed key.
///
/// Nothing here fails loudly: a missing or unreadable blob loads as `None`
/// and a failed write is logged and dropped. Writes are never retried.
#[derive(Debug)]
pub struct DictionaryStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> DictionaryStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Access to the backing store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Loads the stored dictionary, or `None` if there is no usable one.
    pub fn load(&self) -> Option<AliasDictionary> {
        let blob = match self.store.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                log::info!("No alias dictionary stored under {:?}", self.key);
                return None;
            }
            Err(e) => {
                log::warn!("Failed to read alias dictionary {:?}: {e}", self.key);
                return None;
            }
        };

        match serde_json::from_str::<AliasDictionary>(&blob) {
            Ok(dict) => {
                log::debug!("Loaded alias dictionary with {} entries", dict.len());
                Some(dict)
            }
            Err(e) => {
                log::warn!("Ignoring corrupt alias dictionary {:?}: {e}", self.key);
                None
            }
        }
    }

    /// Stores `dict`, returning whether the write succeeded.
    pub fn save(&mut self, dict: &AliasDictionary) -> bool {
        let blob = match serde_json::to_string(dict) {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!("Failed to serialize alias dictionary: {e}");
                return false;
            }
        };

        match self.store.set(&self.key, &blob) {
            Ok(()) => {
                log::info!("Saved alias dictionary: {blob}");
                true
            }
            Err(e) => {
                log::warn!("Failed to save alias dictionary {:?}: {e}", self.key);
                false
            }
        }
    }
}
