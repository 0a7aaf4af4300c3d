// src/core/storage.rs

//! Keeps the in-progress form across restarts.
//!
//! The form talks to a narrow `FormStore` (get/set/clear by key) that is
//! handed to the `App` at start-up, so tests can swap in `MemoryStore`.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::core::models::FormData;
use crate::error::StorageError;

/// Key under which the form is stored.
pub const FORM_STORAGE_KEY: &str = "respiratoryFormData";

/// A string key-value store.
pub trait FormStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn clear(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates the store, making sure `root` exists.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    #[cfg(test)]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl FormStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store. Used in tests and when the data directory is unusable.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl FormStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Reads the saved form, merged over the defaults.
///
/// A missing, unreadable or corrupt entry yields the default form. A single
/// field of the wrong type only loses that field. Problems are only logged.
pub fn load_form(store: &dyn FormStore) -> FormData {
    match store.get(FORM_STORAGE_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(saved)) => {
                debug!("Restored saved form.");
                merge_over_defaults(saved)
            }
            Ok(_) => {
                warn!("Saved form is not a JSON object, starting from defaults.");
                FormData::default()
            }
            Err(e) => {
                warn!(error = %e, "Saved form is corrupt, starting from defaults.");
                FormData::default()
            }
        },
        Ok(None) => {
            debug!("No saved form found.");
            FormData::default()
        }
        Err(e) => {
            warn!(error = %e, "Could not read saved form, starting from defaults.");
            FormData::default()
        }
    }
}

/// Applies each saved key over the default form, keeping only the values
/// that deserialize.
fn merge_over_defaults(saved: Map<String, Value>) -> FormData {
    let mut merged = match serde_json::to_value(FormData::default()) {
        Ok(Value::Object(defaults)) => defaults,
        _ => return FormData::default(),
    };
    for (key, value) in saved {
        if !merged.contains_key(&key) {
            continue;
        }
        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value);
        if serde_json::from_value::<FormData>(Value::Object(candidate.clone())).is_ok() {
            merged = candidate;
        } else {
            warn!(field = %key, "Ignoring saved value of the wrong type.");
        }
    }
    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

/// Writes the form (without the cough recording) to the store.
pub fn save_form(store: &mut dyn FormStore, data: &FormData) -> Result<(), StorageError> {
    let json = serde_json::to_string(data)?;
    store.set(FORM_STORAGE_KEY, &json)
}

/// Drops the saved form.
pub fn clear_form(store: &mut dyn FormStore) -> Result<(), StorageError> {
    store.clear(FORM_STORAGE_KEY)
}
