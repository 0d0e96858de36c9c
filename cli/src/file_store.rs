//! JSON-file credential backend for the CLI.
//!
//! DESIGN
//! ======
//! The file mirrors browser `localStorage`: one flat JSON object of storage
//! key to string value, using the same key names the web client uses. Every
//! write rewrites the whole file through a temp file + rename, so a crash
//! never leaves a half-written credential behind.

#[cfg(test)]
#[path = "file_store_test.rs"]
mod file_store_test;

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use guard::{KeyValueStore, StoreError};

#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StoreError::Unavailable(format!("{}: {e}", self.path.display()))),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| StoreError::Unavailable(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, items: &BTreeMap<String, String>, key: &str) -> Result<(), StoreError> {
        let write_err = |reason: String| StoreError::Write { key: key.to_owned(), reason };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        let tmp = self.tmp_path();
        let raw = serde_json::to_string_pretty(items)?;
        fs::write(&tmp, raw).map_err(|e| write_err(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| write_err(e.to_string()))
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "credentials".to_owned(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.load()?;
        items.insert(key.to_owned(), value.to_owned());
        self.save(&items, key)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut items = self.load()?;
        if items.remove(key).is_none() {
            return Ok(());
        }
        self.save(&items, key)
    }
}
