// SPDX-License-Identifier: MPL-2.0
//! Durable key-value storage for client preferences.
//!
//! The file-backed store keeps a CBOR map in the application data
//! directory. Reads and writes are best-effort from the caller's point of
//! view: [`LanguageService`](super::LanguageService) logs and ignores
//! every error reported here.

use crate::error::{Error, Result};
use crate::paths;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Preferences file name within the app data directory.
const PREFERENCES_FILE: &str = "preferences.cbor";

pub trait PreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// Stores preferences as a CBOR map in a single file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `preferences.cbor` in the data directory (see
    /// [`paths::get_app_data_dir_with_override`]).
    pub fn in_data_dir(base_dir: Option<PathBuf>) -> Option<Self> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(PREFERENCES_FILE);
            Self::new(path)
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_items(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let file = fs::File::open(&self.path)?;
        let items = ciborium::from_reader(BufReader::new(file))?;
        Ok(items)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_items()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        // An unreadable file is replaced rather than blocking every write.
        let mut items = self.load_items().unwrap_or_default();
        items.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_atomic(&self.path, &items)
    }
}

/// Writes `items` to a sibling `.tmp` file, then renames it over `path`.
///
/// A failed write leaves the previous file untouched.
fn write_atomic(path: &Path, items: &BTreeMap<String, String>) -> Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let written = fs::File::create(&temp_path)
        .map_err(Error::from)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            ciborium::into_writer(items, &mut writer)?;
            writer.flush()?;
            Ok(())
        })
        .and_then(|()| fs::rename(&temp_path, path).map_err(Error::from));

    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}

/// In-process store; can be created unavailable to mimic denied storage.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    items: Mutex<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails.
    pub fn unavailable() -> Self {
        Self {
            items: Mutex::default(),
            unavailable: true,
        }
    }

    fn items(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        if self.unavailable {
            return Err(Error::Storage("storage is not available".to_string()));
        }
        self.items
            .lock()
            .map_err(|_| Error::Storage("storage lock poisoned".to_string()))
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
