use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::StoreError;

/// One named key-value document on disk.
///
/// The handle owns the in-memory map between `open` and `save`; `set` only
/// touches memory and nothing is flushed until `save` is called. Opening
/// re-reads the backing file every time, so two overlapping
/// read-modify-write cycles against the same file race and the later `save`
/// wins, silently discarding the earlier writer's update. Callers that need
/// stronger guarantees must serialize their own mutations.
#[derive(Debug)]
pub struct PersistedStore {
    path: PathBuf,
    file_name: String,
    entries: Map<String, Value>,
}

impl PersistedStore {
    /// Opens the store file, or starts an empty store when the file does not
    /// exist yet. The file is only created on the first `save`.
    pub fn open(store_dir: &Path, file_name: &str) -> Result<Self, StoreError> {
        let path = store_dir.join(file_name);
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => {
                serde_json::from_str::<Map<String, Value>>(&raw).map_err(|err| {
                    StoreError::Parse {
                        file: file_name.to_string(),
                        source: err,
                    }
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(err) => {
                return Err(StoreError::Read {
                    file: file_name.to_string(),
                    source: err,
                })
            }
        };
        Ok(Self {
            path,
            file_name: file_name.to_string(),
            entries,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    // Raw value for a key, if present.
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Typed value for a key. A present value that does not match `T` is a
    /// corruption error, not an absence.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|err| {
                StoreError::Decode {
                    file: self.file_name.clone(),
                    key: key.to_string(),
                    source: err,
                }
            }),
        }
    }

    // In-memory only; call `save` to flush.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value).map_err(|err| StoreError::Encode {
            file: self.file_name.clone(),
            key: key.to_string(),
            source: err,
        })?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    /// Flushes the store to disk, creating the store directory and the file
    /// if needed. Writes go through a temp file and a rename so a crashed
    /// save never leaves a half-written store behind.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::Write {
                file: self.file_name.clone(),
                source: err,
            })?;
        }

        let data =
            serde_json::to_string_pretty(&self.entries).map_err(|err| StoreError::Serialize {
                file: self.file_name.clone(),
                source: err,
            })?;

        let temp_name = format!(
            ".tmp-{}-{}",
            self.file_name,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis()
        );
        let temp_path = self.path.with_file_name(temp_name);

        fs::write(&temp_path, data).map_err(|err| StoreError::Write {
            file: self.file_name.clone(),
            source: err,
        })?;
        if let Err(err) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Write {
                file: self.file_name.clone(),
                source: err,
            });
        }
        Ok(())
    }

    // Raw entries, for diagnostics and startup logging.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}
