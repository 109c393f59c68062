use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::error::StoreError;
use crate::repo::persisted_store::PersistedStore;

/// Seeds `key` in `file_name` with `default` unless it already holds a
/// non-empty value. Failures are logged and swallowed so app startup never
/// blocks on a broken store file.
pub fn ensure_initialized<T: Serialize>(store_dir: &Path, file_name: &str, key: &str, default: &T) {
    match try_ensure_initialized(store_dir, file_name, key, default) {
        Ok(true) => log::info!("seeded {key} in {file_name} with default data"),
        Ok(false) => {}
        Err(err) => log::warn!("failed to initialize {key} in {file_name}: {err}"),
    }
}

/// Fallible core of [`ensure_initialized`]; returns whether a write happened.
/// An absent key and an empty list both count as uninitialized; anything else
/// is user data and is never overwritten.
pub fn try_ensure_initialized<T: Serialize>(
    store_dir: &Path,
    file_name: &str,
    key: &str,
    default: &T,
) -> Result<bool, StoreError> {
    let mut store = PersistedStore::open(store_dir, file_name)?;
    let needs_seed = match store.get_raw(key) {
        None => true,
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    };
    if !needs_seed {
        return Ok(false);
    }
    store.set(key, default)?;
    store.save()?;
    Ok(true)
}

/// One full read-modify-write-save cycle over a single record. The current
/// value falls back to `default` when the key is absent. Returns the value
/// that was persisted.
pub fn mutate<T, F>(
    store_dir: &Path,
    file_name: &str,
    key: &str,
    default: T,
    transform: F,
) -> Result<T, StoreError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce(T) -> T,
{
    let mut store = PersistedStore::open(store_dir, file_name)?;
    let current = store.get::<T>(key)?.unwrap_or(default);
    let next = transform(current);
    store.set(key, &next)?;
    store.save()?;
    Ok(next)
}

/// Reads a record, falling back to `default` when the key is absent.
pub fn read_or<T: DeserializeOwned>(
    store_dir: &Path,
    file_name: &str,
    key: &str,
    default: T,
) -> Result<T, StoreError> {
    let store = PersistedStore::open(store_dir, file_name)?;
    Ok(store.get::<T>(key)?.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FILE: &str = "records.json";

    #[test]
    fn ensure_initialized_writes_the_default_exactly_once() {
        let dir = TempDir::new().unwrap();
        let default = vec![1u64, 2, 3];

        assert!(try_ensure_initialized(dir.path(), FILE, "list", &default).unwrap());
        assert!(!try_ensure_initialized(dir.path(), FILE, "list", &default).unwrap());

        let stored: Vec<u64> = read_or(dir.path(), FILE, "list", Vec::new()).unwrap();
        assert_eq!(stored, default);
    }

    #[test]
    fn ensure_initialized_never_overwrites_user_data() {
        let dir = TempDir::new().unwrap();
        let mut store = PersistedStore::open(dir.path(), FILE).unwrap();
        store.set("list", &vec![99u64]).unwrap();
        store.save().unwrap();

        assert!(!try_ensure_initialized(dir.path(), FILE, "list", &vec![1u64, 2]).unwrap());
        let stored: Vec<u64> = read_or(dir.path(), FILE, "list", Vec::new()).unwrap();
        assert_eq!(stored, vec![99]);
    }

    #[test]
    fn empty_list_counts_as_uninitialized() {
        let dir = TempDir::new().unwrap();
        let mut store = PersistedStore::open(dir.path(), FILE).unwrap();
        store.set("list", &Vec::<u64>::new()).unwrap();
        store.save().unwrap();

        assert!(try_ensure_initialized(dir.path(), FILE, "list", &vec![7u64]).unwrap());
        let stored: Vec<u64> = read_or(dir.path(), FILE, "list", Vec::new()).unwrap();
        assert_eq!(stored, vec![7]);
    }

    #[test]
    fn mutate_falls_back_to_the_default_and_persists() {
        let dir = TempDir::new().unwrap();
        let one = mutate(dir.path(), FILE, "count", 0u64, |n| n + 1).unwrap();
        assert_eq!(one, 1);
        let two = mutate(dir.path(), FILE, "count", 0u64, |n| n + 1).unwrap();
        assert_eq!(two, 2);

        let stored: u64 = read_or(dir.path(), FILE, "count", 0).unwrap();
        assert_eq!(stored, 2);
    }
}
