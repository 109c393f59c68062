use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::paths::canonical_to_string;
use crate::repo::persisted_store::PersistedStore;

pub const DIRECTORIES_STORE_FILE: &str = "directories.json";
pub const CURRENT_VAULT_KEY: &str = "currentVault";

/// Records `vault_root` as the last used vault.
pub fn persist_vault(store_dir: &Path, vault_root: &Path) -> Result<(), StoreError> {
    let mut store = PersistedStore::open(store_dir, DIRECTORIES_STORE_FILE)?;
    store.set(CURRENT_VAULT_KEY, &canonical_to_string(vault_root))?;
    store.save()
}

/// Loads the last used vault, if one was recorded and still points at a
/// directory. A missing or stale record is not an error; the caller sees a
/// not-configured session.
pub fn load_persisted_vault(store_dir: &Path) -> Option<PathBuf> {
    let store = match PersistedStore::open(store_dir, DIRECTORIES_STORE_FILE) {
        Ok(store) => store,
        Err(err) => {
            log::warn!("failed to open {DIRECTORIES_STORE_FILE}: {err}");
            return None;
        }
    };
    let recorded = match store.get::<String>(CURRENT_VAULT_KEY) {
        Ok(value) => value?,
        Err(err) => {
            log::warn!("failed to decode {CURRENT_VAULT_KEY}: {err}");
            return None;
        }
    };
    validate_vault_path(Path::new(&recorded))
}

fn validate_vault_path(path: &Path) -> Option<PathBuf> {
    let canonical = path.canonicalize().ok()?;
    if !canonical.is_dir() {
        return None;
    }
    Some(canonical)
}
