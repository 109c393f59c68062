use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ScanError;

/// Per-session context: where the record stores live and which vault the
/// user is working in. Created once at startup (or when a user signs in)
/// and torn down on sign-out; nothing here is process-global.
pub struct SessionState {
    root: Mutex<Option<PathBuf>>,
    store_dir: PathBuf,
}

impl SessionState {
    pub fn new(store_dir: PathBuf, vault_root: Option<PathBuf>) -> Self {
        Self {
            root: Mutex::new(vault_root),
            store_dir,
        }
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn current_vault_root(&self) -> Result<PathBuf, ScanError> {
        let guard = self.root.lock().expect("vault mutex poisoned");
        guard.clone().ok_or(ScanError::NotConfigured)
    }

    pub fn set_vault_root(&self, vault_root: PathBuf) {
        let mut guard = self.root.lock().expect("vault mutex poisoned");
        *guard = Some(vault_root);
    }

    /// Sign-out teardown: forget the cached vault. The persisted record
    /// stays on disk for the next session.
    pub fn sign_out(&self) {
        let mut guard = self.root.lock().expect("vault mutex poisoned");
        *guard = None;
    }
}
