use std::path::PathBuf;

use crate::error::{AppError, ScanError};
use crate::paths::canonical_to_string;
use crate::repo::vault_repo;
use crate::services::vault_service::{self, FileTreeNode};
use crate::state::SessionState;

/// Records `path` as the current vault after checking that it resolves to a
/// directory, and caches it on the session.
pub async fn set_vault(state: &SessionState, path: PathBuf) -> Result<PathBuf, AppError> {
    let canonical = path.canonicalize().map_err(|err| ScanError::RootUnreadable {
        path: canonical_to_string(&path),
        source: err,
    })?;
    if !canonical.is_dir() {
        return Err(ScanError::NotADirectory {
            path: canonical_to_string(&canonical),
        }
        .into());
    }

    let store_dir = state.store_dir().to_path_buf();
    let vault_root = canonical.clone();
    tokio::task::spawn_blocking(move || vault_repo::persist_vault(&store_dir, &vault_root))
        .await??;

    state.set_vault_root(canonical.clone());
    Ok(canonical)
}

/// Scans the configured vault into a fresh forest. Reports `NotConfigured`
/// when no vault has been recorded yet.
pub async fn scan_vault(state: &SessionState) -> Result<Vec<FileTreeNode>, AppError> {
    let vault_root = state.current_vault_root()?;
    let forest =
        tokio::task::spawn_blocking(move || vault_service::scan_vault(&vault_root)).await??;
    Ok(forest)
}
