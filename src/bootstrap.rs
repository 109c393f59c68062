use std::fs;
use std::path::PathBuf;
use std::sync::Once;

use crate::repo::vault_repo;
use crate::services::records_service;
use crate::state::SessionState;

static LOGGING: Once = Once::new();

/// Installs the tracing subscriber and routes `log` macros through it. Safe
/// to call more than once; later calls are no-ops.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_log::LogTracer::init();
        let subscriber = tracing_subscriber::fmt().finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Startup sequence: create the store directory, restore the last used
/// vault, and seed the record stores. Record seeding is best effort and
/// never fails startup; only an unusable store directory does.
pub fn init_session(store_dir: impl Into<PathBuf>) -> anyhow::Result<SessionState> {
    let store_dir = store_dir.into();
    fs::create_dir_all(&store_dir)?;
    let vault_root = vault_repo::load_persisted_vault(&store_dir);
    records_service::initialize_stores(&store_dir);
    Ok(SessionState::new(store_dir, vault_root))
}
