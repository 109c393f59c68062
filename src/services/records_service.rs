use std::path::Path;
use std::time::Instant;

use chrono::Local;
use tracing::{error, info, span, warn, Level};
use uuid::Uuid;

use crate::domain::achievements::{self, Achievement, MarkOutcome};
use crate::domain::user_stats::UserStats;
use crate::error::{AppError, StoreError};
use crate::repo::records;

pub const ACHIEVEMENTS_STORE_FILE: &str = "achievements.json";
pub const ACHIEVEMENTS_KEY: &str = "achievements";
pub const USER_STORE_FILE: &str = "user.json";
pub const USER_STATS_KEY: &str = "userStats";

/// Seeds both record stores with their defaults. Best effort: a broken
/// store file is logged and skipped so startup always proceeds.
pub fn initialize_stores(store_dir: &Path) {
    records::ensure_initialized(
        store_dir,
        ACHIEVEMENTS_STORE_FILE,
        ACHIEVEMENTS_KEY,
        &achievements::default_achievements(),
    );
    records::ensure_initialized(store_dir, USER_STORE_FILE, USER_STATS_KEY, &UserStats::default());
}

/// Marks an achievement completed, stamping today's date. Completing an
/// already-completed achievement leaves the list unchanged; an unknown id
/// does too and is only worth a warning, not an error.
pub fn complete_achievement(
    store_dir: &Path,
    achievement_id: &str,
) -> Result<Vec<Achievement>, StoreError> {
    let op_id = Uuid::new_v4().to_string();
    let span = span!(
        Level::INFO,
        "records.complete_achievement",
        op_id = op_id,
        achievement_id = achievement_id
    );
    let _enter = span.enter();

    let start = Instant::now();
    let today = Local::now().format("%Y-%m-%d").to_string();
    let mut outcome = MarkOutcome::NotFound;
    let result = records::mutate(
        store_dir,
        ACHIEVEMENTS_STORE_FILE,
        ACHIEVEMENTS_KEY,
        Vec::new(),
        |list| {
            let (list, applied) = achievements::mark_completed(list, achievement_id, &today);
            outcome = applied;
            list
        },
    );
    let elapsed = start.elapsed();

    match &result {
        Ok(_) => match outcome {
            MarkOutcome::Completed => {
                info!("complete_achievement succeeded: elapsed_ms={}", elapsed.as_millis());
            }
            MarkOutcome::AlreadyCompleted => {
                info!("achievement {achievement_id} was already completed");
            }
            MarkOutcome::NotFound => {
                warn!("achievement {achievement_id} not found");
            }
        },
        Err(err) => {
            error!(
                "complete_achievement failed: error={}, elapsed_ms={}",
                err,
                elapsed.as_millis()
            );
        }
    }

    result
}

/// Current achievements list; empty when the store is unreadable or was
/// never seeded.
pub fn get_achievements(store_dir: &Path) -> Vec<Achievement> {
    match records::read_or(store_dir, ACHIEVEMENTS_STORE_FILE, ACHIEVEMENTS_KEY, Vec::new()) {
        Ok(list) => list,
        Err(err) => {
            warn!("failed to read achievements: {err}");
            Vec::new()
        }
    }
}

/// Current user stats; the defaults when the store is unreadable or was
/// never seeded.
pub fn get_user_stats(store_dir: &Path) -> UserStats {
    match records::read_or(store_dir, USER_STORE_FILE, USER_STATS_KEY, UserStats::default()) {
        Ok(stats) => stats,
        Err(err) => {
            warn!("failed to read user stats: {err}");
            UserStats::default()
        }
    }
}

pub fn increment_notes_count(store_dir: &Path) -> Result<UserStats, StoreError> {
    mutate_stats(store_dir, "increment_notes_count", |mut stats| {
        stats.number_of_notes += 1;
        stats
    })
}

// Call once per day, on the first login of the day.
pub fn increment_days_logged(store_dir: &Path) -> Result<UserStats, StoreError> {
    mutate_stats(store_dir, "increment_days_logged", |mut stats| {
        stats.days_logged += 1;
        stats
    })
}

/// Validates and stores a new display name. A blank name is rejected before
/// any file I/O happens.
pub fn update_username(store_dir: &Path, new_username: &str) -> Result<UserStats, AppError> {
    let trimmed = new_username.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("username must not be empty".to_string()));
    }
    let name = trimmed.to_string();
    let stats = mutate_stats(store_dir, "update_username", move |mut stats| {
        stats.username = name;
        stats
    })?;
    Ok(stats)
}

fn mutate_stats<F>(store_dir: &Path, op: &str, transform: F) -> Result<UserStats, StoreError>
where
    F: FnOnce(UserStats) -> UserStats,
{
    let op_id = Uuid::new_v4().to_string();
    let span = span!(Level::INFO, "records.mutate_stats", op_id = op_id, op = op);
    let _enter = span.enter();

    let start = Instant::now();
    let result = records::mutate(
        store_dir,
        USER_STORE_FILE,
        USER_STATS_KEY,
        UserStats::default(),
        transform,
    );
    let elapsed = start.elapsed();

    match &result {
        Ok(stats) => {
            info!(
                "{op} succeeded: notes={}, days_logged={}, elapsed_ms={}",
                stats.number_of_notes,
                stats.days_logged,
                elapsed.as_millis()
            );
        }
        Err(err) => {
            error!("{op} failed: error={}, elapsed_ms={}", err, elapsed.as_millis());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn initialize_seeds_both_records() {
        let dir = TempDir::new().unwrap();
        initialize_stores(dir.path());

        let list = get_achievements(dir.path());
        assert_eq!(list.len(), 5);
        assert!(list.iter().all(|a| !a.completed && a.earned.is_none()));

        let stats = get_user_stats(dir.path());
        assert_eq!(stats, UserStats::default());
    }

    #[test]
    fn initialize_twice_does_not_reset_progress() {
        let dir = TempDir::new().unwrap();
        initialize_stores(dir.path());
        complete_achievement(dir.path(), "a1").unwrap();

        initialize_stores(dir.path());
        let list = get_achievements(dir.path());
        assert!(list[0].completed);
    }

    #[test]
    fn completing_sets_the_flag_and_a_date_string() {
        let dir = TempDir::new().unwrap();
        initialize_stores(dir.path());

        let list = complete_achievement(dir.path(), "a1").unwrap();
        let target = list.iter().find(|a| a.id == "a1").unwrap();
        assert!(target.completed);
        let earned = target.earned.as_deref().unwrap();
        assert_eq!(earned.len(), 10, "expected YYYY-MM-DD, got {earned}");

        for other in list.iter().filter(|a| a.id != "a1") {
            assert!(!other.completed);
        }
    }

    #[test]
    fn completing_twice_returns_the_unchanged_list() {
        let dir = TempDir::new().unwrap();
        initialize_stores(dir.path());

        let first = complete_achievement(dir.path(), "a1").unwrap();
        let second = complete_achievement(dir.path(), "a1").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_id_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        initialize_stores(dir.path());

        let before = get_achievements(dir.path());
        let after = complete_achievement(dir.path(), "does-not-exist").unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn incrementing_notes_twice_yields_two() {
        let dir = TempDir::new().unwrap();
        initialize_stores(dir.path());

        increment_notes_count(dir.path()).unwrap();
        let stats = increment_notes_count(dir.path()).unwrap();
        assert_eq!(stats.number_of_notes, 2);
        assert_eq!(stats.days_logged, 0);
    }

    #[test]
    fn blank_username_is_rejected_before_io() {
        let dir = TempDir::new().unwrap();
        let err = update_username(dir.path(), "   ").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // Nothing was written: the store directory is still untouched.
        assert!(!dir.path().join(USER_STORE_FILE).exists());
    }

    #[test]
    fn username_update_trims_and_persists() {
        let dir = TempDir::new().unwrap();
        initialize_stores(dir.path());

        let stats = update_username(dir.path(), "  Ada  ").unwrap();
        assert_eq!(stats.username, "Ada");
        assert_eq!(get_user_stats(dir.path()).username, "Ada");
    }
}
