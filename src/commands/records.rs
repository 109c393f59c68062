use crate::domain::achievements::Achievement;
use crate::domain::user_stats::UserStats;
use crate::error::AppError;
use crate::services::records_service;
use crate::state::SessionState;

/// Best-effort seeding of the achievement and user-stat records; part of
/// the startup sequence and safe to call on every launch.
pub async fn initialize_stores(state: &SessionState) {
    let store_dir = state.store_dir().to_path_buf();
    if let Err(err) =
        tokio::task::spawn_blocking(move || records_service::initialize_stores(&store_dir)).await
    {
        log::warn!("store initialization task failed: {err}");
    }
}

pub async fn complete_achievement(
    state: &SessionState,
    achievement_id: String,
) -> Result<Vec<Achievement>, AppError> {
    let store_dir = state.store_dir().to_path_buf();
    let list = tokio::task::spawn_blocking(move || {
        records_service::complete_achievement(&store_dir, &achievement_id)
    })
    .await??;
    Ok(list)
}

pub async fn get_achievements(state: &SessionState) -> Vec<Achievement> {
    let store_dir = state.store_dir().to_path_buf();
    match tokio::task::spawn_blocking(move || records_service::get_achievements(&store_dir)).await {
        Ok(list) => list,
        Err(err) => {
            log::warn!("achievements read task failed: {err}");
            Vec::new()
        }
    }
}

pub async fn get_user_stats(state: &SessionState) -> UserStats {
    let store_dir = state.store_dir().to_path_buf();
    match tokio::task::spawn_blocking(move || records_service::get_user_stats(&store_dir)).await {
        Ok(stats) => stats,
        Err(err) => {
            log::warn!("user stats read task failed: {err}");
            UserStats::default()
        }
    }
}

pub async fn increment_notes_count(state: &SessionState) -> Result<UserStats, AppError> {
    let store_dir = state.store_dir().to_path_buf();
    let stats =
        tokio::task::spawn_blocking(move || records_service::increment_notes_count(&store_dir))
            .await??;
    Ok(stats)
}

pub async fn increment_days_logged(state: &SessionState) -> Result<UserStats, AppError> {
    let store_dir = state.store_dir().to_path_buf();
    let stats =
        tokio::task::spawn_blocking(move || records_service::increment_days_logged(&store_dir))
            .await??;
    Ok(stats)
}

pub async fn update_username(
    state: &SessionState,
    new_username: String,
) -> Result<UserStats, AppError> {
    let store_dir = state.store_dir().to_path_buf();
    tokio::task::spawn_blocking(move || {
        records_service::update_username(&store_dir, &new_username)
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn startup_then_mutations_flow_through_the_stores() {
        let store_dir = TempDir::new().unwrap();
        let state = SessionState::new(store_dir.path().to_path_buf(), None);

        initialize_stores(&state).await;
        assert_eq!(get_achievements(&state).await.len(), 5);

        let list = complete_achievement(&state, "a1".to_string()).await.unwrap();
        assert!(list.iter().find(|a| a.id == "a1").unwrap().completed);

        increment_notes_count(&state).await.unwrap();
        let stats = increment_notes_count(&state).await.unwrap();
        assert_eq!(stats.number_of_notes, 2);
    }

    #[tokio::test]
    async fn update_username_surfaces_validation_failures() {
        let store_dir = TempDir::new().unwrap();
        let state = SessionState::new(store_dir.path().to_path_buf(), None);

        let err = update_username(&state, "".to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
