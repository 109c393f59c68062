use std::fs;

use tempfile::TempDir;

use notevault::bootstrap;
use notevault::commands::{records, vault};
use notevault::error::{AppError, ScanError};
use notevault::services::tree_view::TreeViewState;
use notevault::services::vault_service::FsDirectoryLister;

#[tokio::test]
async fn first_launch_seeds_records_and_browses_the_vault() {
    bootstrap::init_logging();

    let base = TempDir::new().unwrap();
    let store_dir = base.path().join("app-data");
    let state = bootstrap::init_session(&store_dir).unwrap();

    // Fresh install: five locked achievements, default stats, no vault yet.
    let achievements = records::get_achievements(&state).await;
    assert_eq!(achievements.len(), 5);
    assert!(achievements.iter().all(|a| !a.completed && a.earned.is_none()));
    assert_eq!(records::get_user_stats(&state).await.number_of_notes, 0);
    assert!(matches!(
        vault::scan_vault(&state).await,
        Err(AppError::Scan(ScanError::NotConfigured))
    ));

    // User picks a vault containing notes, a stray file, and editor metadata.
    let vault_dir = TempDir::new().unwrap();
    fs::create_dir(vault_dir.path().join("notes")).unwrap();
    fs::write(vault_dir.path().join("notes/a.md"), "# a").unwrap();
    fs::write(vault_dir.path().join("notes/b.md"), "# b").unwrap();
    fs::write(vault_dir.path().join("todo.txt"), "todo").unwrap();
    fs::create_dir(vault_dir.path().join(".obsidian")).unwrap();
    fs::write(vault_dir.path().join(".obsidian/workspace.json"), "{}").unwrap();

    let root = vault::set_vault(&state, vault_dir.path().to_path_buf())
        .await
        .unwrap();
    let forest = vault::scan_vault(&state).await.unwrap();

    let names: Vec<&str> = forest.iter().map(|node| node.name.as_str()).collect();
    assert_eq!(names, ["notes", "todo.txt"]);
    let notes = forest[0].children.as_ref().unwrap();
    let note_names: Vec<&str> = notes.iter().map(|node| node.name.as_str()).collect();
    assert_eq!(note_names, ["a.md", "b.md"]);

    // The user expands a folder, then a rescan collapses everything again.
    let mut view = TreeViewState::from_forest(forest);
    let notes_path = view.forest()[0].path.clone();
    assert!(view.toggle(&notes_path));
    assert!(view.forest()[0].is_open);
    view.refresh(&FsDirectoryLister, &root).unwrap();
    assert!(!view.forest()[0].is_open);

    // First note created: achievement unlocked, counter bumped.
    let achievements = records::complete_achievement(&state, "a1".to_string())
        .await
        .unwrap();
    let first_note = achievements.iter().find(|a| a.id == "a1").unwrap();
    assert!(first_note.completed);
    assert!(first_note.earned.is_some());

    records::increment_notes_count(&state).await.unwrap();
    let stats = records::increment_notes_count(&state).await.unwrap();
    assert_eq!(stats.number_of_notes, 2);

    // Relaunch: nothing is reseeded, the vault record survives.
    let state = bootstrap::init_session(&store_dir).unwrap();
    assert_eq!(state.current_vault_root().unwrap(), root);
    let achievements = records::get_achievements(&state).await;
    assert!(achievements.iter().find(|a| a.id == "a1").unwrap().completed);
    assert_eq!(records::get_user_stats(&state).await.number_of_notes, 2);
}
