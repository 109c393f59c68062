use serde::{Deserialize, Serialize};

// One unlockable achievement. `earned` holds the YYYY-MM-DD completion date
// once the achievement has been completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub earned: Option<String>,
    pub color: String,
    pub completed: bool,
}

// Outcome of applying a completion to the achievements list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Completed,
    AlreadyCompleted,
    NotFound,
}

fn achievement(id: &str, name: &str, description: &str, icon: &str, color: &str) -> Achievement {
    Achievement {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        earned: None,
        color: color.to_string(),
        completed: false,
    }
}

/// The fixed set the achievements store is seeded with on first run.
pub fn default_achievements() -> Vec<Achievement> {
    vec![
        achievement(
            "a1",
            "Note Beginnings",
            "Create Your First Note",
            "brightness_7",
            "text-warning",
        ),
        achievement(
            "a2",
            "Now You're Getting It",
            "Create 5 Notes",
            "psychology",
            "text-primary",
        ),
        achievement(
            "a3",
            "Now You're Thinking With Portals",
            "Create 100 Notes",
            "local_fire_department",
            "text-error",
        ),
        achievement(
            "a4",
            "Welcome!",
            "Log Your First Day",
            "emoji_events",
            "text-neutral-content",
        ),
        achievement(
            "a5",
            "You're A Regular!",
            "Log 7 Days",
            "auto_awesome",
            "text-neutral-content",
        ),
    ]
}

/// Pure transform marking `id` completed with the given earned date.
/// An already-completed or unknown id leaves the list untouched; the caller
/// decides what to do with the outcome.
pub fn mark_completed(
    mut list: Vec<Achievement>,
    id: &str,
    earned_on: &str,
) -> (Vec<Achievement>, MarkOutcome) {
    match list.iter().position(|a| a.id == id) {
        None => (list, MarkOutcome::NotFound),
        Some(index) if list[index].completed => (list, MarkOutcome::AlreadyCompleted),
        Some(index) => {
            list[index].completed = true;
            list[index].earned = Some(earned_on.to_string());
            (list, MarkOutcome::Completed)
        }
    }
}
