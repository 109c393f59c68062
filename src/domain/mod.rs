pub mod achievements;
pub mod user_stats;
