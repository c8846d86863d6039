use serde::{Deserialize, Serialize};

use crate::entities::SkillCategory;

/// One ranked row on the leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based rank
    pub rank: usize,
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub category: SkillCategory,
    pub install_count: i64,
}

/// Response for the leaderboard endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    /// Entries ordered by rank
    pub entries: Vec<LeaderboardEntry>,
}
