//! Install-count leaderboard.
//!
//! Ranks live skills by install count (ties broken by lower ID, i.e. the
//! older listing wins). The ranking is recomputed from the repository on
//! demand and served through a TTL cache, so a burst of reads between
//! installs costs one scan; entries may lag the true counts by at most the
//! cache TTL.

use skilldir_const::limits::LEADERBOARD_MAX_LIMIT;
use skilldir_storage::StorageBackend;
use skilldir_types::{dto::LeaderboardEntry, entities::Skill, error::Result};

use crate::{
    cache::{CacheConfig, ResponseCache},
    repository::SkillRepository,
};

/// Computes and caches the skill leaderboard
#[derive(Clone)]
pub struct Leaderboard {
    cache: ResponseCache<Vec<LeaderboardEntry>>,
}

impl Leaderboard {
    /// Create a leaderboard service with the given cache settings
    pub fn new(cache_config: &CacheConfig) -> Self {
        Self { cache: ResponseCache::new(cache_config) }
    }

    /// Top `limit` skills by install count
    ///
    /// `limit` is clamped to the configured maximum. Results are cached per
    /// limit value.
    pub async fn top<S: StorageBackend>(
        &self,
        skills: &SkillRepository<S>,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>> {
        let limit = limit.clamp(1, LEADERBOARD_MAX_LIMIT);
        let key = format!("top:{limit}");

        self.cache
            .get_or_compute(&key, || async move {
                let mut all = skills.list_active().await?;
                all.sort_by(|a, b| {
                    b.install_count.cmp(&a.install_count).then(a.id.cmp(&b.id))
                });
                Ok(all.into_iter().take(limit).enumerate().map(to_entry).collect())
            })
            .await
    }

    /// Drop cached rankings (tests and admin tooling)
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}

fn to_entry((index, skill): (usize, Skill)) -> LeaderboardEntry {
    LeaderboardEntry {
        rank: index + 1,
        id: skill.id,
        slug: skill.slug,
        name: skill.name,
        category: skill.category,
        install_count: skill.install_count,
    }
}
