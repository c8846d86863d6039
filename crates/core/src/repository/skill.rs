use skilldir_storage::{StorageBackend, Transaction, prefix_end};
use skilldir_types::{
    entities::Skill,
    error::{Error, Result},
};

/// Repository for Skill entity operations
///
/// Key schema:
/// - `skill:{id}` -> Skill data
/// - `skill_slug:{slug}` -> skill_id (for slug lookup)
///
/// The slug index only points at live skills: soft-deleting a skill drops
/// the index entry so the slug becomes claimable again, while the primary
/// record is kept.
pub struct SkillRepository<S: StorageBackend> {
    storage: S,
}

impl<S: StorageBackend> SkillRepository<S> {
    /// Create a new skill repository
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Generate key for skill by ID
    fn skill_key(id: i64) -> Vec<u8> {
        format!("skill:{id}").into_bytes()
    }

    /// Generate key for the slug index
    fn slug_index_key(slug: &str) -> Vec<u8> {
        format!("skill_slug:{slug}").into_bytes()
    }

    /// Create a new skill
    ///
    /// Stores the record and the slug index atomically. Callers check slug
    /// availability first; the last write wins on a race.
    pub async fn create(&self, skill: Skill) -> Result<()> {
        let skill_data = serde_json::to_vec(&skill)
            .map_err(|e| Error::internal(format!("Failed to serialize skill: {e}")))?;

        let mut txn = self
            .storage
            .transaction()
            .await
            .map_err(|e| Error::internal(format!("Failed to start transaction: {e}")))?;

        txn.set(Self::skill_key(skill.id), skill_data);
        txn.set(Self::slug_index_key(&skill.slug), skill.id.to_le_bytes().to_vec());

        txn.commit()
            .await
            .map_err(|e| Error::internal(format!("Failed to commit skill creation: {e}")))?;

        Ok(())
    }

    /// Get a skill by ID
    pub async fn get(&self, id: i64) -> Result<Option<Skill>> {
        let data = self
            .storage
            .get(&Self::skill_key(id))
            .await
            .map_err(|e| Error::internal(format!("Failed to get skill: {e}")))?;

        match data {
            Some(bytes) => {
                let skill: Skill = serde_json::from_slice(&bytes)
                    .map_err(|e| Error::internal(format!("Failed to deserialize skill: {e}")))?;
                Ok(Some(skill))
            },
            None => Ok(None),
        }
    }

    /// Get a live skill by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Skill>> {
        let data = self
            .storage
            .get(&Self::slug_index_key(slug))
            .await
            .map_err(|e| Error::internal(format!("Failed to get skill by slug: {e}")))?;

        match data {
            Some(bytes) => {
                let id = super::parse_i64_id(&bytes)?;
                self.get(id).await
            },
            None => Ok(None),
        }
    }

    /// Check if a slug is free to claim
    pub async fn is_slug_available(&self, slug: &str) -> Result<bool> {
        Ok(self.get_by_slug(slug).await?.is_none())
    }

    /// Update an existing skill (slug is immutable)
    pub async fn update(&self, skill: Skill) -> Result<()> {
        self.get(skill.id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Skill {} not found", skill.id)))?;

        let skill_data = serde_json::to_vec(&skill)
            .map_err(|e| Error::internal(format!("Failed to serialize skill: {e}")))?;

        self.storage
            .set(Self::skill_key(skill.id), skill_data)
            .await
            .map_err(|e| Error::internal(format!("Failed to update skill: {e}")))?;

        Ok(())
    }

    /// Soft-delete a skill and release its slug
    pub async fn delete(&self, mut skill: Skill) -> Result<()> {
        skill.mark_deleted();

        let skill_data = serde_json::to_vec(&skill)
            .map_err(|e| Error::internal(format!("Failed to serialize skill: {e}")))?;

        let mut txn = self
            .storage
            .transaction()
            .await
            .map_err(|e| Error::internal(format!("Failed to start transaction: {e}")))?;

        txn.set(Self::skill_key(skill.id), skill_data);
        txn.delete(Self::slug_index_key(&skill.slug));

        txn.commit()
            .await
            .map_err(|e| Error::internal(format!("Failed to commit skill deletion: {e}")))?;

        Ok(())
    }

    /// Record one install and return the new count
    pub async fn record_install(&self, id: i64) -> Result<i64> {
        let mut skill =
            self.get(id).await?.ok_or_else(|| Error::not_found(format!("Skill {id} not found")))?;

        skill.record_install();
        let count = skill.install_count;
        self.update(skill).await?;
        Ok(count)
    }

    /// List all live skills, newest first
    pub async fn list_active(&self) -> Result<Vec<Skill>> {
        let prefix = b"skill:".to_vec();
        let range = match prefix_end(&prefix) {
            Some(end) => self.storage.get_range(prefix..end).await,
            None => self.storage.get_range(prefix..).await,
        }
        .map_err(|e| Error::internal(format!("Failed to list skills: {e}")))?;

        let mut skills = Vec::with_capacity(range.len());
        for kv in range {
            let skill: Skill = serde_json::from_slice(&kv.value)
                .map_err(|e| Error::internal(format!("Failed to deserialize skill: {e}")))?;
            if skill.is_active() {
                skills.push(skill);
            }
        }
        // Snowflake IDs are time-ordered, so descending ID is newest first
        skills.sort_by_key(|s| std::cmp::Reverse(s.id));
        Ok(skills)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use skilldir_storage::MemoryBackend;
    use skilldir_types::entities::SkillCategory;

    use super::*;

    fn test_skill(id: i64, slug: &str) -> Skill {
        Skill::builder()
            .id(id)
            .slug(slug)
            .name("Coverage Gap Finder")
            .summary("Maps untested branches")
            .description("Finds code paths without test coverage.")
            .category(SkillCategory::UnitTesting)
            .author_id(7)
            .create()
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_lookup_by_slug() {
        let repo = SkillRepository::new(MemoryBackend::new());
        repo.create(test_skill(1, "coverage-gap-finder")).await.unwrap();

        let found = repo.get_by_slug("coverage-gap-finder").await.unwrap().unwrap();
        assert_eq!(found.id, 1);
        assert!(!repo.is_slug_available("coverage-gap-finder").await.unwrap());
        assert!(repo.is_slug_available("something-else").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_releases_slug_but_keeps_record() {
        let repo = SkillRepository::new(MemoryBackend::new());
        let skill = test_skill(1, "short-lived");
        repo.create(skill.clone()).await.unwrap();

        repo.delete(skill).await.unwrap();

        assert!(repo.get_by_slug("short-lived").await.unwrap().is_none());
        assert!(repo.is_slug_available("short-lived").await.unwrap());
        // Primary record survives as a tombstone
        let record = repo.get(1).await.unwrap().unwrap();
        assert!(!record.is_active());
    }

    #[tokio::test]
    async fn test_record_install_accumulates() {
        let repo = SkillRepository::new(MemoryBackend::new());
        repo.create(test_skill(1, "counted")).await.unwrap();

        assert_eq!(repo.record_install(1).await.unwrap(), 1);
        assert_eq!(repo.record_install(1).await.unwrap(), 2);
        assert!(repo.record_install(99).await.is_err());
    }

    #[tokio::test]
    async fn test_list_active_is_newest_first() {
        let repo = SkillRepository::new(MemoryBackend::new());
        repo.create(test_skill(10, "older")).await.unwrap();
        repo.create(test_skill(20, "newer")).await.unwrap();

        let deleted = test_skill(30, "deleted");
        repo.create(deleted.clone()).await.unwrap();
        repo.delete(deleted).await.unwrap();

        let skills = repo.list_active().await.unwrap();
        assert_eq!(skills.iter().map(|s| s.id).collect::<Vec<_>>(), vec![20, 10]);
    }
}
