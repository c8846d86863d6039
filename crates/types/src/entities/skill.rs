use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skilldir_const::limits::{MAX_SKILL_NAME_LENGTH, MAX_SKILL_SUMMARY_LENGTH, MAX_SLUG_LENGTH};

use crate::error::{Error, Result};

/// Skill category in the directory
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkillCategory {
    /// Unit-level test generation and assertion authoring
    UnitTesting,
    /// Browser / end-to-end flow testing
    EndToEnd,
    /// API contract and integration testing
    ApiTesting,
    /// Property-based and fuzz testing
    Fuzzing,
    /// Performance and load testing
    Performance,
    /// Accessibility audits
    Accessibility,
    /// Anything that does not fit the above
    Other,
}

/// A published QA testing skill
///
/// Skills are the directory's listings: installable test-automation
/// capabilities published by users for consumption by coding agents. The
/// slug is the public identifier used in URLs and the sitemap; it is unique
/// among active skills and never reused while the skill is live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Skill {
    /// Unique skill ID (Snowflake ID)
    pub id: i64,

    /// URL-safe unique identifier (lowercase alphanumerics and hyphens)
    pub slug: String,

    /// Human-readable name
    pub name: String,

    /// One-line summary shown on listing pages
    pub summary: String,

    /// Full description shown on the detail page
    pub description: String,

    /// Category used for listing filters
    pub category: SkillCategory,

    /// Free-form tags
    pub tags: Vec<String>,

    /// ID of the publishing user
    pub author_id: i64,

    /// Number of recorded installs, the leaderboard ordering metric
    pub install_count: i64,

    /// When the skill was published
    pub created_at: DateTime<Utc>,

    /// When the skill was last modified (drives sitemap lastmod)
    pub updated_at: DateTime<Utc>,

    /// When the skill was soft-deleted (if at all)
    pub deleted_at: Option<DateTime<Utc>>,
}

#[bon::bon]
impl Skill {
    /// Create a new skill
    ///
    /// Validates slug format and field lengths.
    #[builder(on(String, into), finish_fn = create)]
    pub fn new(
        id: i64,
        slug: String,
        name: String,
        summary: String,
        description: String,
        category: SkillCategory,
        #[builder(default)] tags: Vec<String>,
        author_id: i64,
    ) -> Result<Self> {
        validate_slug(&slug)?;
        validate_name(&name)?;
        validate_summary(&summary)?;

        let now = Utc::now();
        Ok(Self {
            id,
            slug,
            name,
            summary,
            description,
            category,
            tags,
            author_id,
            install_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    /// Update the name
    pub fn set_name(&mut self, name: String) -> Result<()> {
        validate_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Update the summary
    pub fn set_summary(&mut self, summary: String) -> Result<()> {
        validate_summary(&summary)?;
        self.summary = summary;
        self.touch();
        Ok(())
    }

    /// Update the description
    pub fn set_description(&mut self, description: String) {
        self.description = description;
        self.touch();
    }

    /// Update the category
    pub fn set_category(&mut self, category: SkillCategory) {
        self.category = category;
        self.touch();
    }

    /// Replace the tag list
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
        self.touch();
    }

    /// Record one install
    pub fn record_install(&mut self) {
        self.install_count += 1;
    }

    /// Mark the skill as deleted at the current time
    pub fn mark_deleted(&mut self) {
        self.deleted_at = Some(Utc::now());
    }

    /// Whether the skill is live (not soft-deleted)
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Validates slug format: 1..=64 chars of lowercase alphanumerics and
/// hyphens, no leading/trailing/double hyphen.
fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        return Err(Error::validation(format!(
            "Slug must be between 1 and {MAX_SLUG_LENGTH} characters"
        )));
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(Error::validation(
            "Slug may only contain lowercase letters, digits and hyphens",
        ));
    }
    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err(Error::validation("Slug must not start, end or repeat a hyphen"));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Skill name must not be empty"));
    }
    if name.len() > MAX_SKILL_NAME_LENGTH {
        return Err(Error::validation(format!(
            "Skill name exceeds maximum length of {MAX_SKILL_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_summary(summary: &str) -> Result<()> {
    if summary.len() > MAX_SKILL_SUMMARY_LENGTH {
        return Err(Error::validation(format!(
            "Summary exceeds maximum length of {MAX_SKILL_SUMMARY_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn test_skill(slug: &str) -> Result<Skill> {
        Skill::builder()
            .id(1)
            .slug(slug)
            .name("Flaky Test Hunter")
            .summary("Finds flaky tests by rerunning suites")
            .description("Reruns test suites and bisects nondeterminism.")
            .category(SkillCategory::UnitTesting)
            .author_id(7)
            .create()
    }

    #[test]
    fn test_new_skill() {
        let skill = test_skill("flaky-test-hunter").unwrap();
        assert_eq!(skill.install_count, 0);
        assert!(skill.is_active());
        assert_eq!(skill.created_at, skill.updated_at);
    }

    #[test]
    fn test_slug_validation() {
        for bad in ["", "Has-Upper", "under_score", "-leading", "trailing-", "dou--ble", "spa ce"] {
            assert!(test_skill(bad).is_err(), "{bad:?} should be rejected");
        }
        for good in ["a", "flaky-test-hunter", "e2e-runner-2"] {
            assert!(test_skill(good).is_ok(), "{good:?} should be accepted");
        }
    }

    #[test]
    fn test_record_install_increments() {
        let mut skill = test_skill("counter").unwrap();
        skill.record_install();
        skill.record_install();
        assert_eq!(skill.install_count, 2);
    }

    #[test]
    fn test_updates_touch_updated_at() {
        let mut skill = test_skill("touched").unwrap();
        let before = skill.updated_at;
        skill.set_description("Now with coverage reports.".to_string());
        assert!(skill.updated_at >= before);
    }

    #[test]
    fn test_category_string_roundtrip() {
        assert_eq!(SkillCategory::EndToEnd.to_string(), "end_to_end");
        assert_eq!("api_testing".parse::<SkillCategory>().unwrap(), SkillCategory::ApiTesting);
    }
}
