use serde::{Deserialize, Serialize};

use crate::{PaginationMeta, entities::SkillCategory};

/// Request to publish a new skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSkillRequest {
    /// URL-safe unique identifier
    pub slug: String,
    /// Human-readable name
    pub name: String,
    /// One-line summary for listing pages
    pub summary: String,
    /// Full description for the detail page
    pub description: String,
    /// Listing category
    pub category: SkillCategory,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Response after publishing a skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSkillResponse {
    /// The created skill
    pub skill: SkillDetail,
}

/// Skill summary as shown on listing pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillInfo {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub summary: String,
    pub category: SkillCategory,
    pub tags: Vec<String>,
    pub author_id: i64,
    pub install_count: i64,
    pub updated_at: String,
}

/// Full skill record as shown on the detail page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDetail {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub summary: String,
    pub description: String,
    pub category: SkillCategory,
    pub tags: Vec<String>,
    pub author_id: i64,
    pub install_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Response for the skill listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSkillsResponse {
    /// Skills on this page
    pub skills: Vec<SkillInfo>,
    /// Pagination metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    /// JSON-LD `ItemList` structured data for the listing page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<serde_json::Value>,
}

/// Response for the skill detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSkillResponse {
    /// The skill
    pub skill: SkillDetail,
    /// JSON-LD `SoftwareApplication` structured data for the detail page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<serde_json::Value>,
}

/// Partial update of a skill; omitted fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSkillRequest {
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub category: Option<SkillCategory>,
    pub tags: Option<Vec<String>>,
}

/// Response after updating a skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSkillResponse {
    /// The updated skill
    pub skill: SkillDetail,
}

/// Response after soft-deleting a skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSkillResponse {
    pub message: String,
}

/// Response after recording an install
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallSkillResponse {
    /// Install count after the increment
    pub install_count: i64,
}
