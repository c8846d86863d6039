//! Skill catalog handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use skilldir_core::{IdGenerator, seo};
use skilldir_types::{
    Error as CoreError, PaginationMeta,
    dto::{
        CreateSkillRequest, CreateSkillResponse, DeleteSkillResponse, GetSkillResponse,
        InstallSkillResponse, ListSkillsResponse, SkillDetail, SkillInfo, UpdateSkillRequest,
        UpdateSkillResponse,
    },
    entities::Skill,
};

use crate::{
    handlers::auth::{AppState, Result},
    middleware::SessionContext,
    pagination::PaginationQuery,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn skill_to_info(skill: &Skill) -> SkillInfo {
    SkillInfo {
        id: skill.id,
        slug: skill.slug.clone(),
        name: skill.name.clone(),
        summary: skill.summary.clone(),
        category: skill.category,
        tags: skill.tags.clone(),
        author_id: skill.author_id,
        install_count: skill.install_count,
        updated_at: skill.updated_at.to_rfc3339(),
    }
}

fn skill_to_detail(skill: Skill) -> SkillDetail {
    SkillDetail {
        id: skill.id,
        slug: skill.slug,
        name: skill.name,
        summary: skill.summary,
        description: skill.description,
        category: skill.category,
        tags: skill.tags,
        author_id: skill.author_id,
        install_count: skill.install_count,
        created_at: skill.created_at.to_rfc3339(),
        updated_at: skill.updated_at.to_rfc3339(),
    }
}

/// Load a live skill by slug or 404
async fn load_by_slug(state: &AppState, slug: &str) -> Result<Skill> {
    state
        .repositories()
        .skill
        .get_by_slug(slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Skill not found").into())
}

// ============================================================================
// Skill Catalog Endpoints
// ============================================================================

/// List live skills, newest first
///
/// GET /v1/skills?limit=50&offset=0
pub async fn list_skills(
    State(state): State<AppState>,
    pagination: PaginationQuery,
) -> Result<Json<ListSkillsResponse>> {
    let params = pagination.0.validate();

    let all_skills = state.repositories().skill.list_active().await?;
    let total = all_skills.len();

    let page: Vec<Skill> =
        all_skills.into_iter().skip(params.offset).take(params.limit).collect();

    let structured_data = seo::skill_list_jsonld(&state.config.public_url, &page);
    let skills: Vec<SkillInfo> = page.iter().map(skill_to_info).collect();
    let pagination_meta =
        PaginationMeta::from_total(total, params.offset, params.limit, skills.len());

    Ok(Json(ListSkillsResponse {
        skills,
        pagination: Some(pagination_meta),
        structured_data: Some(structured_data),
    }))
}

/// Publish a new skill
///
/// POST /v1/skills (login required)
pub async fn create_skill(
    State(state): State<AppState>,
    session: SessionContext,
    Json(payload): Json<CreateSkillRequest>,
) -> Result<(StatusCode, Json<CreateSkillResponse>)> {
    let repos = state.repositories();

    if !repos.skill.is_slug_available(&payload.slug).await? {
        return Err(CoreError::already_exists(format!(
            "Slug '{}' is already taken",
            payload.slug
        ))
        .into());
    }

    let skill = Skill::builder()
        .id(IdGenerator::next_id())
        .slug(payload.slug)
        .name(payload.name)
        .summary(payload.summary)
        .description(payload.description)
        .category(payload.category)
        .tags(payload.tags)
        .author_id(session.user.id)
        .create()?;

    repos.skill.create(skill.clone()).await?;
    tracing::info!(skill_id = skill.id, slug = %skill.slug, "Skill published");

    Ok((StatusCode::CREATED, Json(CreateSkillResponse { skill: skill_to_detail(skill) })))
}

/// Get a skill's detail page data
///
/// GET /v1/skills/{slug}
pub async fn get_skill(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<GetSkillResponse>> {
    let skill = load_by_slug(&state, &slug).await?;
    let structured_data = seo::skill_jsonld(&state.config.public_url, &skill);

    Ok(Json(GetSkillResponse {
        skill: skill_to_detail(skill),
        structured_data: Some(structured_data),
    }))
}

/// Update a skill
///
/// PATCH /v1/skills/{slug} (author only)
pub async fn update_skill(
    State(state): State<AppState>,
    session: SessionContext,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateSkillRequest>,
) -> Result<Json<UpdateSkillResponse>> {
    let mut skill = load_by_slug(&state, &slug).await?;

    if skill.author_id != session.user.id {
        return Err(CoreError::authz("Only the author can modify a skill").into());
    }

    if let Some(name) = payload.name {
        skill.set_name(name)?;
    }
    if let Some(summary) = payload.summary {
        skill.set_summary(summary)?;
    }
    if let Some(description) = payload.description {
        skill.set_description(description);
    }
    if let Some(category) = payload.category {
        skill.set_category(category);
    }
    if let Some(tags) = payload.tags {
        skill.set_tags(tags);
    }

    state.repositories().skill.update(skill.clone()).await?;
    Ok(Json(UpdateSkillResponse { skill: skill_to_detail(skill) }))
}

/// Unpublish a skill (soft delete)
///
/// DELETE /v1/skills/{slug} (author only)
pub async fn delete_skill(
    State(state): State<AppState>,
    session: SessionContext,
    Path(slug): Path<String>,
) -> Result<Json<DeleteSkillResponse>> {
    let skill = load_by_slug(&state, &slug).await?;

    if skill.author_id != session.user.id {
        return Err(CoreError::authz("Only the author can delete a skill").into());
    }

    state.repositories().skill.delete(skill).await?;
    Ok(Json(DeleteSkillResponse { message: "Skill deleted successfully".to_string() }))
}

/// Record one install of a skill
///
/// POST /v1/skills/{slug}/install
///
/// Public: coding agents install without accounts. The count feeds the
/// leaderboard ordering.
pub async fn install_skill(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<InstallSkillResponse>> {
    let skill = load_by_slug(&state, &slug).await?;
    let install_count = state.repositories().skill.record_install(skill.id).await?;

    Ok(Json(InstallSkillResponse { install_count }))
}
