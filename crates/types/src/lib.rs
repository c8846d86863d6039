//! # Skilldir Types
//!
//! Shared type definitions for the Skilldir service.
//!
//! This crate provides all core types used across the workspace, ensuring a
//! single source of truth and preventing circular dependencies.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

// ============================================================================
// Error Types
// ============================================================================

pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Pagination Types
// ============================================================================

/// Pagination metadata for listing responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Total number of items (if known)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,

    /// Number of items in this page
    pub count: usize,

    /// Current offset
    pub offset: usize,

    /// Items per page
    pub limit: usize,

    /// Whether there are more items
    pub has_more: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from total count
    pub fn from_total(total: usize, offset: usize, limit: usize, count: usize) -> Self {
        Self { total: Some(total), count, offset, limit, has_more: offset + count < total }
    }
}

// ============================================================================
// Entity Types
// ============================================================================

pub mod entities;

pub use entities::{
    NotificationKind, NotificationPreferences, Skill, SkillCategory, User, UserSession,
};

// ============================================================================
// Request/Response Types
// ============================================================================

pub mod dto;

pub use dto::{
    CreateSkillRequest,
    CreateSkillResponse,
    DeleteSkillResponse,
    ErrorResponse,
    GetSkillResponse,
    GetUserProfileResponse,
    InstallSkillResponse,
    LeaderboardEntry,
    LeaderboardResponse,
    ListSkillsResponse,
    LoginRequest,
    LoginResponse,
    LogoutResponse,
    PreferencesInfo,
    PreferencesResponse,
    SkillDetail,
    SkillInfo,
    UnsubscribeRequest,
    UnsubscribeResponse,
    UpdatePreferencesRequest,
    UpdateProfileRequest,
    UpdateProfileResponse,
    UpdateSkillRequest,
    UpdateSkillResponse,
    UserProfile,
};
