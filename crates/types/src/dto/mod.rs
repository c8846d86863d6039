//! Request/response types for the HTTP API.

use serde::{Deserialize, Serialize};

pub mod leaderboard;
pub mod preferences;
pub mod skills;
pub mod users;

pub use leaderboard::{LeaderboardEntry, LeaderboardResponse};
pub use preferences::{
    PreferencesInfo, PreferencesResponse, UnsubscribeRequest, UnsubscribeResponse,
    UpdatePreferencesRequest,
};
pub use skills::{
    CreateSkillRequest, CreateSkillResponse, DeleteSkillResponse, GetSkillResponse,
    InstallSkillResponse, ListSkillsResponse, SkillDetail, SkillInfo, UpdateSkillRequest,
    UpdateSkillResponse,
};
pub use users::{
    GetUserProfileResponse, LoginRequest, LoginResponse, LogoutResponse, UpdateProfileRequest,
    UpdateProfileResponse, UserProfile,
};

/// Error payload returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error detail
    pub error: ErrorDetail,
}

/// Machine-readable error code plus a human-readable message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code (e.g. `VALIDATION_ERROR`)
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Build an error response from code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { error: ErrorDetail { code: code.into(), message: message.into() } }
    }
}
