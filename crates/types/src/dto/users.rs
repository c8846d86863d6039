use serde::{Deserialize, Serialize};

/// Request to log in with an identity-provider ID token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Signed ID token issued by the identity provider
    pub id_token: String,
}

/// Response after a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Profile of the logged-in user
    pub user: UserProfile,
}

/// Response after logout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Public view of a user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

/// Response for the current-user endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserProfileResponse {
    pub user: UserProfile,
}

/// Partial update of the current user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Response after updating the profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub user: UserProfile,
}
