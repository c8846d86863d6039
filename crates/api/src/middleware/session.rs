//! Session authentication.
//!
//! [`SessionContext`] is an extractor rather than a router layer because
//! several paths mix public and login-required methods (e.g. `GET
//! /v1/skills` is public while `POST /v1/skills` is not); a per-handler
//! extractor keeps the router flat while protected handlers simply take a
//! `SessionContext` argument.

use axum::{extract::FromRequestParts, http::request::Parts};
use skilldir_types::{
    Error as CoreError,
    entities::{User, UserSession},
};

use crate::handlers::auth::{ApiError, AppState, extract_session_token};

/// Context for an authenticated request
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// The logged-in user
    pub user: User,
    /// The session backing this request
    pub session: UserSession,
}

impl FromRequestParts<AppState> for SessionContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(&parts.headers)
            .ok_or_else(|| CoreError::auth("Authentication required"))?;

        let repos = state.repositories();

        let session = repos
            .session
            .get_by_token(&token)
            .await?
            .filter(UserSession::is_valid)
            .ok_or_else(|| CoreError::auth("Session is invalid or expired"))?;

        let user = repos
            .user
            .get(session.user_id)
            .await?
            .filter(User::is_active)
            .ok_or_else(|| CoreError::auth("Account is no longer active"))?;

        Ok(SessionContext { user, session })
    }
}
