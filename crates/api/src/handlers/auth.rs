//! Login, logout and profile handlers, plus the shared application state
//! and API error type.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use skilldir_config::Config;
use skilldir_const::auth::{SESSION_COOKIE_NAME, SESSION_TTL_SECONDS};
use skilldir_core::{
    CacheConfig, EmailService, EmailTemplate, IdGenerator, IdentityVerifier, Leaderboard,
    RepositoryContext, UnsubscribeTokens, WelcomeEmailTemplate,
    email::MockEmailSender,
};
use skilldir_storage::Backend;
use skilldir_types::{
    Error as CoreError, ErrorResponse,
    dto::{
        GetUserProfileResponse, LoginRequest, LoginResponse, LogoutResponse,
        UpdateProfileRequest, UpdateProfileResponse, UserProfile,
    },
    entities::{User, UserSession},
};

/// Result type for API handlers
pub type Result<T> = std::result::Result<T, ApiError>;

/// Shared application state
///
/// All external collaborators (identity verifier, email service) are
/// constructed once at startup and injected here; handlers never build
/// clients lazily.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend shared by all repositories
    pub storage: Arc<Backend>,
    /// Validated service configuration
    pub config: Arc<Config>,
    /// Identity-provider token verifier
    pub identity: Arc<IdentityVerifier>,
    /// Outbound email service, when configured
    pub email: Option<Arc<EmailService>>,
    /// Unsubscribe token service
    pub unsubscribe_tokens: UnsubscribeTokens,
    /// Cached leaderboard service
    pub leaderboard: Leaderboard,
}

impl AppState {
    /// Assemble application state from startup-constructed collaborators
    pub fn new(
        storage: Arc<Backend>,
        config: Arc<Config>,
        identity: Arc<IdentityVerifier>,
        email: Option<Arc<EmailService>>,
    ) -> Self {
        let unsubscribe_tokens = UnsubscribeTokens::new(
            config.unsubscribe_secret.clone(),
            config.session_secret.clone(),
        );
        let leaderboard = Leaderboard::new(&CacheConfig::new(
            config.leaderboard_cache_entries,
            config.leaderboard_cache_ttl_secs,
        ));
        Self { storage, config, identity, email, unsubscribe_tokens, leaderboard }
    }

    /// State for integration tests: memory storage, mock email, a known
    /// identity-provider secret, and a disabled leaderboard cache so tests
    /// observe writes immediately.
    pub fn new_test(storage: Arc<Backend>) -> Self {
        let config = Arc::new(
            Config::builder()
                .public_url("https://skilldir.test")
                .unsubscribe_secret(test_support::UNSUBSCRIBE_SECRET)
                .idp_issuer(test_support::IDP_ISSUER)
                .idp_audience(test_support::IDP_AUDIENCE)
                .idp_secret(test_support::IDP_SECRET)
                .build(),
        );
        let identity = Arc::new(IdentityVerifier::new(
            test_support::IDP_ISSUER,
            test_support::IDP_AUDIENCE,
            test_support::IDP_SECRET,
        ));
        let email = Some(Arc::new(EmailService::new(Box::new(MockEmailSender::new()))));

        let unsubscribe_tokens = UnsubscribeTokens::new(
            config.unsubscribe_secret.clone(),
            config.session_secret.clone(),
        );
        Self {
            storage,
            config,
            identity,
            email,
            unsubscribe_tokens,
            leaderboard: Leaderboard::new(&CacheConfig::disabled()),
        }
    }

    /// Repositories over this state's storage
    pub fn repositories(&self) -> RepositoryContext<Backend> {
        RepositoryContext::new((*self.storage).clone())
    }
}

/// Well-known values for test state; shared with the test fixtures crate
pub mod test_support {
    /// Identity-provider issuer used by `AppState::new_test`
    pub const IDP_ISSUER: &str = "https://idp.skilldir.test";
    /// Identity-provider audience used by `AppState::new_test`
    pub const IDP_AUDIENCE: &str = "skilldir-test";
    /// Identity-provider HS256 secret used by `AppState::new_test`
    pub const IDP_SECRET: &str = "test-idp-secret";
    /// Unsubscribe token secret used by `AppState::new_test`
    pub const UNSUBSCRIBE_SECRET: &str = "test-unsubscribe-secret";
}

/// API error wrapper around the shared error enum
///
/// Renders as `{ "error": { "code", "message" } }` with the status from
/// [`CoreError::status_code`]. Messages of 500-class errors are replaced
/// with a generic string; the original is logged server-side.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed with server error");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorResponse::new(self.0.error_code(), message))).into_response()
    }
}

/// Build the `Set-Cookie` value for a new session
fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECONDS}"
    )
}

/// Build the `Set-Cookie` value that clears the session cookie
fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Extract the session token from a request's `Cookie` header
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE_NAME && !value.is_empty()).then(|| value.to_string())
    })
}

/// Convert a user entity to its public profile view
pub fn user_to_profile(user: &User) -> UserProfile {
    UserProfile {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        created_at: user.created_at.to_rfc3339(),
    }
}

/// Log in with an identity-provider ID token
///
/// POST /v1/auth/login
///
/// Verifies the ID token, provisions the account on first login, creates a
/// server-side session and sets the session cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response> {
    let claims = state.identity.verify(&payload.id_token)?;

    let repos = state.repositories();
    let (user, first_login) = match repos.user.get_by_subject(&claims.sub).await? {
        Some(user) if user.is_active() => (user, false),
        Some(_) => return Err(CoreError::auth("Account is deactivated").into()),
        None => {
            let user = User::builder()
                .id(IdGenerator::next_id())
                .provider_subject(claims.sub.clone())
                .name(claims.name.clone())
                .email(claims.email.clone())
                .create()?;
            repos.user.create(user.clone()).await?;
            tracing::info!(user_id = user.id, "Provisioned account on first login");
            (user, true)
        },
    };

    let session =
        UserSession::new(IdGenerator::next_id(), user.id, UserSession::generate_token());
    repos.session.create(session.clone()).await?;

    // Welcome mail is best-effort; login must not fail on SMTP trouble
    if first_login && let Some(email) = &state.email {
        let template = WelcomeEmailTemplate {
            name: user.name.clone(),
            public_url: state.config.public_url.clone(),
        };
        if let Err(e) = email
            .send_email(&user.email, &template.subject(), &template.body_html(), &template.body_text())
            .await
        {
            tracing::warn!(user_id = user.id, error = %e, "Failed to send welcome email");
        }
    }

    let body = Json(LoginResponse { user: user_to_profile(&user) });
    Ok(([(header::SET_COOKIE, session_cookie(&session.token))], body).into_response())
}

/// Log out the current session
///
/// POST /v1/auth/logout
///
/// Revokes the session referenced by the cookie when present, and clears
/// the cookie either way.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    if let Some(token) = extract_session_token(&headers) {
        let repos = state.repositories();
        if let Some(mut session) = repos.session.get_by_token(&token).await? {
            session.revoke();
            repos.session.update(session).await?;
        }
    }

    let body = Json(LogoutResponse { message: "Logged out".to_string() });
    Ok(([(header::SET_COOKIE, clear_session_cookie())], body).into_response())
}

/// Get the current user's profile
///
/// GET /v1/users/me
pub async fn get_profile(
    session: crate::middleware::SessionContext,
) -> Result<Json<GetUserProfileResponse>> {
    Ok(Json(GetUserProfileResponse { user: user_to_profile(&session.user) }))
}

/// Update the current user's profile
///
/// PATCH /v1/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    session: crate::middleware::SessionContext,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>> {
    let repos = state.repositories();
    let mut user = session.user;

    if let Some(name) = payload.name {
        user.set_name(name)?;
    }
    if let Some(email) = payload.email {
        user.set_email(email)?;
    }

    repos.user.update(user.clone()).await?;
    Ok(Json(UpdateProfileResponse { user: user_to_profile(&user) }))
}
