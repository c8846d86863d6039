use std::backtrace::Backtrace;

use snafu::Snafu;

/// Result type alias for Skilldir operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared across the Skilldir workspace
///
/// Every variant captures a backtrace; construct errors through the helper
/// methods (`Error::validation("bad slug")`) rather than the generated
/// snafu selectors.
///
/// Unsubscribe-token verification deliberately has no variant here: it is a
/// total function returning `Option`, so malformed, forged and expired
/// tokens stay indistinguishable to callers.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Missing or inconsistent configuration, including token issuance
    /// without a signing secret
    #[snafu(display("Configuration error: {message}"))]
    Config { message: String, backtrace: Backtrace },

    /// Storage backend failures
    #[snafu(display("Storage error: {message}"))]
    Storage { message: String, backtrace: Backtrace },

    /// Login and session failures
    #[snafu(display("Authentication error: {message}"))]
    Auth { message: String, backtrace: Backtrace },

    /// Acting on a resource the session does not own
    #[snafu(display("Authorization error: {message}"))]
    Authz { message: String, backtrace: Backtrace },

    /// Rejected input: bad slugs, malformed emails, invalid unsubscribe
    /// links
    #[snafu(display("Validation error: {message}"))]
    Validation { message: String, backtrace: Backtrace },

    /// Lookup of a missing or soft-deleted resource
    #[snafu(display("Resource not found: {message}"))]
    NotFound { message: String, backtrace: Backtrace },

    /// Uniqueness conflicts, e.g. a claimed skill slug
    #[snafu(display("Resource already exists: {message}"))]
    AlreadyExists { message: String, backtrace: Backtrace },

    /// Upstream service failures (SMTP relay, identity provider)
    #[snafu(display("External service error: {message}"))]
    External { message: String, backtrace: Backtrace },

    /// Invariant violations that indicate a bug, not bad input
    #[snafu(display("Internal error: {message}"))]
    Internal { message: String, backtrace: Backtrace },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        ConfigSnafu { message: message.into() }.build()
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        StorageSnafu { message: message.into() }.build()
    }

    /// Create an authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        AuthSnafu { message: message.into() }.build()
    }

    /// Create an authorization error
    pub fn authz(message: impl Into<String>) -> Self {
        AuthzSnafu { message: message.into() }.build()
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ValidationSnafu { message: message.into() }.build()
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        NotFoundSnafu { message: message.into() }.build()
    }

    /// Create an already exists error
    pub fn already_exists(message: impl Into<String>) -> Self {
        AlreadyExistsSnafu { message: message.into() }.build()
    }

    /// Create an external service error
    pub fn external(message: impl Into<String>) -> Self {
        ExternalSnafu { message: message.into() }.build()
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        InternalSnafu { message: message.into() }.build()
    }

    /// HTTP status and stable client-facing code for each variant
    fn http(&self) -> (u16, &'static str) {
        match self {
            Error::Config { .. } => (500, "CONFIGURATION_ERROR"),
            Error::Storage { .. } => (500, "STORAGE_ERROR"),
            Error::Auth { .. } => (401, "AUTHENTICATION_ERROR"),
            Error::Authz { .. } => (403, "AUTHORIZATION_ERROR"),
            Error::Validation { .. } => (400, "VALIDATION_ERROR"),
            Error::NotFound { .. } => (404, "NOT_FOUND"),
            Error::AlreadyExists { .. } => (409, "ALREADY_EXISTS"),
            Error::External { .. } => (502, "EXTERNAL_SERVICE_ERROR"),
            Error::Internal { .. } => (500, "INTERNAL_ERROR"),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.http().0
    }

    /// Get error code for client consumption
    pub fn error_code(&self) -> &str {
        self.http().1
    }
}
