use skilldir_storage::StorageBackend;
use skilldir_types::{
    entities::UserSession,
    error::{Error, Result},
};

/// Repository for login sessions
///
/// Key schema:
/// - `session:{token}` -> UserSession data
///
/// Sessions are keyed by their opaque token since that is the only handle
/// the cookie carries. Expired and revoked records are left in place; the
/// validity check happens on read.
pub struct UserSessionRepository<S: StorageBackend> {
    storage: S,
}

impl<S: StorageBackend> UserSessionRepository<S> {
    /// Create a new session repository
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Generate key for session by token
    fn session_key(token: &str) -> Vec<u8> {
        format!("session:{token}").into_bytes()
    }

    /// Store a new session
    pub async fn create(&self, session: UserSession) -> Result<()> {
        let data = serde_json::to_vec(&session)
            .map_err(|e| Error::internal(format!("Failed to serialize session: {e}")))?;

        self.storage
            .set(Self::session_key(&session.token), data)
            .await
            .map_err(|e| Error::internal(format!("Failed to store session: {e}")))?;

        Ok(())
    }

    /// Get a session by its token
    pub async fn get_by_token(&self, token: &str) -> Result<Option<UserSession>> {
        let data = self
            .storage
            .get(&Self::session_key(token))
            .await
            .map_err(|e| Error::internal(format!("Failed to get session: {e}")))?;

        match data {
            Some(bytes) => {
                let session: UserSession = serde_json::from_slice(&bytes)
                    .map_err(|e| Error::internal(format!("Failed to deserialize session: {e}")))?;
                Ok(Some(session))
            },
            None => Ok(None),
        }
    }

    /// Update a stored session (e.g. after revocation)
    pub async fn update(&self, session: UserSession) -> Result<()> {
        let data = serde_json::to_vec(&session)
            .map_err(|e| Error::internal(format!("Failed to serialize session: {e}")))?;

        self.storage
            .set(Self::session_key(&session.token), data)
            .await
            .map_err(|e| Error::internal(format!("Failed to update session: {e}")))?;

        Ok(())
    }
}
