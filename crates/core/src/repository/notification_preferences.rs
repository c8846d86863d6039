use skilldir_storage::StorageBackend;
use skilldir_types::{
    entities::NotificationPreferences,
    error::{Error, Result},
};

/// Repository for per-user notification preferences
///
/// Key schema:
/// - `prefs:{user_id}` -> NotificationPreferences data
///
/// Absence of a record means the user never changed anything; reads fall
/// back to the all-enabled defaults without writing them.
pub struct NotificationPreferencesRepository<S: StorageBackend> {
    storage: S,
}

impl<S: StorageBackend> NotificationPreferencesRepository<S> {
    /// Create a new preferences repository
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Generate key for preferences by user ID
    fn prefs_key(user_id: i64) -> Vec<u8> {
        format!("prefs:{user_id}").into_bytes()
    }

    /// Get stored preferences for a user, if any
    pub async fn get(&self, user_id: i64) -> Result<Option<NotificationPreferences>> {
        let data = self
            .storage
            .get(&Self::prefs_key(user_id))
            .await
            .map_err(|e| Error::internal(format!("Failed to get preferences: {e}")))?;

        match data {
            Some(bytes) => {
                let prefs: NotificationPreferences = serde_json::from_slice(&bytes).map_err(
                    |e| Error::internal(format!("Failed to deserialize preferences: {e}")),
                )?;
                Ok(Some(prefs))
            },
            None => Ok(None),
        }
    }

    /// Get preferences for a user, falling back to defaults
    pub async fn get_or_default(&self, user_id: i64) -> Result<NotificationPreferences> {
        Ok(self.get(user_id).await?.unwrap_or_else(|| NotificationPreferences::new(user_id)))
    }

    /// Store preferences (create or replace)
    pub async fn upsert(&self, prefs: NotificationPreferences) -> Result<()> {
        let data = serde_json::to_vec(&prefs)
            .map_err(|e| Error::internal(format!("Failed to serialize preferences: {e}")))?;

        self.storage
            .set(Self::prefs_key(prefs.user_id), data)
            .await
            .map_err(|e| Error::internal(format!("Failed to store preferences: {e}")))?;

        Ok(())
    }
}
