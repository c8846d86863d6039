use skilldir_storage::{StorageBackend, Transaction, prefix_end};
use skilldir_types::{
    entities::User,
    error::{Error, Result},
};

/// Repository for User entity operations
///
/// Key schema:
/// - `user:{id}` -> User data
/// - `user_subject:{provider_subject}` -> user_id (for login lookup)
pub struct UserRepository<S: StorageBackend> {
    storage: S,
}

impl<S: StorageBackend> UserRepository<S> {
    /// Create a new user repository
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Generate key for user by ID
    fn user_key(id: i64) -> Vec<u8> {
        format!("user:{id}").into_bytes()
    }

    /// Generate key for the identity-provider subject index
    fn subject_index_key(subject: &str) -> Vec<u8> {
        format!("user_subject:{subject}").into_bytes()
    }

    /// Create a new user
    ///
    /// Stores the record and the subject index atomically.
    pub async fn create(&self, user: User) -> Result<()> {
        let user_data = serde_json::to_vec(&user)
            .map_err(|e| Error::internal(format!("Failed to serialize user: {e}")))?;

        let mut txn = self
            .storage
            .transaction()
            .await
            .map_err(|e| Error::internal(format!("Failed to start transaction: {e}")))?;

        txn.set(Self::user_key(user.id), user_data);
        txn.set(Self::subject_index_key(&user.provider_subject), user.id.to_le_bytes().to_vec());

        txn.commit()
            .await
            .map_err(|e| Error::internal(format!("Failed to commit user creation: {e}")))?;

        Ok(())
    }

    /// Get a user by ID
    pub async fn get(&self, id: i64) -> Result<Option<User>> {
        let data = self
            .storage
            .get(&Self::user_key(id))
            .await
            .map_err(|e| Error::internal(format!("Failed to get user: {e}")))?;

        match data {
            Some(bytes) => {
                let user: User = serde_json::from_slice(&bytes)
                    .map_err(|e| Error::internal(format!("Failed to deserialize user: {e}")))?;
                Ok(Some(user))
            },
            None => Ok(None),
        }
    }

    /// Get a user by identity-provider subject
    pub async fn get_by_subject(&self, subject: &str) -> Result<Option<User>> {
        let data = self
            .storage
            .get(&Self::subject_index_key(subject))
            .await
            .map_err(|e| Error::internal(format!("Failed to get user by subject: {e}")))?;

        match data {
            Some(bytes) => {
                let id = super::parse_i64_id(&bytes)?;
                self.get(id).await
            },
            None => Ok(None),
        }
    }

    /// Update an existing user
    pub async fn update(&self, user: User) -> Result<()> {
        self.get(user.id)
            .await?
            .ok_or_else(|| Error::not_found(format!("User {} not found", user.id)))?;

        let user_data = serde_json::to_vec(&user)
            .map_err(|e| Error::internal(format!("Failed to serialize user: {e}")))?;

        self.storage
            .set(Self::user_key(user.id), user_data)
            .await
            .map_err(|e| Error::internal(format!("Failed to update user: {e}")))?;

        Ok(())
    }

    /// List all active (non-deleted) users, ordered by ID
    ///
    /// Used by email campaigns to enumerate recipients.
    pub async fn list_active(&self) -> Result<Vec<User>> {
        let prefix = b"user:".to_vec();
        let range = match prefix_end(&prefix) {
            Some(end) => self.storage.get_range(prefix..end).await,
            None => self.storage.get_range(prefix..).await,
        }
        .map_err(|e| Error::internal(format!("Failed to list users: {e}")))?;

        let mut users = Vec::with_capacity(range.len());
        for kv in range {
            let user: User = serde_json::from_slice(&kv.value)
                .map_err(|e| Error::internal(format!("Failed to deserialize user: {e}")))?;
            if user.is_active() {
                users.push(user);
            }
        }
        users.sort_by_key(|u| u.id);
        Ok(users)
    }
}
