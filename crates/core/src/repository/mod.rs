//! Repositories over the key-value storage backend.
//!
//! Each repository owns a key schema and serializes entities as JSON.
//! Secondary indexes store the 8-byte little-endian entity ID under their
//! own top-level prefix so primary-record range scans never collide with
//! index keys.

use skilldir_storage::StorageBackend;
use skilldir_types::error::{Error, Result};

pub mod notification_preferences;
pub mod skill;
pub mod user;
pub mod user_session;

pub use notification_preferences::NotificationPreferencesRepository;
pub use skill::SkillRepository;
pub use user::UserRepository;
pub use user_session::UserSessionRepository;

/// Parse an 8-byte little-endian ID from index bytes
fn parse_i64_id(bytes: &[u8]) -> Result<i64> {
    let array: [u8; 8] = bytes
        .try_into()
        .map_err(|_| Error::internal("Invalid index entry: expected 8 bytes".to_string()))?;
    Ok(i64::from_le_bytes(array))
}

/// All repositories bundled over one storage handle
///
/// Handlers construct this per request from the shared backend; repository
/// handles are cheap clones of the same storage.
pub struct RepositoryContext<S: StorageBackend> {
    pub user: UserRepository<S>,
    pub skill: SkillRepository<S>,
    pub preferences: NotificationPreferencesRepository<S>,
    pub session: UserSessionRepository<S>,
}

impl<S: StorageBackend> RepositoryContext<S> {
    /// Create a repository context from a storage handle
    pub fn new(storage: S) -> Self {
        Self {
            user: UserRepository::new(storage.clone()),
            skill: SkillRepository::new(storage.clone()),
            preferences: NotificationPreferencesRepository::new(storage.clone()),
            session: UserSessionRepository::new(storage),
        }
    }
}
