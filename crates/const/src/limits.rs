//! Business constraint constants.

/// Default number of items per page for listing endpoints.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Maximum number of items per page for listing endpoints.
pub const MAX_PAGE_LIMIT: usize = 200;

/// Default number of entries returned by the leaderboard endpoint.
pub const LEADERBOARD_DEFAULT_LIMIT: usize = 25;

/// Maximum number of entries the leaderboard endpoint will return.
pub const LEADERBOARD_MAX_LIMIT: usize = 100;

/// Number of recipients per outbound email batch.
pub const EMAIL_BATCH_SIZE: usize = 25;

/// Fixed delay between email batches, in milliseconds.
///
/// Keeps campaign sends under provider rate limits.
pub const EMAIL_BATCH_DELAY_MS: u64 = 1_000;

/// Maximum skill slug length.
pub const MAX_SLUG_LENGTH: usize = 64;

/// Maximum skill name length.
pub const MAX_SKILL_NAME_LENGTH: usize = 120;

/// Maximum skill summary length.
pub const MAX_SKILL_SUMMARY_LENGTH: usize = 280;
