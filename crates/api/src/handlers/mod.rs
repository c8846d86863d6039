pub mod auth;
pub mod health;
pub mod leaderboard;
pub mod preferences;
pub mod seo;
pub mod skills;
pub mod unsubscribe;

pub use auth::{ApiError, AppState, login, logout};
pub use health::{healthz_handler, livez_handler, readyz_handler};
