//! Entity types persisted by the repositories.

pub mod notification_preferences;
pub mod skill;
pub mod user;
pub mod user_session;

pub use notification_preferences::{NotificationKind, NotificationPreferences};
pub use skill::{Skill, SkillCategory};
pub use user::User;
pub use user_session::UserSession;
