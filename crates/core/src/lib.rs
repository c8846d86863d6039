#![deny(unsafe_code)]

//! # Skilldir Core
//!
//! Core business logic for the Skilldir service.
//!
//! ## Imports
//!
//! Import types from their source crates:
//! - Entity types: `skilldir_types::entities`
//! - DTOs: `skilldir_types::dto`
//! - Errors: `skilldir_types::Error`
//! - Config: `skilldir_config::Config`

pub mod cache;
pub mod campaign;
pub mod email;
pub mod id;
pub mod identity;
pub mod leaderboard;
pub mod logging;
pub mod repository;
pub mod seo;
pub mod unsubscribe;

pub use cache::{CacheConfig, ResponseCache};
pub use campaign::{CampaignSender, CampaignStats};
pub use email::{
    AnnouncementEmailTemplate, DigestItem, EmailSender, EmailService, EmailTemplate,
    MockEmailSender, SentEmail, SmtpEmailService, WeeklyDigestEmailTemplate, WelcomeEmailTemplate,
};
pub use id::IdGenerator;
pub use identity::{IdentityClaims, IdentityVerifier};
pub use leaderboard::Leaderboard;
pub use repository::{
    NotificationPreferencesRepository, RepositoryContext, SkillRepository, UserRepository,
    UserSessionRepository,
};
pub use unsubscribe::{UnsubscribeClaims, UnsubscribeTokens};
