pub mod auth;
pub mod engagement;
pub mod moderation;
pub mod policy;
pub mod resources;

pub use crate::database::DatabaseService;
pub use auth::AuthService;
pub use engagement::EngagementService;
pub use moderation::ModerationService;
pub use resources::ResourceService;
