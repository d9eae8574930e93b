// Re-export all models from their respective modules
pub mod analytics;
pub mod auth;
pub mod engagement;
pub mod resource;
pub mod user;

// Re-export commonly used models
pub use analytics::*;
pub use auth::*;
pub use engagement::*;
pub use resource::*;
pub use user::*;
