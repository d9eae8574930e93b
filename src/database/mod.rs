//! Database module providing organized access to all database operations
//!
//! This module is organized into several sub-modules:
//! - `connection`: Database connection management, pool configuration and migrations
//! - `users`: User and session-token operations
//! - `resources`: Resource listing, moderation writes and counters
//! - `engagement`: Comment and review operations
//! - `analytics`: Download logging and statistics
//! - `service`: Main DatabaseService that provides a unified interface

pub mod analytics;
pub mod connection;
pub mod engagement;
pub mod resources;
pub mod service;
pub mod users;

// Re-export the main types and service for easy access
pub use connection::{DbConnection, DbPool, MIGRATIONS};
pub use service::DatabaseService;

// Re-export operation structs for advanced usage
pub use analytics::AnalyticsOperations;
pub use engagement::EngagementOperations;
pub use resources::ResourceOperations;
pub use users::UserOperations;
