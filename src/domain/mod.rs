pub mod analytics;
pub mod auth;
pub mod expense;
pub mod invoice;
pub mod ledger;
pub mod notification;
pub mod pagination;
pub mod work;

// Re-export auth module for easier access
pub use auth::*;
