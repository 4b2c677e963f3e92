pub mod config;
pub mod dispatch;
pub mod metrics;
pub mod persistence;
pub mod security;
pub mod wiring;
