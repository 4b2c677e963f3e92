//! Per-user notification preferences.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{
  EmailNotifications, NotificationPreferences, NotificationSchedule, WhatsAppNotifications,
};
pub use errors::NotificationError;
pub use ports::NotificationPreferencesRepository;
pub use services::NotificationService;
