//! Notification preference use cases

mod get_preferences;
mod update_preferences;

pub use get_preferences::GetNotificationPreferencesUseCase;
pub use update_preferences::{UpdateNotificationPreferencesCommand, UpdateNotificationPreferencesUseCase};
