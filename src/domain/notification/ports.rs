use async_trait::async_trait;
use uuid::Uuid;

use super::entities::NotificationPreferences;
use super::errors::NotificationError;

#[async_trait]
pub trait NotificationPreferencesRepository: Send + Sync {
  async fn find_by_user(
    &self,
    user_id: Uuid,
  ) -> Result<Option<NotificationPreferences>, NotificationError>;

  /// Inserts or replaces the record keyed by user
  async fn save(&self, preferences: &NotificationPreferences) -> Result<(), NotificationError>;
}
