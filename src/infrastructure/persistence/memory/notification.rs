use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::notification::{
  NotificationError, NotificationPreferences, NotificationPreferencesRepository,
};

/// Keyed by user id
#[derive(Default)]
pub struct InMemoryNotificationPreferencesRepository {
  preferences: RwLock<HashMap<Uuid, NotificationPreferences>>,
}

impl InMemoryNotificationPreferencesRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl NotificationPreferencesRepository for InMemoryNotificationPreferencesRepository {
  async fn find_by_user(
    &self,
    user_id: Uuid,
  ) -> Result<Option<NotificationPreferences>, NotificationError> {
    Ok(self.preferences.read().await.get(&user_id).cloned())
  }

  async fn save(&self, preferences: &NotificationPreferences) -> Result<(), NotificationError> {
    self
      .preferences
      .write()
      .await
      .insert(preferences.user_id, preferences.clone());
    Ok(())
  }
}
