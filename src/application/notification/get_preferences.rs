use std::sync::Arc;

use crate::domain::auth::Requester;
use crate::domain::notification::{NotificationError, NotificationPreferences, NotificationService};

/// Returns the requester's preferences, creating the defaults on first access
pub struct GetNotificationPreferencesUseCase {
  notification_service: Arc<NotificationService>,
}

impl GetNotificationPreferencesUseCase {
  pub fn new(notification_service: Arc<NotificationService>) -> Self {
    Self {
      notification_service,
    }
  }

  pub async fn execute(
    &self,
    requester: Requester,
  ) -> Result<NotificationPreferences, NotificationError> {
    self.notification_service.get_or_create(requester).await
  }
}
