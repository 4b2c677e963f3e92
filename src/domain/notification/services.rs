use std::sync::Arc;

use crate::domain::auth::Requester;

use super::entities::{
  EmailNotifications, NotificationPreferences, NotificationSchedule, WhatsAppNotifications,
};
use super::errors::NotificationError;
use super::ports::NotificationPreferencesRepository;

pub struct NotificationService {
  preferences_repo: Arc<dyn NotificationPreferencesRepository>,
}

impl NotificationService {
  pub fn new(preferences_repo: Arc<dyn NotificationPreferencesRepository>) -> Self {
    Self { preferences_repo }
  }

  pub async fn get_or_create(
    &self,
    requester: Requester,
  ) -> Result<NotificationPreferences, NotificationError> {
    if let Some(existing) = self.preferences_repo.find_by_user(requester.user_id).await? {
      return Ok(existing);
    }

    let preferences = NotificationPreferences::with_defaults(requester.user_id);
    self.preferences_repo.save(&preferences).await?;

    tracing::debug!(user_id = %requester.user_id, "Notification preferences created");
    Ok(preferences)
  }

  pub async fn update(
    &self,
    requester: Requester,
    email: EmailNotifications,
    whatsapp: WhatsAppNotifications,
    schedule: NotificationSchedule,
  ) -> Result<NotificationPreferences, NotificationError> {
    let mut preferences = self.get_or_create(requester).await?;

    preferences.update(email, whatsapp, schedule);
    self.preferences_repo.save(&preferences).await?;

    tracing::info!(user_id = %requester.user_id, "Notification preferences updated");
    Ok(preferences)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::Role;
  use crate::infrastructure::persistence::memory::InMemoryNotificationPreferencesRepository;
  use chrono::NaiveTime;
  use uuid::Uuid;

  #[tokio::test]
  async fn test_preferences_created_once() {
    let service = NotificationService::new(Arc::new(
      InMemoryNotificationPreferencesRepository::new(),
    ));
    let requester = Requester::new(Uuid::new_v4(), Role::User);

    let first = service.get_or_create(requester).await.unwrap();
    let second = service.get_or_create(requester).await.unwrap();

    assert_eq!(first.id, second.id);
  }

  #[tokio::test]
  async fn test_update_replaces_flags_and_schedule() {
    let service = NotificationService::new(Arc::new(
      InMemoryNotificationPreferencesRepository::new(),
    ));
    let requester = Requester::new(Uuid::new_v4(), Role::User);
    let schedule = NotificationSchedule::new(
      NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
      NaiveTime::from_hms_opt(6, 30, 0).unwrap(),
      "sunday",
      NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
    )
    .unwrap();

    let updated = service
      .update(
        requester,
        EmailNotifications {
          bill_created: false,
          ..EmailNotifications::default()
        },
        WhatsAppNotifications {
          bill_paid: true,
          ..WhatsAppNotifications::default()
        },
        schedule.clone(),
      )
      .await
      .unwrap();

    assert!(!updated.email.bill_created);
    assert!(updated.whatsapp.bill_paid);
    assert_eq!(updated.schedule, schedule);

    let reloaded = service.get_or_create(requester).await.unwrap();
    assert_eq!(reloaded, updated);
  }
}
