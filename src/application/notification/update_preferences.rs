use chrono::NaiveTime;
use std::sync::Arc;

use crate::domain::auth::Requester;
use crate::domain::notification::{
  EmailNotifications, NotificationError, NotificationPreferences, NotificationSchedule,
  NotificationService, WhatsAppNotifications,
};

#[derive(Debug, Clone)]
pub struct UpdateNotificationPreferencesCommand {
  pub email: EmailNotifications,
  pub whatsapp: WhatsAppNotifications,
  pub quiet_hours_start: NaiveTime,
  pub quiet_hours_end: NaiveTime,
  pub weekly_report_day: String,
  pub report_time: NaiveTime,
}

pub struct UpdateNotificationPreferencesUseCase {
  notification_service: Arc<NotificationService>,
}

impl UpdateNotificationPreferencesUseCase {
  pub fn new(notification_service: Arc<NotificationService>) -> Self {
    Self {
      notification_service,
    }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    command: UpdateNotificationPreferencesCommand,
  ) -> Result<NotificationPreferences, NotificationError> {
    let schedule = NotificationSchedule::new(
      command.quiet_hours_start,
      command.quiet_hours_end,
      &command.weekly_report_day,
      command.report_time,
    )?;

    self
      .notification_service
      .update(requester, command.email, command.whatsapp, schedule)
      .await
  }
}
