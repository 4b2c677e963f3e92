use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ledger::ValueObjectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailNotifications {
  pub bill_created: bool,
  pub bill_paid: bool,
  pub expense_added: bool,
  pub weekly_report: bool,
  pub monthly_report: bool,
  pub system_updates: bool,
}

impl Default for EmailNotifications {
  fn default() -> Self {
    Self {
      bill_created: true,
      bill_paid: true,
      expense_added: false,
      weekly_report: true,
      monthly_report: true,
      system_updates: true,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppNotifications {
  pub bill_paid: bool,
  pub daily_summary: bool,
  pub overdue: bool,
  pub goals: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSchedule {
  pub quiet_hours_start: NaiveTime,
  pub quiet_hours_end: NaiveTime,
  /// Lowercase English day name
  pub weekly_report_day: String,
  pub report_time: NaiveTime,
}

impl NotificationSchedule {
  pub fn new(
    quiet_hours_start: NaiveTime,
    quiet_hours_end: NaiveTime,
    weekly_report_day: &str,
    report_time: NaiveTime,
  ) -> Result<Self, ValueObjectError> {
    let day: Weekday = weekly_report_day.trim().parse().map_err(|_| {
      ValueObjectError::InvalidName(format!("Unknown weekday: {}", weekly_report_day))
    })?;

    Ok(Self {
      quiet_hours_start,
      quiet_hours_end,
      weekly_report_day: weekday_name(day).to_string(),
      report_time,
    })
  }

  /// Whether `time` falls inside the quiet window. A window whose start is
  /// after its end spans midnight.
  pub fn is_quiet_at(&self, time: NaiveTime) -> bool {
    let (start, end) = (self.quiet_hours_start, self.quiet_hours_end);
    if start > end {
      time >= start || time <= end
    } else {
      start <= time && time <= end
    }
  }
}

impl Default for NotificationSchedule {
  fn default() -> Self {
    Self {
      quiet_hours_start: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
      quiet_hours_end: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
      weekly_report_day: "monday".to_string(),
      report_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
    }
  }
}

fn weekday_name(day: Weekday) -> &'static str {
  match day {
    Weekday::Mon => "monday",
    Weekday::Tue => "tuesday",
    Weekday::Wed => "wednesday",
    Weekday::Thu => "thursday",
    Weekday::Fri => "friday",
    Weekday::Sat => "saturday",
    Weekday::Sun => "sunday",
  }
}

/// One record per user, created with defaults on first access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
  pub id: Uuid,
  pub user_id: Uuid,
  pub email: EmailNotifications,
  pub whatsapp: WhatsAppNotifications,
  pub schedule: NotificationSchedule,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl NotificationPreferences {
  pub fn with_defaults(user_id: Uuid) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      email: EmailNotifications::default(),
      whatsapp: WhatsAppNotifications::default(),
      schedule: NotificationSchedule::default(),
      created_at: now,
      updated_at: now,
    }
  }

  pub fn update(
    &mut self,
    email: EmailNotifications,
    whatsapp: WhatsAppNotifications,
    schedule: NotificationSchedule,
  ) {
    self.email = email;
    self.whatsapp = whatsapp;
    self.schedule = schedule;
    self.updated_at = Utc::now();
  }
}
