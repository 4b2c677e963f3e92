use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::notification::{
  EmailNotifications, NotificationError, NotificationPreferences,
  NotificationPreferencesRepository, NotificationSchedule, WhatsAppNotifications,
};

#[derive(Debug, FromRow)]
struct PreferencesRow {
  id: Uuid,
  user_id: Uuid,
  email_bill_created: bool,
  email_bill_paid: bool,
  email_expense_added: bool,
  email_weekly_report: bool,
  email_monthly_report: bool,
  email_system_updates: bool,
  whatsapp_bill_paid: bool,
  whatsapp_daily_summary: bool,
  whatsapp_overdue: bool,
  whatsapp_goals: bool,
  quiet_hours_start: NaiveTime,
  quiet_hours_end: NaiveTime,
  weekly_report_day: String,
  report_time: NaiveTime,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<PreferencesRow> for NotificationPreferences {
  type Error = NotificationError;

  fn try_from(row: PreferencesRow) -> Result<Self, Self::Error> {
    Ok(NotificationPreferences {
      id: row.id,
      user_id: row.user_id,
      email: EmailNotifications {
        bill_created: row.email_bill_created,
        bill_paid: row.email_bill_paid,
        expense_added: row.email_expense_added,
        weekly_report: row.email_weekly_report,
        monthly_report: row.email_monthly_report,
        system_updates: row.email_system_updates,
      },
      whatsapp: WhatsAppNotifications {
        bill_paid: row.whatsapp_bill_paid,
        daily_summary: row.whatsapp_daily_summary,
        overdue: row.whatsapp_overdue,
        goals: row.whatsapp_goals,
      },
      schedule: NotificationSchedule::new(
        row.quiet_hours_start,
        row.quiet_hours_end,
        &row.weekly_report_day,
        row.report_time,
      )?,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresNotificationPreferencesRepository {
  pool: PgPool,
}

impl PostgresNotificationPreferencesRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl NotificationPreferencesRepository for PostgresNotificationPreferencesRepository {
  async fn find_by_user(
    &self,
    user_id: Uuid,
  ) -> Result<Option<NotificationPreferences>, NotificationError> {
    let row = sqlx::query_as::<_, PreferencesRow>(
      r#"
            SELECT id, user_id, email_bill_created, email_bill_paid, email_expense_added,
                   email_weekly_report, email_monthly_report, email_system_updates,
                   whatsapp_bill_paid, whatsapp_daily_summary, whatsapp_overdue,
                   whatsapp_goals, quiet_hours_start, quiet_hours_end,
                   weekly_report_day, report_time, created_at, updated_at
            FROM notification_preferences
            WHERE user_id = $1
            "#,
    )
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(NotificationPreferences::try_from).transpose()
  }

  async fn save(&self, preferences: &NotificationPreferences) -> Result<(), NotificationError> {
    let (email, whatsapp, schedule) = (
      &preferences.email,
      &preferences.whatsapp,
      &preferences.schedule,
    );

    sqlx::query(
      r#"
            INSERT INTO notification_preferences (
                id, user_id, email_bill_created, email_bill_paid, email_expense_added,
                email_weekly_report, email_monthly_report, email_system_updates,
                whatsapp_bill_paid, whatsapp_daily_summary, whatsapp_overdue,
                whatsapp_goals, quiet_hours_start, quiet_hours_end,
                weekly_report_day, report_time, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            ON CONFLICT (user_id) DO UPDATE
            SET email_bill_created = EXCLUDED.email_bill_created,
                email_bill_paid = EXCLUDED.email_bill_paid,
                email_expense_added = EXCLUDED.email_expense_added,
                email_weekly_report = EXCLUDED.email_weekly_report,
                email_monthly_report = EXCLUDED.email_monthly_report,
                email_system_updates = EXCLUDED.email_system_updates,
                whatsapp_bill_paid = EXCLUDED.whatsapp_bill_paid,
                whatsapp_daily_summary = EXCLUDED.whatsapp_daily_summary,
                whatsapp_overdue = EXCLUDED.whatsapp_overdue,
                whatsapp_goals = EXCLUDED.whatsapp_goals,
                quiet_hours_start = EXCLUDED.quiet_hours_start,
                quiet_hours_end = EXCLUDED.quiet_hours_end,
                weekly_report_day = EXCLUDED.weekly_report_day,
                report_time = EXCLUDED.report_time,
                updated_at = EXCLUDED.updated_at
            "#,
    )
    .bind(preferences.id)
    .bind(preferences.user_id)
    .bind(email.bill_created)
    .bind(email.bill_paid)
    .bind(email.expense_added)
    .bind(email.weekly_report)
    .bind(email.monthly_report)
    .bind(email.system_updates)
    .bind(whatsapp.bill_paid)
    .bind(whatsapp.daily_summary)
    .bind(whatsapp.overdue)
    .bind(whatsapp.goals)
    .bind(schedule.quiet_hours_start)
    .bind(schedule.quiet_hours_end)
    .bind(&schedule.weekly_report_day)
    .bind(schedule.report_time)
    .bind(preferences.created_at)
    .bind(preferences.updated_at)
    .execute(&self.pool)
    .await?;

    Ok(())
  }
}
