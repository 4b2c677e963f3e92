use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::auth::OwnerScope;
use crate::domain::ledger::{Money, PaymentState};
use crate::domain::pagination::Page;
use crate::domain::work::{
  ReportQuery, WorkError, WorkQuery, WorkSession, WorkSessionRepository, WorkStatus,
};

#[derive(Debug, FromRow)]
struct WorkSessionRow {
  id: Uuid,
  owner_id: Uuid,
  customer_name: String,
  customer_phone: String,
  service_type: String,
  project_name: String,
  task_description: String,
  start_time: DateTime<Utc>,
  end_time: Option<DateTime<Utc>>,
  duration_minutes: Option<i64>,
  hourly_rate: Decimal,
  total: Decimal,
  advance_paid: Decimal,
  remaining: Decimal,
  work_status: String,
  payment_status: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<WorkSessionRow> for WorkSession {
  type Error = WorkError;

  fn try_from(row: WorkSessionRow) -> Result<Self, Self::Error> {
    Ok(WorkSession {
      id: row.id,
      owner_id: row.owner_id,
      customer_name: row.customer_name,
      customer_phone: row.customer_phone,
      service_type: row.service_type,
      project_name: row.project_name,
      task_description: row.task_description,
      start_time: row.start_time,
      end_time: row.end_time,
      duration_minutes: row.duration_minutes,
      hourly_rate: Money::new(row.hourly_rate)?,
      total: Money::new(row.total)?,
      advance_paid: Money::new(row.advance_paid)?,
      remaining: Money::new(row.remaining)?,
      work_status: WorkStatus::from_str(&row.work_status)?,
      payment_status: PaymentState::from_str(&row.payment_status)?,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

const SESSION_COLUMNS: &str = r#"
    id, owner_id, customer_name, customer_phone, service_type, project_name,
    task_description, start_time, end_time, duration_minutes, hourly_rate,
    total, advance_paid, remaining, work_status, payment_status, created_at,
    updated_at
"#;

pub struct PostgresWorkSessionRepository {
  pool: PgPool,
}

impl PostgresWorkSessionRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

fn into_sessions(rows: Vec<WorkSessionRow>) -> Result<Vec<WorkSession>, WorkError> {
  rows.into_iter().map(WorkSession::try_from).collect()
}

#[async_trait]
impl WorkSessionRepository for PostgresWorkSessionRepository {
  async fn save(&self, session: &WorkSession) -> Result<(), WorkError> {
    sqlx::query(
      r#"
            INSERT INTO work_sessions (
                id, owner_id, customer_name, customer_phone, service_type, project_name,
                task_description, start_time, end_time, duration_minutes, hourly_rate,
                total, advance_paid, remaining, work_status, payment_status, created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            ON CONFLICT (id) DO UPDATE
            SET customer_name = EXCLUDED.customer_name,
                customer_phone = EXCLUDED.customer_phone,
                service_type = EXCLUDED.service_type,
                project_name = EXCLUDED.project_name,
                task_description = EXCLUDED.task_description,
                end_time = EXCLUDED.end_time,
                duration_minutes = EXCLUDED.duration_minutes,
                hourly_rate = EXCLUDED.hourly_rate,
                total = EXCLUDED.total,
                advance_paid = EXCLUDED.advance_paid,
                remaining = EXCLUDED.remaining,
                work_status = EXCLUDED.work_status,
                payment_status = EXCLUDED.payment_status,
                updated_at = EXCLUDED.updated_at
            "#,
    )
    .bind(session.id)
    .bind(session.owner_id)
    .bind(&session.customer_name)
    .bind(&session.customer_phone)
    .bind(&session.service_type)
    .bind(&session.project_name)
    .bind(&session.task_description)
    .bind(session.start_time)
    .bind(session.end_time)
    .bind(session.duration_minutes)
    .bind(session.hourly_rate.amount())
    .bind(session.total.amount())
    .bind(session.advance_paid.amount())
    .bind(session.remaining.amount())
    .bind(session.work_status.as_str())
    .bind(session.payment_status.as_str())
    .bind(session.created_at)
    .bind(session.updated_at)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkSession>, WorkError> {
    let row = sqlx::query_as::<_, WorkSessionRow>(&format!(
      "SELECT {SESSION_COLUMNS} FROM work_sessions WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(WorkSession::try_from).transpose()
  }

  async fn list(&self, query: &WorkQuery) -> Result<Page<WorkSession>, WorkError> {
    let status = query.work_status.map(|s| s.as_str());

    let total: i64 = sqlx::query_scalar(
      r#"
            SELECT COUNT(*)
            FROM work_sessions
            WHERE owner_id = $1
              AND ($2::text IS NULL OR work_status = $2)
              AND ($3::text IS NULL OR project_name = $3)
            "#,
    )
    .bind(query.owner_id)
    .bind(status)
    .bind(&query.project)
    .fetch_one(&self.pool)
    .await?;

    let rows = sqlx::query_as::<_, WorkSessionRow>(&format!(
      r#"
            SELECT {SESSION_COLUMNS}
            FROM work_sessions
            WHERE owner_id = $1
              AND ($2::text IS NULL OR work_status = $2)
              AND ($3::text IS NULL OR project_name = $3)
            ORDER BY start_time DESC
            LIMIT $4 OFFSET $5
            "#
    ))
    .bind(query.owner_id)
    .bind(status)
    .bind(&query.project)
    .bind(query.page.limit())
    .bind(query.page.offset())
    .fetch_all(&self.pool)
    .await?;

    Ok(Page::new(
      into_sessions(rows)?,
      query.page,
      total.max(0) as u64,
    ))
  }

  async fn find_projects(&self, owner_id: Uuid) -> Result<Vec<String>, WorkError> {
    let projects: Vec<String> = sqlx::query_scalar(
      r#"
            SELECT DISTINCT project_name
            FROM work_sessions
            WHERE owner_id = $1 AND project_name <> ''
            ORDER BY project_name
            "#,
    )
    .bind(owner_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(projects)
  }

  async fn find_running(&self, owner_id: Uuid) -> Result<Option<WorkSession>, WorkError> {
    let row = sqlx::query_as::<_, WorkSessionRow>(&format!(
      r#"
            SELECT {SESSION_COLUMNS}
            FROM work_sessions
            WHERE owner_id = $1 AND work_status = 'in_progress'
            ORDER BY start_time
            LIMIT 1
            "#
    ))
    .bind(owner_id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(WorkSession::try_from).transpose()
  }

  async fn find_completed(&self, query: &ReportQuery) -> Result<Vec<WorkSession>, WorkError> {
    let pattern = query.project.as_ref().map(|p| format!("%{}%", p));

    let rows = sqlx::query_as::<_, WorkSessionRow>(&format!(
      r#"
            SELECT {SESSION_COLUMNS}
            FROM work_sessions
            WHERE owner_id = $1
              AND work_status = 'completed'
              AND ($2::timestamptz IS NULL OR start_time >= $2)
              AND ($3::timestamptz IS NULL OR start_time <= $3)
              AND ($4::text IS NULL OR project_name ILIKE $4)
            ORDER BY start_time DESC
            "#
    ))
    .bind(query.owner_id)
    .bind(query.started_from)
    .bind(query.started_to)
    .bind(&pattern)
    .fetch_all(&self.pool)
    .await?;

    into_sessions(rows)
  }

  async fn find_in_scope(
    &self,
    scope: OwnerScope,
    started_from: Option<DateTime<Utc>>,
    started_to: Option<DateTime<Utc>>,
  ) -> Result<Vec<WorkSession>, WorkError> {
    let rows = sqlx::query_as::<_, WorkSessionRow>(&format!(
      r#"
            SELECT {SESSION_COLUMNS}
            FROM work_sessions
            WHERE ($1::uuid IS NULL OR owner_id = $1)
              AND ($2::timestamptz IS NULL OR start_time >= $2)
              AND ($3::timestamptz IS NULL OR start_time <= $3)
            ORDER BY start_time DESC
            "#
    ))
    .bind(scope.owner_id())
    .bind(started_from)
    .bind(started_to)
    .fetch_all(&self.pool)
    .await?;

    into_sessions(rows)
  }

  async fn delete(&self, id: Uuid) -> Result<(), WorkError> {
    let result = sqlx::query("DELETE FROM work_sessions WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(WorkError::SessionNotFound(id));
    }
    Ok(())
  }
}
