use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::ledger::{Money, PaymentState};
use crate::domain::pagination::{Page, PageRequest};

use super::entities::{SessionDetails, WorkSession};
use super::errors::WorkError;
use super::ports::{ReportQuery, WorkQuery, WorkSessionRepository};
use super::value_objects::WorkStatus;

#[derive(Debug, Clone)]
pub struct NewSession {
  pub details: SessionDetails,
  pub hourly_rate: Decimal,
  pub advance_paid: Decimal,
  pub work_status: Option<WorkStatus>,
}

#[derive(Debug, Clone)]
pub struct SessionChanges {
  pub details: SessionDetails,
  pub hourly_rate: Decimal,
  pub advance_paid: Decimal,
  pub work_status: WorkStatus,
}

#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
  pub project: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaymentInfo {
  pub total: Money,
  pub paid: Money,
  pub remaining: Money,
  pub payment_status: PaymentState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectStats {
  pub hours: Decimal,
  pub amount: Money,
  pub entries: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkReport {
  pub entries: Vec<WorkSession>,
  pub total_hours: Decimal,
  pub total_amount: Money,
  pub projects: BTreeMap<String, ProjectStats>,
}

impl WorkReport {
  pub fn from_sessions(entries: Vec<WorkSession>) -> Self {
    let mut projects: BTreeMap<String, ProjectStats> = BTreeMap::new();
    let mut total_minutes = 0i64;
    let mut total_amount = Money::zero();

    for entry in &entries {
      let minutes = entry.duration_minutes.unwrap_or(0);
      total_minutes += minutes;
      total_amount = total_amount.add(entry.total);

      let stats = projects
        .entry(entry.project_name.clone())
        .or_insert_with(|| ProjectStats {
          hours: Decimal::ZERO,
          amount: Money::zero(),
          entries: 0,
        });
      stats.hours += minutes_to_hours(minutes);
      stats.amount = stats.amount.add(entry.total);
      stats.entries += 1;
    }

    Self {
      entries,
      total_hours: minutes_to_hours(total_minutes),
      total_amount,
      projects,
    }
  }
}

fn minutes_to_hours(minutes: i64) -> Decimal {
  (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
}

pub struct WorkService {
  session_repo: Arc<dyn WorkSessionRepository>,
}

impl WorkService {
  pub fn new(session_repo: Arc<dyn WorkSessionRepository>) -> Self {
    Self { session_repo }
  }

  pub async fn create_session(
    &self,
    requester: Requester,
    data: NewSession,
  ) -> Result<WorkSession, WorkError> {
    let hourly_rate = Money::new(data.hourly_rate)?;
    let advance_paid = Money::new(data.advance_paid)?;

    let session = WorkSession::start(
      requester.user_id,
      data.details,
      hourly_rate,
      advance_paid,
      data.work_status.unwrap_or(WorkStatus::InProgress),
      Utc::now(),
    );
    self.session_repo.save(&session).await?;

    tracing::info!(
      session_id = %session.id,
      project = %session.project_name,
      total = %session.total,
      "Work session started"
    );
    Ok(session)
  }

  pub async fn get_session(
    &self,
    requester: Requester,
    session_id: Uuid,
  ) -> Result<WorkSession, WorkError> {
    self.load_owned(requester, session_id).await
  }

  pub async fn list_sessions(
    &self,
    requester: Requester,
    work_status: Option<WorkStatus>,
    project: Option<String>,
    page: PageRequest,
  ) -> Result<Page<WorkSession>, WorkError> {
    let query = WorkQuery {
      owner_id: requester.user_id,
      work_status,
      project: project.filter(|p| !p.trim().is_empty()),
      page,
    };
    self.session_repo.list(&query).await
  }

  pub async fn list_projects(&self, requester: Requester) -> Result<Vec<String>, WorkError> {
    self.session_repo.find_projects(requester.user_id).await
  }

  pub async fn update_session(
    &self,
    requester: Requester,
    session_id: Uuid,
    changes: SessionChanges,
  ) -> Result<WorkSession, WorkError> {
    let hourly_rate = Money::new(changes.hourly_rate)?;
    let advance_paid = Money::new(changes.advance_paid)?;
    let mut session = self.load_owned(requester, session_id).await?;

    session.update(
      changes.details,
      hourly_rate,
      advance_paid,
      changes.work_status,
    );
    self.session_repo.save(&session).await?;

    tracing::info!(session_id = %session.id, "Work session updated");
    Ok(session)
  }

  pub async fn stop_timer(
    &self,
    requester: Requester,
    session_id: Uuid,
  ) -> Result<WorkSession, WorkError> {
    let mut session = self.load_owned(requester, session_id).await?;

    if let Err(e) = session.stop(Utc::now()) {
      tracing::warn!(session_id = %session_id, status = %session.work_status, "Timer is not running");
      return Err(e);
    }
    self.session_repo.save(&session).await?;

    tracing::info!(
      session_id = %session.id,
      duration_minutes = ?session.duration_minutes,
      "Timer stopped"
    );
    Ok(session)
  }

  pub async fn set_work_status(
    &self,
    requester: Requester,
    session_id: Uuid,
    status: &str,
  ) -> Result<WorkSession, WorkError> {
    let status: WorkStatus = status.parse()?;
    let mut session = self.load_owned(requester, session_id).await?;

    session.set_work_status(status, Utc::now());
    self.session_repo.save(&session).await?;

    tracing::info!(session_id = %session.id, status = %status, "Work status updated");
    Ok(session)
  }

  pub async fn record_payment(
    &self,
    requester: Requester,
    session_id: Uuid,
    amount: Decimal,
  ) -> Result<WorkSession, WorkError> {
    let mut session = self.load_owned(requester, session_id).await?;

    if let Err(e) = session.record_payment(amount, Utc::now()) {
      tracing::warn!(session_id = %session_id, %amount, error = %e, "Payment rejected");
      return Err(e);
    }
    self.session_repo.save(&session).await?;

    tracing::info!(
      session_id = %session.id,
      %amount,
      payment_status = %session.payment_status,
      "Payment recorded"
    );
    Ok(session)
  }

  pub async fn payment_info(
    &self,
    requester: Requester,
    session_id: Uuid,
  ) -> Result<PaymentInfo, WorkError> {
    let session = self.load_owned(requester, session_id).await?;
    Ok(PaymentInfo {
      total: session.total,
      paid: session.advance_paid,
      remaining: session.remaining,
      payment_status: session.payment_status,
    })
  }

  pub async fn delete_session(
    &self,
    requester: Requester,
    session_id: Uuid,
  ) -> Result<(), WorkError> {
    let session = self.load_owned(requester, session_id).await?;
    self.session_repo.delete(session.id).await?;

    tracing::info!(session_id = %session.id, "Work session deleted");
    Ok(())
  }

  pub async fn active_timer(&self, requester: Requester) -> Result<Option<WorkSession>, WorkError> {
    self.session_repo.find_running(requester.user_id).await
  }

  /// Completed sessions started within the inclusive date range.
  pub async fn work_report(
    &self,
    requester: Requester,
    filter: ReportFilter,
  ) -> Result<WorkReport, WorkError> {
    let query = ReportQuery {
      owner_id: requester.user_id,
      started_from: filter.start_date.map(start_of_day),
      started_to: filter
        .end_date
        .map(|d| start_of_day(d) + chrono::Duration::days(1) - chrono::Duration::nanoseconds(1)),
      project: filter.project.filter(|p| !p.trim().is_empty()),
    };

    let entries = self.session_repo.find_completed(&query).await?;
    Ok(WorkReport::from_sessions(entries))
  }

  async fn load_owned(&self, requester: Requester, session_id: Uuid) -> Result<WorkSession, WorkError> {
    self
      .session_repo
      .find_by_id(session_id)
      .await?
      .filter(|session| requester.owns(session.owner_id))
      .ok_or(WorkError::SessionNotFound(session_id))
  }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
  date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::Role;
  use crate::infrastructure::persistence::memory::InMemoryWorkSessionRepository;
  use rust_decimal_macros::dec;

  fn service() -> WorkService {
    WorkService::new(Arc::new(InMemoryWorkSessionRepository::new()))
  }

  fn user() -> Requester {
    Requester::new(Uuid::new_v4(), Role::User)
  }

  fn new_session(project: &str, rate: Decimal) -> NewSession {
    NewSession {
      details: SessionDetails {
        customer_name: "Arjun".to_string(),
        customer_phone: "9800022222".to_string(),
        service_type: "pan".to_string(),
        project_name: project.to_string(),
        task_description: None,
      },
      hourly_rate: rate,
      advance_paid: dec!(0),
      work_status: None,
    }
  }

  #[tokio::test]
  async fn test_timer_lifecycle() {
    let service = service();
    let owner = user();

    let session = service
      .create_session(owner, new_session("PAN", dec!(300)))
      .await
      .unwrap();
    assert_eq!(session.task_description, "Pan service for Arjun");

    let running = service.active_timer(owner).await.unwrap().unwrap();
    assert_eq!(running.id, session.id);

    let stopped = service.stop_timer(owner, session.id).await.unwrap();
    assert_eq!(stopped.work_status, WorkStatus::Completed);
    assert_eq!(stopped.total.amount(), dec!(300));
    assert!(service.active_timer(owner).await.unwrap().is_none());

    let err = service.stop_timer(owner, session.id).await.unwrap_err();
    assert!(matches!(err, WorkError::TimerNotRunning));
  }

  #[tokio::test]
  async fn test_other_owner_cannot_touch_session() {
    let service = service();
    let session = service
      .create_session(user(), new_session("PAN", dec!(300)))
      .await
      .unwrap();

    let err = service.stop_timer(user(), session.id).await.unwrap_err();
    assert!(matches!(err, WorkError::SessionNotFound(_)));
  }

  #[tokio::test]
  async fn test_invalid_status_is_rejected() {
    let service = service();
    let owner = user();
    let session = service
      .create_session(owner, new_session("PAN", dec!(300)))
      .await
      .unwrap();

    let err = service
      .set_work_status(owner, session.id, "archived")
      .await
      .unwrap_err();
    assert!(matches!(err, WorkError::Validation(_)));

    let delivered = service
      .set_work_status(owner, session.id, "delivered")
      .await
      .unwrap();
    assert!(delivered.end_time.is_some());
  }

  #[tokio::test]
  async fn test_payment_info_after_payment() {
    let service = service();
    let owner = user();
    let session = service
      .create_session(owner, new_session("Aadhaar", dec!(800)))
      .await
      .unwrap();

    service.record_payment(owner, session.id, dec!(300)).await.unwrap();
    let err = service
      .record_payment(owner, session.id, dec!(-5))
      .await
      .unwrap_err();
    assert_eq!(err.to_string(), "Payment amount cannot be negative");

    let info = service.payment_info(owner, session.id).await.unwrap();
    assert_eq!(info.paid.amount(), dec!(300));
    assert_eq!(info.remaining.amount(), dec!(500));
    assert_eq!(info.payment_status, PaymentState::Partial);
  }

  #[tokio::test]
  async fn test_report_covers_completed_sessions() {
    let service = service();
    let owner = user();

    for (project, rate) in [("Passport", dec!(500)), ("Passport", dec!(700)), ("PAN", dec!(300))] {
      let session = service
        .create_session(owner, new_session(project, rate))
        .await
        .unwrap();
      service.stop_timer(owner, session.id).await.unwrap();
    }
    // Still running, excluded
    service
      .create_session(owner, new_session("Passport", dec!(900)))
      .await
      .unwrap();

    let report = service
      .work_report(owner, ReportFilter::default())
      .await
      .unwrap();
    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.total_amount.amount(), dec!(1500));
    assert_eq!(report.projects["Passport"].entries, 2);
    assert_eq!(report.projects["Passport"].amount.amount(), dec!(1200));

    let filtered = service
      .work_report(
        owner,
        ReportFilter {
          project: Some("Pass".to_string()),
          ..ReportFilter::default()
        },
      )
      .await
      .unwrap();
    assert_eq!(filtered.entries.len(), 2);

    let projects = service.list_projects(owner).await.unwrap();
    assert_eq!(projects, vec!["PAN".to_string(), "Passport".to_string()]);
  }

  #[test]
  fn test_report_hours_from_minutes() {
    let mut session = WorkSession::start(
      Uuid::new_v4(),
      SessionDetails {
        customer_name: "A".to_string(),
        customer_phone: "1".to_string(),
        service_type: "pan".to_string(),
        project_name: "PAN".to_string(),
        task_description: None,
      },
      Money::new(dec!(100)).unwrap(),
      Money::zero(),
      WorkStatus::InProgress,
      Utc::now(),
    );
    session.duration_minutes = Some(90);

    let report = WorkReport::from_sessions(vec![session.clone(), session]);

    assert_eq!(report.total_hours, dec!(3));
    assert_eq!(report.projects["PAN"].hours, dec!(3));
  }
}
