use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ledger::{Money, Payable, PaymentState, apply_payment};

use super::errors::WorkError;
use super::value_objects::{WorkStatus, service_label};

/// Descriptive fields of a session, shared by create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDetails {
  pub customer_name: String,
  pub customer_phone: String,
  pub service_type: String,
  pub project_name: String,
  pub task_description: Option<String>,
}

/// A timed engagement billed as a flat fee of one hourly rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSession {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub customer_name: String,
  pub customer_phone: String,
  pub service_type: String,
  pub project_name: String,
  pub task_description: String,
  pub start_time: DateTime<Utc>,
  pub end_time: Option<DateTime<Utc>>,
  pub duration_minutes: Option<i64>,
  pub hourly_rate: Money,
  pub total: Money,
  pub advance_paid: Money,
  pub remaining: Money,
  pub work_status: WorkStatus,
  pub payment_status: PaymentState,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl WorkSession {
  /// Starts the timer at `now`.
  pub fn start(
    owner_id: Uuid,
    details: SessionDetails,
    hourly_rate: Money,
    advance_paid: Money,
    work_status: WorkStatus,
    now: DateTime<Utc>,
  ) -> Self {
    let task_description = details
      .task_description
      .filter(|d| !d.trim().is_empty())
      .unwrap_or_else(|| {
        format!(
          "{} service for {}",
          service_label(&details.service_type),
          details.customer_name
        )
      });

    let mut session = Self {
      id: Uuid::new_v4(),
      owner_id,
      customer_name: details.customer_name,
      customer_phone: details.customer_phone,
      service_type: details.service_type,
      project_name: details.project_name,
      task_description,
      start_time: now,
      end_time: None,
      duration_minutes: None,
      hourly_rate,
      total: hourly_rate,
      advance_paid,
      remaining: Money::zero(),
      work_status,
      payment_status: PaymentState::Pending,
      created_at: now,
      updated_at: now,
    };
    session.reprice();
    session
  }

  /// Whole elapsed minutes once the timer has an end. The charge stays one
  /// hourly rate whatever the duration.
  pub fn calculate_duration(&mut self) {
    if let Some(end_time) = self.end_time {
      let minutes = (end_time - self.start_time).num_minutes();
      self.duration_minutes = Some(minutes.max(0));
      self.reprice();
    }
  }

  pub fn stop(&mut self, now: DateTime<Utc>) -> Result<(), WorkError> {
    if self.work_status != WorkStatus::InProgress {
      return Err(WorkError::TimerNotRunning);
    }

    self.end_time = Some(now);
    self.work_status = WorkStatus::Completed;
    self.calculate_duration();
    self.updated_at = now;
    Ok(())
  }

  pub fn set_work_status(&mut self, status: WorkStatus, now: DateTime<Utc>) {
    self.work_status = status;
    if status.is_finished() && self.end_time.is_none() {
      self.end_time = Some(now);
      self.calculate_duration();
    }
    self.updated_at = now;
  }

  /// Replaces the editable fields and re-derives the charge.
  pub fn update(
    &mut self,
    details: SessionDetails,
    hourly_rate: Money,
    advance_paid: Money,
    work_status: WorkStatus,
  ) {
    self.customer_name = details.customer_name;
    self.customer_phone = details.customer_phone;
    self.service_type = details.service_type;
    self.project_name = details.project_name;
    if let Some(description) = details.task_description {
      self.task_description = description;
    }
    self.hourly_rate = hourly_rate;
    self.advance_paid = advance_paid;
    self.work_status = work_status;
    self.reprice();
    self.updated_at = Utc::now();
  }

  pub fn record_payment(
    &mut self,
    amount: Decimal,
    at: DateTime<Utc>,
  ) -> Result<PaymentState, WorkError> {
    Ok(apply_payment(self, amount, at)?)
  }

  pub fn is_running(&self) -> bool {
    self.work_status == WorkStatus::InProgress
  }

  fn reprice(&mut self) {
    self.total = self.hourly_rate;
    self.remaining = self.total.saturating_sub(self.advance_paid);
    self.payment_status = PaymentState::settle(self.advance_paid, self.total);
  }
}

impl Payable for WorkSession {
  fn total(&self) -> Money {
    self.total
  }

  fn advance_paid(&self) -> Money {
    self.advance_paid
  }

  fn settle_payment(
    &mut self,
    advance_paid: Money,
    remaining: Money,
    state: PaymentState,
    at: DateTime<Utc>,
  ) {
    self.advance_paid = advance_paid;
    self.remaining = remaining;
    self.payment_status = state;
    self.updated_at = at;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ledger::PaymentError;
  use chrono::Duration;
  use rust_decimal_macros::dec;

  fn details() -> SessionDetails {
    SessionDetails {
      customer_name: "Meera".to_string(),
      customer_phone: "9800011111".to_string(),
      service_type: "passport_renewal".to_string(),
      project_name: "Passport".to_string(),
      task_description: None,
    }
  }

  fn session(rate: Decimal, advance: Decimal) -> WorkSession {
    WorkSession::start(
      Uuid::new_v4(),
      details(),
      Money::new(rate).unwrap(),
      Money::new(advance).unwrap(),
      WorkStatus::InProgress,
      Utc::now(),
    )
  }

  #[test]
  fn test_start_derives_flat_fee_and_description() {
    let session = session(dec!(500), dec!(200));

    assert_eq!(session.task_description, "Passport Renewal service for Meera");
    assert_eq!(session.total.amount(), dec!(500));
    assert_eq!(session.remaining.amount(), dec!(300));
    assert_eq!(session.payment_status, PaymentState::Partial);
    assert!(session.end_time.is_none());
  }

  #[test]
  fn test_start_payment_status_from_advance() {
    assert_eq!(session(dec!(500), dec!(0)).payment_status, PaymentState::Pending);
    assert_eq!(session(dec!(500), dec!(500)).payment_status, PaymentState::Paid);

    let overpaid = session(dec!(500), dec!(800));
    assert_eq!(overpaid.payment_status, PaymentState::Paid);
    assert!(overpaid.remaining.is_zero());
  }

  #[test]
  fn test_stop_computes_duration_with_flat_fee() {
    let start = Utc::now() - Duration::minutes(90);
    let mut session = session(dec!(100), dec!(0));
    session.start_time = start;

    session.stop(start + Duration::minutes(90)).unwrap();

    assert_eq!(session.duration_minutes, Some(90));
    assert_eq!(session.total.amount(), dec!(100));
    assert_eq!(session.work_status, WorkStatus::Completed);
  }

  #[test]
  fn test_duration_is_floored() {
    let mut session = session(dec!(100), dec!(0));
    let start = session.start_time;
    session.end_time = Some(start + Duration::seconds(5 * 60 + 59));

    session.calculate_duration();

    assert_eq!(session.duration_minutes, Some(5));
  }

  #[test]
  fn test_stop_requires_running_timer() {
    let mut session = session(dec!(100), dec!(0));
    session.stop(Utc::now()).unwrap();
    let before = session.clone();

    let err = session.stop(Utc::now()).unwrap_err();

    assert!(matches!(err, WorkError::TimerNotRunning));
    assert_eq!(session, before);
  }

  #[test]
  fn test_finishing_status_sets_end_time_once() {
    let mut session = session(dec!(100), dec!(0));
    let first = Utc::now();

    session.set_work_status(WorkStatus::Delivered, first);
    assert_eq!(session.end_time, Some(first));
    assert!(session.duration_minutes.is_some());

    session.set_work_status(WorkStatus::Completed, first + Duration::hours(2));
    assert_eq!(session.end_time, Some(first));
  }

  #[test]
  fn test_pending_status_keeps_timer_open() {
    let mut session = session(dec!(100), dec!(0));
    session.set_work_status(WorkStatus::Pending, Utc::now());

    assert!(session.end_time.is_none());
    assert!(!session.is_running());
  }

  #[test]
  fn test_payments_drive_payment_status_only() {
    let mut session = session(dec!(1000), dec!(0));

    let state = session.record_payment(dec!(400), Utc::now()).unwrap();
    assert_eq!(state, PaymentState::Partial);
    assert_eq!(session.remaining.amount(), dec!(600));
    assert_eq!(session.work_status, WorkStatus::InProgress);

    let err = session.record_payment(dec!(601), Utc::now()).unwrap_err();
    assert!(matches!(
      err,
      WorkError::Payment(PaymentError::ExceedsRemaining { .. })
    ));
    assert_eq!(session.advance_paid.amount(), dec!(400));

    let state = session.record_payment(dec!(600), Utc::now()).unwrap();
    assert_eq!(state, PaymentState::Paid);
    assert!(session.remaining.is_zero());
  }

  #[test]
  fn test_update_reprices_session() {
    let mut session = session(dec!(1000), dec!(0));
    session.update(
      SessionDetails {
        task_description: Some("Document verification".to_string()),
        ..details()
      },
      Money::new(dec!(750)).unwrap(),
      Money::new(dec!(750)).unwrap(),
      WorkStatus::Completed,
    );

    assert_eq!(session.total.amount(), dec!(750));
    assert_eq!(session.payment_status, PaymentState::Paid);
    assert_eq!(session.task_description, "Document verification");
  }
}
