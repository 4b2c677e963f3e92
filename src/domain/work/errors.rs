use thiserror::Error;
use uuid::Uuid;

use super::value_objects::ValueObjectError;
use crate::domain::ledger::PaymentError;

#[derive(Debug, Error)]
pub enum WorkError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("{0}")]
  Payment(#[from] PaymentError),

  #[error("Work session not found: {0}")]
  SessionNotFound(Uuid),

  #[error("Timer is not running")]
  TimerNotRunning,

  #[error("Repository error: {0}")]
  Repository(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
