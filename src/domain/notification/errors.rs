use thiserror::Error;

use crate::domain::ledger::ValueObjectError;

#[derive(Debug, Error)]
pub enum NotificationError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Repository error: {0}")]
  Repository(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
