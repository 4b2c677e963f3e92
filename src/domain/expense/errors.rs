use thiserror::Error;
use uuid::Uuid;

use crate::domain::ledger::ValueObjectError;

#[derive(Debug, Error)]
pub enum ExpenseError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Expense not found: {0}")]
  ExpenseNotFound(Uuid),

  #[error("Administrator access required")]
  AdminRequired,

  #[error("Repository error: {0}")]
  Repository(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
