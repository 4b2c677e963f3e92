use thiserror::Error;

use crate::domain::auth::AuthError;
use crate::domain::expense::ExpenseError;
use crate::domain::invoice::InvoiceError;
use crate::domain::work::WorkError;

#[derive(Debug, Error)]
pub enum AnalyticsError {
  #[error("Invalid chart type: {0}")]
  InvalidChart(String),

  #[error("Invalid period: {0}")]
  InvalidPeriod(String),

  #[error("Start date must not be after end date")]
  InvalidRange,

  #[error(transparent)]
  Invoice(#[from] InvoiceError),

  #[error(transparent)]
  Expense(#[from] ExpenseError),

  #[error(transparent)]
  Work(#[from] WorkError),

  #[error(transparent)]
  Auth(#[from] AuthError),
}
