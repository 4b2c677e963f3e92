use super::value_objects::{InvoiceStatus, ValueObjectError};
use crate::domain::ledger::PaymentError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("{0}")]
  Payment(#[from] PaymentError),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("Customer not found: {0}")]
  CustomerNotFound(Uuid),

  #[error("Invalid status transition from {from} to {to}")]
  InvalidStatusTransition {
    from: InvoiceStatus,
    to: InvoiceStatus,
  },

  #[error("Cannot edit a paid invoice")]
  CannotEditPaid,

  #[error("Cannot delete paid invoice")]
  CannotDeletePaid,

  #[error("Cannot record a payment on a cancelled invoice")]
  CannotPayCancelled,

  #[error("Select at least one delivery channel")]
  NoDispatchChannel,

  #[error("Invoice could not be sent: {0}")]
  DispatchFailed(String),

  #[error("Repository error: {0}")]
  Repository(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}

/// Failure reported by a document renderer or a delivery channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
  #[error("{0} functionality is not available")]
  Unavailable(&'static str),

  #[error("{channel} delivery failed: {reason}")]
  Failed { channel: &'static str, reason: String },
}
