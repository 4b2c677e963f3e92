use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::value_objects::{Money, ValueObjectError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
  #[error("Payment amount cannot be negative")]
  NegativePayment,

  #[error("Payment of {amount} exceeds remaining balance of {remaining}")]
  ExceedsRemaining { amount: Decimal, remaining: Money },
}

// Payment State - pure function of advance paid vs total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
  Pending,
  Partial,
  Paid,
}

impl PaymentState {
  pub fn settle(advance_paid: Money, total: Money) -> Self {
    if total.saturating_sub(advance_paid).is_zero() {
      PaymentState::Paid
    } else if advance_paid.is_zero() {
      PaymentState::Pending
    } else {
      PaymentState::Partial
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      PaymentState::Pending => "pending",
      PaymentState::Partial => "partial",
      PaymentState::Paid => "paid",
    }
  }
}

impl FromStr for PaymentState {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "pending" => Ok(PaymentState::Pending),
      "partial" => Ok(PaymentState::Partial),
      "paid" => Ok(PaymentState::Paid),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown payment status: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for PaymentState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// An aggregate that carries a running paid amount against a total.
pub trait Payable {
  fn total(&self) -> Money;

  fn advance_paid(&self) -> Money;

  fn remaining(&self) -> Money {
    self.total().saturating_sub(self.advance_paid())
  }

  /// Stores the outcome of an accepted payment. Called only after all checks pass.
  fn settle_payment(
    &mut self,
    advance_paid: Money,
    remaining: Money,
    state: PaymentState,
    at: DateTime<Utc>,
  );
}

/// Credits `amount` against the aggregate.
///
/// The whole payment is refused when it is negative or larger than the current
/// remaining balance; nothing is partially applied in that case.
pub fn apply_payment<P: Payable + ?Sized>(
  target: &mut P,
  amount: Decimal,
  at: DateTime<Utc>,
) -> Result<PaymentState, PaymentError> {
  if amount < Decimal::ZERO {
    return Err(PaymentError::NegativePayment);
  }

  let remaining = target.remaining();
  if amount > remaining.amount() {
    return Err(PaymentError::ExceedsRemaining { amount, remaining });
  }

  let credited = Money::new(amount).map_err(|_| PaymentError::NegativePayment)?;
  let total = target.total();
  let advance_paid = target.advance_paid().add(credited);
  let state = PaymentState::settle(advance_paid, total);

  target.settle_payment(advance_paid, total.saturating_sub(advance_paid), state, at);
  Ok(state)
}
