use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
  #[error("Invalid tax rate: {0}")]
  InvalidTaxRate(String),
  #[error("Invalid description: {0}")]
  InvalidDescription(String),
  #[error("Invalid name: {0}")]
  InvalidName(String),
  #[error("Invalid email: {0}")]
  InvalidEmail(String),
  #[error("Invalid status: {0}")]
  InvalidStatus(String),
  #[error("Invalid invoice number: {0}")]
  InvalidInvoiceNumber(String),
}

const MONEY_SCALE: u32 = 2;

// Money - Non-negative amount with two decimal places
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
  pub const ZERO: Money = Money(Decimal::ZERO);

  pub fn new(amount: Decimal) -> Result<Self, ValueObjectError> {
    if amount < Decimal::ZERO {
      return Err(ValueObjectError::InvalidAmount(format!(
        "Amount cannot be negative: {}",
        amount
      )));
    }
    Ok(Self::rounded(amount))
  }

  pub fn zero() -> Self {
    Self::ZERO
  }

  fn rounded(amount: Decimal) -> Self {
    let mut value =
      amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(MONEY_SCALE);
    Self(value)
  }

  pub fn amount(&self) -> Decimal {
    self.0
  }

  pub fn is_zero(&self) -> bool {
    self.0.is_zero()
  }

  pub fn add(self, other: Money) -> Money {
    Self::rounded(self.0 + other.0)
  }

  /// Subtraction floored at zero.
  pub fn saturating_sub(self, other: Money) -> Money {
    if other.0 >= self.0 {
      Money::ZERO
    } else {
      Self::rounded(self.0 - other.0)
    }
  }

  pub fn multiply(self, factor: Decimal) -> Money {
    Self::rounded((self.0 * factor).max(Decimal::ZERO))
  }

  pub fn percent(self, rate: TaxRate) -> Money {
    self.multiply(rate.as_multiplier())
  }
}

impl TryFrom<Decimal> for Money {
  type Error = ValueObjectError;

  fn try_from(value: Decimal) -> Result<Self, Self::Error> {
    Money::new(value)
  }
}

impl From<Money> for Decimal {
  fn from(money: Money) -> Self {
    money.0
  }
}

impl Sum for Money {
  fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
    iter.fold(Money::ZERO, Money::add)
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:.2}", self.0)
  }
}

// Quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity cannot be negative".to_string(),
      ));
    }
    Ok(Self(value.normalize()))
  }

  pub fn one() -> Self {
    Self(Decimal::ONE)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }
}

impl Default for Quantity {
  fn default() -> Self {
    Self::one()
  }
}

impl TryFrom<Decimal> for Quantity {
  type Error = ValueObjectError;

  fn try_from(value: Decimal) -> Result<Self, Self::Error> {
    Quantity::new(value)
  }
}

impl From<Quantity> for Decimal {
  fn from(quantity: Quantity) -> Self {
    quantity.0
  }
}

// Tax Rate - percentage, no upper bound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TaxRate(Decimal);

impl TaxRate {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value < Decimal::ZERO {
      return Err(ValueObjectError::InvalidTaxRate(
        "Tax rate cannot be negative".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn zero() -> Self {
    Self(Decimal::ZERO)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn as_multiplier(&self) -> Decimal {
    self.0 / Decimal::ONE_HUNDRED
  }
}

impl TryFrom<Decimal> for TaxRate {
  type Error = ValueObjectError;

  fn try_from(value: Decimal) -> Result<Self, Self::Error> {
    TaxRate::new(value)
  }
}

impl From<TaxRate> for Decimal {
  fn from(rate: TaxRate) -> Self {
    rate.0
  }
}
