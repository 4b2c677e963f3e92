use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use crate::domain::ledger::ValueObjectError;

// Invoice Number - "INV-" followed by a zero-padded sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
  const PREFIX: &'static str = "INV-";

  pub fn from_sequence(sequence: i64) -> Self {
    Self(format!("{}{:06}", Self::PREFIX, sequence))
  }

  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix(Self::PREFIX).ok_or_else(|| {
      ValueObjectError::InvalidInvoiceNumber(format!("Missing INV- prefix: {}", trimmed))
    })?;
    if digits.len() < 6 || !digits.chars().all(|c| c.is_ascii_digit()) {
      return Err(ValueObjectError::InvalidInvoiceNumber(trimmed.to_string()));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Invoice Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
  Draft,
  Sent,
  Paid,
  Cancelled,
}

impl InvoiceStatus {
  pub fn can_transition_to(&self, new_status: InvoiceStatus) -> bool {
    match (self, new_status) {
      // Re-issuing the current open status is a no-op
      (InvoiceStatus::Draft, InvoiceStatus::Draft) => true,
      (InvoiceStatus::Sent, InvoiceStatus::Sent) => true,
      (InvoiceStatus::Draft, InvoiceStatus::Sent) => true,
      (InvoiceStatus::Draft | InvoiceStatus::Sent, InvoiceStatus::Paid) => true,
      (InvoiceStatus::Draft | InvoiceStatus::Sent, InvoiceStatus::Cancelled) => true,
      // Paid and Cancelled are terminal states
      _ => false,
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Draft => "draft",
      InvoiceStatus::Sent => "sent",
      InvoiceStatus::Paid => "paid",
      InvoiceStatus::Cancelled => "cancelled",
    }
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "draft" => Ok(InvoiceStatus::Draft),
      "sent" => Ok(InvoiceStatus::Sent),
      "paid" => Ok(InvoiceStatus::Paid),
      "cancelled" => Ok(InvoiceStatus::Cancelled),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Unknown invoice status: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// Line Item Description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemDescription(String);

impl LineItemDescription {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidDescription(
        "Description cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 500 {
      return Err(ValueObjectError::InvalidDescription(
        "Description cannot exceed 500 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

// Customer Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerName(String);

impl CustomerName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidName(
        "Customer name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 255 {
      return Err(ValueObjectError::InvalidName(
        "Customer name cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invoice_number_from_sequence() {
    assert_eq!(InvoiceNumber::from_sequence(1).value(), "INV-000001");
    assert_eq!(InvoiceNumber::from_sequence(1234567).value(), "INV-1234567");
  }

  #[test]
  fn test_invoice_number_parse() {
    assert!(InvoiceNumber::new("INV-000042".to_string()).is_ok());
    assert!(InvoiceNumber::new("42".to_string()).is_err());
    assert!(InvoiceNumber::new("INV-12ab".to_string()).is_err());
  }

  #[test]
  fn test_status_transitions() {
    use InvoiceStatus::*;

    assert!(Draft.can_transition_to(Sent));
    assert!(Draft.can_transition_to(Paid));
    assert!(Draft.can_transition_to(Cancelled));
    assert!(Sent.can_transition_to(Paid));
    assert!(Sent.can_transition_to(Cancelled));
    assert!(!Sent.can_transition_to(Draft));

    for target in [Draft, Sent, Paid, Cancelled] {
      assert!(!Paid.can_transition_to(target));
      assert!(!Cancelled.can_transition_to(target));
    }
  }

  #[test]
  fn test_status_parse() {
    assert_eq!("Paid".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
    assert!("overdue".parse::<InvoiceStatus>().is_err());
  }

  #[test]
  fn test_customer_name_trimmed() {
    let name = CustomerName::new("  Acme Corp ".to_string()).unwrap();
    assert_eq!(name.value(), "Acme Corp");
    assert!(CustomerName::new("   ".to_string()).is_err());
  }
}
