//! Line-item ledger.
//!
//! Turns loosely typed candidate rows into validated [`LineItem`]s. Rows that
//! are incomplete are skipped instead of failing the whole batch, so partially
//! filled forms still produce an invoice from the rows that make sense.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::ledger::{Money, Quantity};

use super::value_objects::LineItemDescription;

// Line Item - one billable entry owned by a single invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  pub description: LineItemDescription,
  pub quantity: Quantity,
  pub rate: Money,
}

impl LineItem {
  pub fn new(description: LineItemDescription, quantity: Quantity, rate: Money) -> Self {
    Self {
      description,
      quantity,
      rate,
    }
  }

  pub fn line_total(&self) -> Money {
    self.rate.multiply(self.quantity.value())
  }
}

/// A raw row as received from a client. Every field is optional text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemCandidate {
  pub description: Option<String>,
  pub quantity: Option<String>,
  pub rate: Option<String>,
}

impl LineItemCandidate {
  pub fn new(
    description: impl Into<String>,
    quantity: impl Into<String>,
    rate: impl Into<String>,
  ) -> Self {
    Self {
      description: Some(description.into()),
      quantity: Some(quantity.into()),
      rate: Some(rate.into()),
    }
  }
}

/// Builds the ordered list of line items from candidate rows.
///
/// A row is dropped when its description is blank or its rate is not
/// strictly positive. Missing quantity means 1 and missing rate means 0. If
/// either value is present but is not a non-negative decimal, the row falls
/// back to quantity 1 and rate 0, which drops it.
pub fn parse_line_items<I>(candidates: I) -> Vec<LineItem>
where
  I: IntoIterator<Item = LineItemCandidate>,
{
  candidates.into_iter().filter_map(parse_candidate).collect()
}

pub fn subtotal(items: &[LineItem]) -> Money {
  items.iter().map(LineItem::line_total).sum()
}

fn parse_candidate(candidate: LineItemCandidate) -> Option<LineItem> {
  let description = candidate
    .description
    .and_then(|d| LineItemDescription::new(d).ok())?;

  let (quantity, rate) = match (
    parse_field(candidate.quantity.as_deref(), Decimal::ONE),
    parse_field(candidate.rate.as_deref(), Decimal::ZERO),
  ) {
    (Some(quantity), Some(rate)) => (quantity, rate),
    _ => (Decimal::ONE, Decimal::ZERO),
  };

  if rate <= Decimal::ZERO {
    return None;
  }

  let quantity = Quantity::new(quantity).ok()?;
  let rate = Money::new(rate).ok()?;
  Some(LineItem::new(description, quantity, rate))
}

/// `None` means the value was present but unusable.
fn parse_field(raw: Option<&str>, default: Decimal) -> Option<Decimal> {
  let raw = match raw.map(str::trim) {
    None | Some("") => return Some(default),
    Some(raw) => raw,
  };

  Decimal::from_str(raw)
    .ok()
    .filter(|value| !value.is_sign_negative() || value.is_zero())
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn candidate(description: &str, quantity: &str, rate: &str) -> LineItemCandidate {
    LineItemCandidate::new(description, quantity, rate)
  }

  #[test]
  fn test_parses_complete_rows_in_order() {
    let items = parse_line_items(vec![
      candidate("Website Development", "1", "5000"),
      candidate("Domain Registration", "1", "1500"),
    ]);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].description.value(), "Website Development");
    assert_eq!(items[1].description.value(), "Domain Registration");
    assert_eq!(subtotal(&items).amount(), dec!(6500));
  }

  #[test]
  fn test_skips_blank_description_and_zero_rate() {
    let items = parse_line_items(vec![
      candidate("   ", "1", "100"),
      candidate("Free consultation", "1", "0"),
      candidate("Hosting", "2", "50"),
    ]);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].line_total().amount(), dec!(100));
  }

  #[test]
  fn test_missing_quantity_defaults_to_one() {
    let items = parse_line_items(vec![LineItemCandidate {
      description: Some("Design".to_string()),
      quantity: None,
      rate: Some("250.50".to_string()),
    }]);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity.value(), dec!(1));
    assert_eq!(items[0].line_total().amount(), dec!(250.50));
  }

  #[test]
  fn test_missing_rate_skips_row() {
    let items = parse_line_items(vec![LineItemCandidate {
      description: Some("Design".to_string()),
      quantity: Some("3".to_string()),
      rate: None,
    }]);

    assert!(items.is_empty());
  }

  #[test]
  fn test_unparseable_values_fall_back_and_skip() {
    let items = parse_line_items(vec![
      candidate("Bad rate", "1", "abc"),
      candidate("Bad quantity", "lots", "100"),
      candidate("Negative rate", "1", "-5"),
      candidate("Negative quantity", "-2", "10"),
    ]);

    assert!(items.is_empty());
  }

  #[test]
  fn test_zero_quantity_is_kept() {
    let items = parse_line_items(vec![candidate("Placeholder", "0", "10")]);

    assert_eq!(items.len(), 1);
    assert!(items[0].line_total().is_zero());
  }

  #[test]
  fn test_fractional_quantity() {
    let items = parse_line_items(vec![candidate("Consulting hours", "1.5", "80")]);

    assert_eq!(items[0].line_total().amount(), dec!(120));
  }
}
