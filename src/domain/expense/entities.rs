use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ledger::{Money, ValueObjectError};

/// Categories offered to every user, with their seeded descriptions.
pub const DEFAULT_CATEGORIES: [(&str, &str); 10] = [
  ("Office Supplies", "Stationery, equipment, and office materials"),
  ("Travel", "Business travel and transportation expenses"),
  ("Meals", "Business meals and entertainment"),
  ("Utilities", "Electricity, internet, phone bills"),
  ("Software", "Software licenses and subscriptions"),
  ("Marketing", "Advertising and promotional expenses"),
  ("Equipment", "Hardware and equipment purchases"),
  ("Rent", "Office rent and facility costs"),
  ("Insurance", "Business insurance premiums"),
  ("Other", "Miscellaneous business expenses"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl ExpenseCategory {
  pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
    Self {
      id: Uuid::new_v4(),
      name: name.into(),
      description,
      created_at: Utc::now(),
    }
  }

  pub fn defaults() -> Vec<Self> {
    DEFAULT_CATEGORIES
      .iter()
      .map(|(name, description)| Self::new(*name, Some(description.to_string())))
      .collect()
  }
}

/// Validated expense input
#[derive(Debug, Clone)]
pub struct ExpenseDetails {
  pub title: String,
  pub description: Option<String>,
  pub amount: Money,
  pub category: String,
  pub date: NaiveDate,
}

impl ExpenseDetails {
  pub fn new(
    title: String,
    description: Option<String>,
    amount: Money,
    category: String,
    date: NaiveDate,
  ) -> Result<Self, ValueObjectError> {
    let title = title.trim().to_string();
    if title.is_empty() || title.len() > 100 {
      return Err(ValueObjectError::InvalidName(
        "Title must be between 1 and 100 characters".to_string(),
      ));
    }
    let category = category.trim().to_string();
    if category.is_empty() || category.len() > 50 {
      return Err(ValueObjectError::InvalidName(
        "Category must be between 1 and 50 characters".to_string(),
      ));
    }

    Ok(Self {
      title,
      description: description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty()),
      amount,
      category,
      date,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub title: String,
  pub description: Option<String>,
  pub amount: Money,
  pub category: String,
  pub date: NaiveDate,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Expense {
  pub fn new(owner_id: Uuid, details: ExpenseDetails) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      owner_id,
      title: details.title,
      description: details.description,
      amount: details.amount,
      category: details.category,
      date: details.date,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn update(&mut self, details: ExpenseDetails) {
    self.title = details.title;
    self.description = details.description;
    self.amount = details.amount;
    self.category = details.category;
    self.date = details.date;
    self.updated_at = Utc::now();
  }

  /// Month bucket used by reports, e.g. "2024-03"
  pub fn month_key(&self) -> String {
    self.date.format("%Y-%m").to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn details(title: &str, category: &str) -> Result<ExpenseDetails, ValueObjectError> {
    ExpenseDetails::new(
      title.to_string(),
      Some("  ".to_string()),
      Money::new(dec!(120)).unwrap(),
      category.to_string(),
      NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
    )
  }

  #[test]
  fn test_details_are_trimmed_and_validated() {
    let details = details("  Printer ink ", " Office Supplies").unwrap();
    assert_eq!(details.title, "Printer ink");
    assert_eq!(details.category, "Office Supplies");
    assert!(details.description.is_none());

    assert!(self::details("", "Travel").is_err());
    assert!(self::details("Taxi", " ").is_err());
  }

  #[test]
  fn test_month_key() {
    let expense = Expense::new(Uuid::new_v4(), details("Taxi", "Travel").unwrap());
    assert_eq!(expense.month_key(), "2024-03");
  }

  #[test]
  fn test_default_categories() {
    let categories = ExpenseCategory::defaults();
    assert_eq!(categories.len(), 10);
    assert!(categories.iter().any(|c| c.name == "Other"));
  }
}
