use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::expense::{ExpenseInput, ExpenseService};
use crate::infrastructure::persistence::memory::{
  InMemoryExpenseCategoryRepository, InMemoryExpenseRepository,
};

pub fn expense_service() -> Arc<ExpenseService> {
  Arc::new(ExpenseService::new(
    Arc::new(InMemoryExpenseRepository::new()),
    Arc::new(InMemoryExpenseCategoryRepository::with_defaults()),
  ))
}

/// An expense dated on the given day of March 2026
pub fn expense(title: &str, category: &str, amount: Decimal, day: u32) -> ExpenseInput {
  ExpenseInput {
    title: title.to_string(),
    description: None,
    amount,
    category: category.to_string(),
    date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
  }
}
