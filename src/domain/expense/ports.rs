use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::auth::OwnerScope;

use super::entities::{Expense, ExpenseCategory};
use super::errors::ExpenseError;

/// Inclusive date bounds and an exact category match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
  pub category: Option<String>,
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
}

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
  async fn save(&self, expense: &Expense) -> Result<(), ExpenseError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>, ExpenseError>;

  /// Expenses in `scope` matching `filter`, newest date first
  async fn find_matching(
    &self,
    scope: OwnerScope,
    filter: &ExpenseFilter,
  ) -> Result<Vec<Expense>, ExpenseError>;

  /// Distinct categories the owner has used
  async fn used_categories(&self, owner_id: Uuid) -> Result<Vec<String>, ExpenseError>;

  async fn delete(&self, id: Uuid) -> Result<(), ExpenseError>;
}

#[async_trait]
pub trait ExpenseCategoryRepository: Send + Sync {
  /// Configured categories ordered by name
  async fn list(&self) -> Result<Vec<ExpenseCategory>, ExpenseError>;
}
