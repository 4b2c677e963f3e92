use std::sync::Arc;

use crate::domain::auth::Requester;
use crate::domain::expense::{ExpenseCategory, ExpenseError, ExpenseService};

/// Category names offered when recording an expense
pub struct ListExpenseCategoriesUseCase {
  expense_service: Arc<ExpenseService>,
}

impl ListExpenseCategoriesUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(&self, requester: Requester) -> Result<Vec<String>, ExpenseError> {
    self.expense_service.categories(requester).await
  }
}

/// Seeded category records, administrators only
pub struct ListConfiguredCategoriesUseCase {
  expense_service: Arc<ExpenseService>,
}

impl ListConfiguredCategoriesUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(&self, requester: Requester) -> Result<Vec<ExpenseCategory>, ExpenseError> {
    self.expense_service.configured_categories(requester).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::expense::test_support::{expense, expense_service};
  use crate::application::expense::CreateExpenseUseCase;
  use crate::domain::auth::Role;
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  #[tokio::test]
  async fn test_custom_category_is_merged_with_defaults() {
    let service = expense_service();
    let owner = Requester::new(Uuid::new_v4(), Role::User);
    CreateExpenseUseCase::new(service.clone())
      .execute(owner, expense("Stamp paper", "Legal Fees", dec!(100), 1))
      .await
      .unwrap();

    let names = ListExpenseCategoriesUseCase::new(service)
      .execute(owner)
      .await
      .unwrap();

    assert!(names.contains(&"Legal Fees".to_string()));
    assert!(names.contains(&"Travel".to_string()));
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
  }

  #[tokio::test]
  async fn test_configured_categories_require_admin() {
    let service = expense_service();
    let use_case = ListConfiguredCategoriesUseCase::new(service);

    let err = use_case
      .execute(Requester::new(Uuid::new_v4(), Role::User))
      .await
      .unwrap_err();
    assert!(matches!(err, ExpenseError::AdminRequired));

    let categories = use_case
      .execute(Requester::new(Uuid::new_v4(), Role::Admin))
      .await
      .unwrap();
    assert_eq!(categories.len(), 10);
  }
}
