use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::auth::Requester;
use crate::domain::expense::{
  ExpenseError, ExpenseFilter, ExpenseListing, ExpenseReport, ExpenseService,
};
use crate::domain::pagination::PageRequest;

#[derive(Debug, Clone, Default)]
pub struct ListExpensesCommand {
  pub category: Option<String>,
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
  pub page: PageRequest,
}

impl ListExpensesCommand {
  fn filter(&self) -> ExpenseFilter {
    ExpenseFilter {
      category: self.category.clone(),
      start_date: self.start_date,
      end_date: self.end_date,
    }
  }
}

pub struct ListExpensesUseCase {
  expense_service: Arc<ExpenseService>,
}

impl ListExpensesUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    command: ListExpensesCommand,
  ) -> Result<ExpenseListing, ExpenseError> {
    let filter = command.filter();
    self
      .expense_service
      .list_expenses(requester, filter, command.page)
      .await
  }
}

/// Category and monthly breakdown over the same filter, unpaginated
pub struct ExpenseReportUseCase {
  expense_service: Arc<ExpenseService>,
}

impl ExpenseReportUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    command: ListExpensesCommand,
  ) -> Result<ExpenseReport, ExpenseError> {
    self
      .expense_service
      .expense_report(requester, command.filter())
      .await
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
  async fn test_listing_total_covers_all_pages() {
    let service = expense_service();
    let owner = Requester::new(Uuid::new_v4(), Role::User);
    let create = CreateExpenseUseCase::new(service.clone());
    for day in 1..=3 {
      create
        .execute(owner, expense("Fuel", "Travel", dec!(100), day))
        .await
        .unwrap();
    }
    create
      .execute(owner, expense("Paper", "Office Supplies", dec!(40), 4))
      .await
      .unwrap();

    let listing = ListExpensesUseCase::new(service.clone())
      .execute(
        owner,
        ListExpensesCommand {
          category: Some("Travel".to_string()),
          page: PageRequest::new(Some(1), Some(2), 10),
          ..ListExpensesCommand::default()
        },
      )
      .await
      .unwrap();

    assert_eq!(listing.page.items.len(), 2);
    assert_eq!(listing.page.total, 3);
    assert_eq!(listing.total_amount.amount(), dec!(300));

    let report = ExpenseReportUseCase::new(service)
      .execute(owner, ListExpensesCommand::default())
      .await
      .unwrap();
    assert_eq!(report.total_amount.amount(), dec!(340));
    assert_eq!(report.categories["Travel"].count, 3);
  }
}
