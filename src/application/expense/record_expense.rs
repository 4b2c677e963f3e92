use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::expense::{Expense, ExpenseError, ExpenseInput, ExpenseService};

pub struct CreateExpenseUseCase {
  expense_service: Arc<ExpenseService>,
}

impl CreateExpenseUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    input: ExpenseInput,
  ) -> Result<Expense, ExpenseError> {
    self.expense_service.create_expense(requester, input).await
  }
}

pub struct UpdateExpenseUseCase {
  expense_service: Arc<ExpenseService>,
}

impl UpdateExpenseUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    expense_id: Uuid,
    input: ExpenseInput,
  ) -> Result<Expense, ExpenseError> {
    self
      .expense_service
      .update_expense(requester, expense_id, input)
      .await
  }
}

pub struct GetExpenseUseCase {
  expense_service: Arc<ExpenseService>,
}

impl GetExpenseUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    expense_id: Uuid,
  ) -> Result<Expense, ExpenseError> {
    self.expense_service.get_expense(requester, expense_id).await
  }
}

pub struct DeleteExpenseUseCase {
  expense_service: Arc<ExpenseService>,
}

impl DeleteExpenseUseCase {
  pub fn new(expense_service: Arc<ExpenseService>) -> Self {
    Self { expense_service }
  }

  pub async fn execute(&self, requester: Requester, expense_id: Uuid) -> Result<(), ExpenseError> {
    self
      .expense_service
      .delete_expense(requester, expense_id)
      .await
  }
}
