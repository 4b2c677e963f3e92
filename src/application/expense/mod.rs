//! Expense bookkeeping use cases

mod expense_categories;
mod list_expenses;
mod record_expense;

#[cfg(test)]
pub(crate) mod test_support;

pub use expense_categories::{ListConfiguredCategoriesUseCase, ListExpenseCategoriesUseCase};
pub use list_expenses::{ExpenseReportUseCase, ListExpensesCommand, ListExpensesUseCase};
pub use record_expense::{
  CreateExpenseUseCase, DeleteExpenseUseCase, GetExpenseUseCase, UpdateExpenseUseCase,
};
