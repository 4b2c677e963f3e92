use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::auth::OwnerScope;
use crate::domain::expense::{
  Expense, ExpenseCategory, ExpenseCategoryRepository, ExpenseError, ExpenseFilter,
  ExpenseRepository,
};

#[derive(Default)]
pub struct InMemoryExpenseRepository {
  expenses: RwLock<HashMap<Uuid, Expense>>,
}

impl InMemoryExpenseRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

fn matches(expense: &Expense, filter: &ExpenseFilter) -> bool {
  filter
    .category
    .as_ref()
    .is_none_or(|category| &expense.category == category)
    && filter.start_date.is_none_or(|start| expense.date >= start)
    && filter.end_date.is_none_or(|end| expense.date <= end)
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
  async fn save(&self, expense: &Expense) -> Result<(), ExpenseError> {
    self
      .expenses
      .write()
      .await
      .insert(expense.id, expense.clone());
    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>, ExpenseError> {
    Ok(self.expenses.read().await.get(&id).cloned())
  }

  async fn find_matching(
    &self,
    scope: OwnerScope,
    filter: &ExpenseFilter,
  ) -> Result<Vec<Expense>, ExpenseError> {
    let mut expenses: Vec<Expense> = self
      .expenses
      .read()
      .await
      .values()
      .filter(|e| scope.includes(e.owner_id) && matches(e, filter))
      .cloned()
      .collect();
    expenses.sort_by(|a, b| {
      b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
    });
    Ok(expenses)
  }

  async fn used_categories(&self, owner_id: Uuid) -> Result<Vec<String>, ExpenseError> {
    let expenses = self.expenses.read().await;
    let categories: BTreeSet<String> = expenses
      .values()
      .filter(|e| e.owner_id == owner_id)
      .map(|e| e.category.clone())
      .collect();
    Ok(categories.into_iter().collect())
  }

  async fn delete(&self, id: Uuid) -> Result<(), ExpenseError> {
    self
      .expenses
      .write()
      .await
      .remove(&id)
      .map(|_| ())
      .ok_or(ExpenseError::ExpenseNotFound(id))
  }
}

pub struct InMemoryExpenseCategoryRepository {
  categories: Vec<ExpenseCategory>,
}

impl InMemoryExpenseCategoryRepository {
  /// Seeded with the same categories as the initial migration
  pub fn with_defaults() -> Self {
    let mut categories = ExpenseCategory::defaults();
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    Self { categories }
  }
}

#[async_trait]
impl ExpenseCategoryRepository for InMemoryExpenseCategoryRepository {
  async fn list(&self) -> Result<Vec<ExpenseCategory>, ExpenseError> {
    Ok(self.categories.clone())
  }
}
