use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::{OwnerScope, Requester};
use crate::domain::ledger::Money;
use crate::domain::pagination::{Page, PageRequest};

use super::entities::{DEFAULT_CATEGORIES, Expense, ExpenseCategory, ExpenseDetails};
use super::errors::ExpenseError;
use super::ports::{ExpenseCategoryRepository, ExpenseFilter, ExpenseRepository};

/// Raw expense input
#[derive(Debug, Clone)]
pub struct ExpenseInput {
  pub title: String,
  pub description: Option<String>,
  pub amount: Decimal,
  pub category: String,
  pub date: NaiveDate,
}

impl ExpenseInput {
  fn validate(self) -> Result<ExpenseDetails, ExpenseError> {
    let amount = Money::new(self.amount)?;
    Ok(ExpenseDetails::new(
      self.title,
      self.description,
      amount,
      self.category,
      self.date,
    )?)
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseListing {
  pub page: Page<Expense>,
  /// Sum over every expense matching the filter, not just this page
  pub total_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
  pub amount: Money,
  pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseReport {
  pub expenses: Vec<Expense>,
  pub total_amount: Money,
  pub categories: BTreeMap<String, CategoryStats>,
  pub monthly: BTreeMap<String, Money>,
}

impl ExpenseReport {
  pub fn from_expenses(expenses: Vec<Expense>) -> Self {
    let mut categories: BTreeMap<String, CategoryStats> = BTreeMap::new();
    let mut monthly: BTreeMap<String, Money> = BTreeMap::new();

    for expense in &expenses {
      let stats = categories
        .entry(expense.category.clone())
        .or_insert(CategoryStats {
          amount: Money::zero(),
          count: 0,
        });
      stats.amount = stats.amount.add(expense.amount);
      stats.count += 1;

      let month = monthly.entry(expense.month_key()).or_default();
      *month = month.add(expense.amount);
    }

    Self {
      total_amount: expenses.iter().map(|e| e.amount).sum(),
      expenses,
      categories,
      monthly,
    }
  }
}

pub struct ExpenseService {
  expense_repo: Arc<dyn ExpenseRepository>,
  category_repo: Arc<dyn ExpenseCategoryRepository>,
}

impl ExpenseService {
  pub fn new(
    expense_repo: Arc<dyn ExpenseRepository>,
    category_repo: Arc<dyn ExpenseCategoryRepository>,
  ) -> Self {
    Self {
      expense_repo,
      category_repo,
    }
  }

  pub async fn create_expense(
    &self,
    requester: Requester,
    input: ExpenseInput,
  ) -> Result<Expense, ExpenseError> {
    let expense = Expense::new(requester.user_id, input.validate()?);
    self.expense_repo.save(&expense).await?;

    tracing::info!(
      expense_id = %expense.id,
      category = %expense.category,
      amount = %expense.amount,
      "Expense recorded"
    );
    Ok(expense)
  }

  pub async fn get_expense(
    &self,
    requester: Requester,
    expense_id: Uuid,
  ) -> Result<Expense, ExpenseError> {
    self.load_owned(requester, expense_id).await
  }

  pub async fn list_expenses(
    &self,
    requester: Requester,
    filter: ExpenseFilter,
    page: PageRequest,
  ) -> Result<ExpenseListing, ExpenseError> {
    let matching = self
      .expense_repo
      .find_matching(OwnerScope::Owner(requester.user_id), &clean(filter))
      .await?;
    let total_amount = matching.iter().map(|e| e.amount).sum();

    Ok(ExpenseListing {
      page: Page::slice(matching, page),
      total_amount,
    })
  }

  pub async fn update_expense(
    &self,
    requester: Requester,
    expense_id: Uuid,
    input: ExpenseInput,
  ) -> Result<Expense, ExpenseError> {
    let details = input.validate()?;
    let mut expense = self.load_owned(requester, expense_id).await?;

    expense.update(details);
    self.expense_repo.save(&expense).await?;

    tracing::info!(expense_id = %expense.id, "Expense updated");
    Ok(expense)
  }

  pub async fn delete_expense(
    &self,
    requester: Requester,
    expense_id: Uuid,
  ) -> Result<(), ExpenseError> {
    let expense = self.load_owned(requester, expense_id).await?;
    self.expense_repo.delete(expense.id).await?;

    tracing::info!(expense_id = %expense.id, "Expense deleted");
    Ok(())
  }

  /// Default categories merged with the requester's own, sorted and deduplicated.
  pub async fn categories(&self, requester: Requester) -> Result<Vec<String>, ExpenseError> {
    let used = self.expense_repo.used_categories(requester.user_id).await?;

    let merged: BTreeSet<String> = DEFAULT_CATEGORIES
      .iter()
      .map(|(name, _)| name.to_string())
      .chain(used.into_iter().filter(|c| !c.trim().is_empty()))
      .collect();
    Ok(merged.into_iter().collect())
  }

  pub async fn expense_report(
    &self,
    requester: Requester,
    filter: ExpenseFilter,
  ) -> Result<ExpenseReport, ExpenseError> {
    let expenses = self
      .expense_repo
      .find_matching(OwnerScope::Owner(requester.user_id), &clean(filter))
      .await?;
    Ok(ExpenseReport::from_expenses(expenses))
  }

  pub async fn configured_categories(
    &self,
    requester: Requester,
  ) -> Result<Vec<ExpenseCategory>, ExpenseError> {
    if !requester.is_admin() {
      return Err(ExpenseError::AdminRequired);
    }
    self.category_repo.list().await
  }

  async fn load_owned(&self, requester: Requester, expense_id: Uuid) -> Result<Expense, ExpenseError> {
    self
      .expense_repo
      .find_by_id(expense_id)
      .await?
      .filter(|expense| requester.owns(expense.owner_id))
      .ok_or(ExpenseError::ExpenseNotFound(expense_id))
  }
}

fn clean(filter: ExpenseFilter) -> ExpenseFilter {
  ExpenseFilter {
    category: filter.category.filter(|c| !c.trim().is_empty()),
    ..filter
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::Role;
  use crate::infrastructure::persistence::memory::{
    InMemoryExpenseCategoryRepository, InMemoryExpenseRepository,
  };
  use rust_decimal_macros::dec;

  fn service() -> ExpenseService {
    ExpenseService::new(
      Arc::new(InMemoryExpenseRepository::new()),
      Arc::new(InMemoryExpenseCategoryRepository::with_defaults()),
    )
  }

  fn input(title: &str, amount: Decimal, category: &str, date: (i32, u32, u32)) -> ExpenseInput {
    ExpenseInput {
      title: title.to_string(),
      description: None,
      amount,
      category: category.to_string(),
      date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
    }
  }

  #[tokio::test]
  async fn test_list_filters_and_totals() {
    let service = service();
    let owner = Requester::new(Uuid::new_v4(), Role::User);

    service
      .create_expense(owner, input("Taxi", dec!(250), "Travel", (2024, 1, 10)))
      .await
      .unwrap();
    service
      .create_expense(owner, input("Flight", dec!(4500), "Travel", (2024, 2, 5)))
      .await
      .unwrap();
    service
      .create_expense(owner, input("Lunch", dec!(300), "Meals", (2024, 2, 6)))
      .await
      .unwrap();

    let travel = service
      .list_expenses(
        owner,
        ExpenseFilter {
          category: Some("Travel".to_string()),
          ..ExpenseFilter::default()
        },
        PageRequest::new(Some(1), Some(1), 10),
      )
      .await
      .unwrap();
    assert_eq!(travel.page.total, 2);
    assert_eq!(travel.page.items.len(), 1);
    assert_eq!(travel.page.items[0].title, "Flight");
    assert_eq!(travel.total_amount.amount(), dec!(4750));

    let february = service
      .list_expenses(
        owner,
        ExpenseFilter {
          start_date: NaiveDate::from_ymd_opt(2024, 2, 1),
          end_date: NaiveDate::from_ymd_opt(2024, 2, 29),
          ..ExpenseFilter::default()
        },
        PageRequest::default(),
      )
      .await
      .unwrap();
    assert_eq!(february.page.total, 2);
  }

  #[tokio::test]
  async fn test_report_groups_by_category_and_month() {
    let service = service();
    let owner = Requester::new(Uuid::new_v4(), Role::User);

    for (title, amount, category, date) in [
      ("Taxi", dec!(250), "Travel", (2024, 1, 10)),
      ("Flight", dec!(4500), "Travel", (2024, 2, 5)),
      ("Lunch", dec!(300), "Meals", (2024, 2, 6)),
    ] {
      service
        .create_expense(owner, input(title, amount, category, date))
        .await
        .unwrap();
    }

    let report = service
      .expense_report(owner, ExpenseFilter::default())
      .await
      .unwrap();

    assert_eq!(report.total_amount.amount(), dec!(5050));
    assert_eq!(report.categories["Travel"].count, 2);
    assert_eq!(report.monthly["2024-02"].amount(), dec!(4800));
  }

  #[tokio::test]
  async fn test_categories_merge_used_names() {
    let service = service();
    let owner = Requester::new(Uuid::new_v4(), Role::User);
    service
      .create_expense(owner, input("Coworking", dec!(900), "Coworking", (2024, 1, 1)))
      .await
      .unwrap();
    service
      .create_expense(owner, input("Bus", dec!(20), "Travel", (2024, 1, 1)))
      .await
      .unwrap();

    let categories = service.categories(owner).await.unwrap();

    assert_eq!(categories.len(), 11);
    assert!(categories.windows(2).all(|w| w[0] < w[1]));
    assert!(categories.contains(&"Coworking".to_string()));
  }

  #[tokio::test]
  async fn test_expenses_are_owner_scoped() {
    let service = service();
    let owner = Requester::new(Uuid::new_v4(), Role::User);
    let expense = service
      .create_expense(owner, input("Taxi", dec!(250), "Travel", (2024, 1, 10)))
      .await
      .unwrap();

    let stranger = Requester::new(Uuid::new_v4(), Role::Admin);
    let err = service.get_expense(stranger, expense.id).await.unwrap_err();
    assert!(matches!(err, ExpenseError::ExpenseNotFound(_)));
  }

  #[tokio::test]
  async fn test_configured_categories_admin_only() {
    let service = service();

    let err = service
      .configured_categories(Requester::new(Uuid::new_v4(), Role::User))
      .await
      .unwrap_err();
    assert!(matches!(err, ExpenseError::AdminRequired));

    let categories = service
      .configured_categories(Requester::new(Uuid::new_v4(), Role::Admin))
      .await
      .unwrap();
    assert_eq!(categories.len(), 10);
  }

  #[tokio::test]
  async fn test_negative_amount_rejected() {
    let service = service();
    let owner = Requester::new(Uuid::new_v4(), Role::User);

    let err = service
      .create_expense(owner, input("Refund", dec!(-10), "Other", (2024, 1, 1)))
      .await
      .unwrap_err();
    assert!(matches!(err, ExpenseError::Validation(_)));
  }
}
