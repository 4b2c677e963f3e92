use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::auth::OwnerScope;
use crate::domain::expense::{
  Expense, ExpenseCategory, ExpenseCategoryRepository, ExpenseError, ExpenseFilter,
  ExpenseRepository,
};
use crate::domain::ledger::Money;

#[derive(Debug, FromRow)]
struct ExpenseRow {
  id: Uuid,
  owner_id: Uuid,
  title: String,
  description: Option<String>,
  amount: Decimal,
  category: String,
  date: NaiveDate,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<ExpenseRow> for Expense {
  type Error = ExpenseError;

  fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
    Ok(Expense {
      id: row.id,
      owner_id: row.owner_id,
      title: row.title,
      description: row.description,
      amount: Money::new(row.amount)?,
      category: row.category,
      date: row.date,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

pub struct PostgresExpenseRepository {
  pool: PgPool,
}

impl PostgresExpenseRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ExpenseRepository for PostgresExpenseRepository {
  async fn save(&self, expense: &Expense) -> Result<(), ExpenseError> {
    sqlx::query(
      r#"
            INSERT INTO expenses (
                id, owner_id, title, description, amount, category, date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE
            SET title = EXCLUDED.title,
                description = EXCLUDED.description,
                amount = EXCLUDED.amount,
                category = EXCLUDED.category,
                date = EXCLUDED.date,
                updated_at = EXCLUDED.updated_at
            "#,
    )
    .bind(expense.id)
    .bind(expense.owner_id)
    .bind(&expense.title)
    .bind(&expense.description)
    .bind(expense.amount.amount())
    .bind(&expense.category)
    .bind(expense.date)
    .bind(expense.created_at)
    .bind(expense.updated_at)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>, ExpenseError> {
    let row = sqlx::query_as::<_, ExpenseRow>(
      r#"
            SELECT id, owner_id, title, description, amount, category, date, created_at, updated_at
            FROM expenses
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(Expense::try_from).transpose()
  }

  async fn find_matching(
    &self,
    scope: OwnerScope,
    filter: &ExpenseFilter,
  ) -> Result<Vec<Expense>, ExpenseError> {
    let rows = sqlx::query_as::<_, ExpenseRow>(
      r#"
            SELECT id, owner_id, title, description, amount, category, date, created_at, updated_at
            FROM expenses
            WHERE ($1::uuid IS NULL OR owner_id = $1)
              AND ($2::text IS NULL OR category = $2)
              AND ($3::date IS NULL OR date >= $3)
              AND ($4::date IS NULL OR date <= $4)
            ORDER BY date DESC, created_at DESC
            "#,
    )
    .bind(scope.owner_id())
    .bind(&filter.category)
    .bind(filter.start_date)
    .bind(filter.end_date)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Expense::try_from).collect()
  }

  async fn used_categories(&self, owner_id: Uuid) -> Result<Vec<String>, ExpenseError> {
    let categories: Vec<String> = sqlx::query_scalar(
      "SELECT DISTINCT category FROM expenses WHERE owner_id = $1 ORDER BY category",
    )
    .bind(owner_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(categories)
  }

  async fn delete(&self, id: Uuid) -> Result<(), ExpenseError> {
    let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(ExpenseError::ExpenseNotFound(id));
    }
    Ok(())
  }
}

#[derive(Debug, FromRow)]
struct ExpenseCategoryRow {
  id: Uuid,
  name: String,
  description: Option<String>,
  created_at: DateTime<Utc>,
}

impl From<ExpenseCategoryRow> for ExpenseCategory {
  fn from(row: ExpenseCategoryRow) -> Self {
    ExpenseCategory {
      id: row.id,
      name: row.name,
      description: row.description,
      created_at: row.created_at,
    }
  }
}

/// Categories seeded by the migrations
pub struct PostgresExpenseCategoryRepository {
  pool: PgPool,
}

impl PostgresExpenseCategoryRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ExpenseCategoryRepository for PostgresExpenseCategoryRepository {
  async fn list(&self) -> Result<Vec<ExpenseCategory>, ExpenseError> {
    let rows = sqlx::query_as::<_, ExpenseCategoryRow>(
      "SELECT id, name, description, created_at FROM expense_categories ORDER BY name",
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(ExpenseCategory::from).collect())
  }
}
