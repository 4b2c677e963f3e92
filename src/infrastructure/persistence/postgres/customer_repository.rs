use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::domain::auth::OwnerScope;
use crate::domain::invoice::{Customer, CustomerName, CustomerRepository, InvoiceError};

#[derive(Debug, FromRow)]
struct CustomerRow {
  id: Uuid,
  owner_id: Uuid,
  name: String,
  email: Option<String>,
  phone: Option<String>,
  whatsapp: Option<String>,
  address: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
  type Error = InvoiceError;

  fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
    Ok(Customer {
      id: row.id,
      owner_id: row.owner_id,
      name: CustomerName::new(row.name)?,
      email: row.email,
      phone: row.phone,
      whatsapp: row.whatsapp,
      address: row.address,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

/// Inserts or replaces a customer row on any connection, so invoice writes
/// can include it in their transaction.
pub(super) async fn upsert_customer<'e, E>(
  executor: E,
  customer: &Customer,
) -> Result<(), InvoiceError>
where
  E: PgExecutor<'e>,
{
  sqlx::query(
    r#"
          INSERT INTO customers (
              id, owner_id, name, email, phone, whatsapp, address, created_at, updated_at
          )
          VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
          ON CONFLICT (id) DO UPDATE
          SET name = EXCLUDED.name,
              email = EXCLUDED.email,
              phone = EXCLUDED.phone,
              whatsapp = EXCLUDED.whatsapp,
              address = EXCLUDED.address,
              updated_at = EXCLUDED.updated_at
          "#,
  )
  .bind(customer.id)
  .bind(customer.owner_id)
  .bind(customer.name.value())
  .bind(&customer.email)
  .bind(&customer.phone)
  .bind(&customer.whatsapp)
  .bind(&customer.address)
  .bind(customer.created_at)
  .bind(customer.updated_at)
  .execute(executor)
  .await?;

  Ok(())
}

pub struct PostgresCustomerRepository {
  pool: PgPool,
}

impl PostgresCustomerRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
  async fn save(&self, customer: &Customer) -> Result<(), InvoiceError> {
    upsert_customer(&self.pool, customer).await
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, InvoiceError> {
    let row = sqlx::query_as::<_, CustomerRow>(
      r#"
            SELECT id, owner_id, name, email, phone, whatsapp, address, created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_by_email(
    &self,
    owner_id: Uuid,
    email: &str,
  ) -> Result<Option<Customer>, InvoiceError> {
    let row = sqlx::query_as::<_, CustomerRow>(
      r#"
            SELECT id, owner_id, name, email, phone, whatsapp, address, created_at, updated_at
            FROM customers
            WHERE owner_id = $1 AND email = $2
            ORDER BY created_at
            LIMIT 1
            "#,
    )
    .bind(owner_id)
    .bind(email)
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_in_scope(&self, scope: OwnerScope) -> Result<Vec<Customer>, InvoiceError> {
    let rows = sqlx::query_as::<_, CustomerRow>(
      r#"
            SELECT id, owner_id, name, email, phone, whatsapp, address, created_at, updated_at
            FROM customers
            WHERE ($1::uuid IS NULL OR owner_id = $1)
            ORDER BY name
            "#,
    )
    .bind(scope.owner_id())
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}
