use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::auth::OwnerScope;
use crate::domain::invoice::{
  Customer, Invoice, InvoiceError, InvoiceNumber, InvoiceQuery, InvoiceRepository, InvoiceStatus,
  LineItem, LineItemDescription,
};
use crate::domain::ledger::{Money, Quantity, TaxRate};
use crate::domain::pagination::Page;

use super::customer_repository::upsert_customer;

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: Uuid,
  owner_id: Uuid,
  customer_id: Uuid,
  invoice_number: String,
  tax_rate: Decimal,
  discount: Decimal,
  advance_paid: Decimal,
  subtotal: Decimal,
  tax_amount: Decimal,
  total: Decimal,
  remaining: Decimal,
  status: String,
  notes: String,
  due_date: Option<NaiveDate>,
  email_sent: bool,
  whatsapp_sent: bool,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
  paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct LineItemRow {
  invoice_id: Uuid,
  description: String,
  quantity: Decimal,
  rate: Decimal,
}

impl TryFrom<LineItemRow> for LineItem {
  type Error = InvoiceError;

  fn try_from(row: LineItemRow) -> Result<Self, Self::Error> {
    Ok(LineItem::new(
      LineItemDescription::new(row.description)?,
      Quantity::new(row.quantity)?,
      Money::new(row.rate)?,
    ))
  }
}

impl InvoiceRow {
  fn into_invoice(self, line_items: Vec<LineItem>) -> Result<Invoice, InvoiceError> {
    Ok(Invoice {
      id: self.id,
      owner_id: self.owner_id,
      customer_id: self.customer_id,
      invoice_number: InvoiceNumber::new(self.invoice_number)?,
      line_items,
      tax_rate: TaxRate::new(self.tax_rate)?,
      discount: Money::new(self.discount)?,
      advance_paid: Money::new(self.advance_paid)?,
      subtotal: Money::new(self.subtotal)?,
      tax_amount: Money::new(self.tax_amount)?,
      total: Money::new(self.total)?,
      remaining: Money::new(self.remaining)?,
      status: InvoiceStatus::from_str(&self.status)?,
      notes: self.notes,
      due_date: self.due_date,
      email_sent: self.email_sent,
      whatsapp_sent: self.whatsapp_sent,
      created_at: self.created_at,
      updated_at: self.updated_at,
      paid_at: self.paid_at,
    })
  }
}

const INVOICE_COLUMNS: &str = r#"
    i.id, i.owner_id, i.customer_id, i.invoice_number, i.tax_rate, i.discount,
    i.advance_paid, i.subtotal, i.tax_amount, i.total, i.remaining, i.status,
    i.notes, i.due_date, i.email_sent, i.whatsapp_sent, i.created_at,
    i.updated_at, i.paid_at
"#;

/// Shared WHERE clause of the listing and its count. `$1` owner, `$2` status,
/// `$3` ILIKE pattern, `$4`/`$5` creation bounds.
const LIST_FILTER: &str = r#"
    i.owner_id = $1
    AND ($2::text IS NULL OR i.status = $2)
    AND ($3::text IS NULL OR i.invoice_number ILIKE $3 OR c.name ILIKE $3)
    AND ($4::timestamptz IS NULL OR i.created_at >= $4)
    AND ($5::timestamptz IS NULL OR i.created_at <= $5)
"#;

pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Attaches ordered line items to each row
  async fn hydrate(&self, rows: Vec<InvoiceRow>) -> Result<Vec<Invoice>, InvoiceError> {
    if rows.is_empty() {
      return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let item_rows = sqlx::query_as::<_, LineItemRow>(
      r#"
            SELECT invoice_id, description, quantity, rate
            FROM invoice_line_items
            WHERE invoice_id = ANY($1)
            ORDER BY invoice_id, position
            "#,
    )
    .bind(&ids)
    .fetch_all(&self.pool)
    .await?;

    let mut items: HashMap<Uuid, Vec<LineItem>> = HashMap::new();
    for row in item_rows {
      let invoice_id = row.invoice_id;
      items.entry(invoice_id).or_default().push(row.try_into()?);
    }

    rows
      .into_iter()
      .map(|row| {
        let line_items = items.remove(&row.id).unwrap_or_default();
        row.into_invoice(line_items)
      })
      .collect()
  }

  /// Upserts the invoice row and rewrites its line items
  async fn upsert_invoice(
    tx: &mut Transaction<'_, Postgres>,
    invoice: &Invoice,
  ) -> Result<(), InvoiceError> {
    sqlx::query(
      r#"
            INSERT INTO invoices (
                id, owner_id, customer_id, invoice_number, tax_rate, discount,
                advance_paid, subtotal, tax_amount, total, remaining, status,
                notes, due_date, email_sent, whatsapp_sent, created_at,
                updated_at, paid_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            ON CONFLICT (id) DO UPDATE
            SET customer_id = EXCLUDED.customer_id,
                tax_rate = EXCLUDED.tax_rate,
                discount = EXCLUDED.discount,
                advance_paid = EXCLUDED.advance_paid,
                subtotal = EXCLUDED.subtotal,
                tax_amount = EXCLUDED.tax_amount,
                total = EXCLUDED.total,
                remaining = EXCLUDED.remaining,
                status = EXCLUDED.status,
                notes = EXCLUDED.notes,
                due_date = EXCLUDED.due_date,
                email_sent = EXCLUDED.email_sent,
                whatsapp_sent = EXCLUDED.whatsapp_sent,
                updated_at = EXCLUDED.updated_at,
                paid_at = EXCLUDED.paid_at
            "#,
    )
    .bind(invoice.id)
    .bind(invoice.owner_id)
    .bind(invoice.customer_id)
    .bind(invoice.invoice_number.value())
    .bind(invoice.tax_rate.value())
    .bind(invoice.discount.amount())
    .bind(invoice.advance_paid.amount())
    .bind(invoice.subtotal.amount())
    .bind(invoice.tax_amount.amount())
    .bind(invoice.total.amount())
    .bind(invoice.remaining.amount())
    .bind(invoice.status.as_str())
    .bind(&invoice.notes)
    .bind(invoice.due_date)
    .bind(invoice.email_sent)
    .bind(invoice.whatsapp_sent)
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .bind(invoice.paid_at)
    .execute(&mut **tx)
    .await?;

    Self::replace_line_items(tx, invoice).await
  }

  async fn replace_line_items(
    tx: &mut Transaction<'_, Postgres>,
    invoice: &Invoice,
  ) -> Result<(), InvoiceError> {
    sqlx::query("DELETE FROM invoice_line_items WHERE invoice_id = $1")
      .bind(invoice.id)
      .execute(&mut **tx)
      .await?;

    for (position, item) in invoice.line_items.iter().enumerate() {
      sqlx::query(
        r#"
            INSERT INTO invoice_line_items (invoice_id, position, description, quantity, rate)
            VALUES ($1, $2, $3, $4, $5)
            "#,
      )
      .bind(invoice.id)
      .bind(position as i32)
      .bind(item.description.value())
      .bind(item.quantity.value())
      .bind(item.rate.amount())
      .execute(&mut **tx)
      .await?;
    }

    Ok(())
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn next_number(&self) -> Result<InvoiceNumber, InvoiceError> {
    let sequence: i64 = sqlx::query_scalar("SELECT nextval('invoice_number_seq')")
      .fetch_one(&self.pool)
      .await?;
    Ok(InvoiceNumber::from_sequence(sequence))
  }

  async fn save(&self, invoice: &Invoice) -> Result<(), InvoiceError> {
    let mut tx = self.pool.begin().await?;
    Self::upsert_invoice(&mut tx, invoice).await?;
    tx.commit().await?;
    Ok(())
  }

  async fn save_with_customer(
    &self,
    invoice: &Invoice,
    customer: &Customer,
  ) -> Result<(), InvoiceError> {
    let mut tx = self.pool.begin().await?;
    upsert_customer(&mut *tx, customer).await?;
    Self::upsert_invoice(&mut tx, invoice).await?;
    tx.commit().await?;
    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      "SELECT {INVOICE_COLUMNS} FROM invoices i WHERE i.id = $1"
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    match row {
      Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
      None => Ok(None),
    }
  }

  async fn list(&self, query: &InvoiceQuery) -> Result<Page<Invoice>, InvoiceError> {
    let status = query.status.map(|s| s.as_str());
    let pattern = query.search.as_ref().map(|term| format!("%{}%", term));

    let total: i64 = sqlx::query_scalar(&format!(
      r#"
            SELECT COUNT(*)
            FROM invoices i
            JOIN customers c ON c.id = i.customer_id
            WHERE {LIST_FILTER}
            "#
    ))
    .bind(query.owner_id)
    .bind(status)
    .bind(&pattern)
    .bind(query.created_from)
    .bind(query.created_to)
    .fetch_one(&self.pool)
    .await?;

    let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices i
            JOIN customers c ON c.id = i.customer_id
            WHERE {LIST_FILTER}
            ORDER BY i.created_at DESC, i.invoice_number DESC
            LIMIT $6 OFFSET $7
            "#
    ))
    .bind(query.owner_id)
    .bind(status)
    .bind(&pattern)
    .bind(query.created_from)
    .bind(query.created_to)
    .bind(query.page.limit())
    .bind(query.page.offset())
    .fetch_all(&self.pool)
    .await?;

    let invoices = self.hydrate(rows).await?;
    Ok(Page::new(invoices, query.page, total.max(0) as u64))
  }

  async fn find_in_scope(
    &self,
    scope: OwnerScope,
    created_from: Option<DateTime<Utc>>,
    created_to: Option<DateTime<Utc>>,
  ) -> Result<Vec<Invoice>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            SELECT {INVOICE_COLUMNS}
            FROM invoices i
            WHERE ($1::uuid IS NULL OR i.owner_id = $1)
              AND ($2::timestamptz IS NULL OR i.created_at >= $2)
              AND ($3::timestamptz IS NULL OR i.created_at <= $3)
            ORDER BY i.created_at DESC
            "#
    ))
    .bind(scope.owner_id())
    .bind(created_from)
    .bind(created_to)
    .fetch_all(&self.pool)
    .await?;

    self.hydrate(rows).await
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(InvoiceError::InvoiceNotFound(id));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::{Role, User, UserRepository};
  use crate::domain::invoice::{Customer, CustomerName, CustomerRepository, LineItemCandidate};
  use crate::domain::invoice::parse_line_items;
  use crate::infrastructure::persistence::postgres::test_support::setup_test_db;
  use crate::infrastructure::persistence::postgres::{
    PostgresCustomerRepository, PostgresUserRepository,
  };
  use rust_decimal_macros::dec;

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_save_round_trips_line_items_in_order() {
    let (pool, _container) = setup_test_db().await;
    let users = PostgresUserRepository::new(pool.clone());
    let customers = PostgresCustomerRepository::new(pool.clone());
    let repo = PostgresInvoiceRepository::new(pool);

    let owner = users
      .create(User::new(
        "owner".to_string(),
        "owner@example.com".to_string(),
        "hash".to_string(),
        Role::User,
        None,
      ))
      .await
      .unwrap();
    let customer = Customer::new(
      owner.id,
      CustomerName::new("Acme".to_string()).unwrap(),
      Some("acme@example.com".to_string()),
      None,
      None,
    );

    let items = parse_line_items(vec![
      LineItemCandidate::new("Website Development", "1", "5000"),
      LineItemCandidate::new("Domain Registration", "1", "1500"),
    ]);
    let number = repo.next_number().await.unwrap();
    let mut invoice = Invoice::new(
      owner.id,
      customer.id,
      number,
      items,
      Money::new(dec!(500)).unwrap(),
    );
    repo.save_with_customer(&invoice, &customer).await.unwrap();
    assert!(customers.find_by_id(customer.id).await.unwrap().is_some());

    invoice.record_payment(dec!(3000), Utc::now()).unwrap();
    repo.save(&invoice).await.unwrap();

    let loaded = repo.find_by_id(invoice.id).await.unwrap().unwrap();
    assert_eq!(loaded.line_items.len(), 2);
    assert_eq!(loaded.line_items[0].description.value(), "Website Development");
    assert_eq!(loaded.remaining.amount(), dec!(3000));
    assert_eq!(loaded.status, InvoiceStatus::Sent);

    let page = repo
      .list(&InvoiceQuery {
        owner_id: owner.id,
        search: Some("acme".to_string()),
        ..InvoiceQuery::default()
      })
      .await
      .unwrap();
    assert_eq!(page.total, 1);
  }
}
