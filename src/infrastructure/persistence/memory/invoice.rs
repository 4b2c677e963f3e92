use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::auth::OwnerScope;
use crate::domain::invoice::{
  Customer, CustomerRepository, Invoice, InvoiceError, InvoiceNumber, InvoiceQuery,
  InvoiceRepository,
};
use crate::domain::pagination::Page;

#[derive(Default)]
pub struct InMemoryCustomerRepository {
  customers: RwLock<HashMap<Uuid, Customer>>,
}

impl InMemoryCustomerRepository {
  pub fn new() -> Self {
    Self::default()
  }

  async fn names(&self) -> HashMap<Uuid, String> {
    self
      .customers
      .read()
      .await
      .values()
      .map(|c| (c.id, c.name.value().to_lowercase()))
      .collect()
  }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
  async fn save(&self, customer: &Customer) -> Result<(), InvoiceError> {
    self
      .customers
      .write()
      .await
      .insert(customer.id, customer.clone());
    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, InvoiceError> {
    Ok(self.customers.read().await.get(&id).cloned())
  }

  async fn find_by_email(
    &self,
    owner_id: Uuid,
    email: &str,
  ) -> Result<Option<Customer>, InvoiceError> {
    let customers = self.customers.read().await;
    Ok(
      customers
        .values()
        .find(|c| c.owner_id == owner_id && c.email.as_deref() == Some(email))
        .cloned(),
    )
  }

  async fn find_in_scope(&self, scope: OwnerScope) -> Result<Vec<Customer>, InvoiceError> {
    let mut customers: Vec<Customer> = self
      .customers
      .read()
      .await
      .values()
      .filter(|c| scope.includes(c.owner_id))
      .cloned()
      .collect();
    customers.sort_by(|a, b| a.name.value().cmp(b.name.value()));
    Ok(customers)
  }
}

/// Invoices with a process-local number sequence. Searches resolve customer
/// names through the shared customer store.
pub struct InMemoryInvoiceRepository {
  invoices: RwLock<HashMap<Uuid, Invoice>>,
  customers: Arc<InMemoryCustomerRepository>,
  sequence: AtomicI64,
}

impl InMemoryInvoiceRepository {
  pub fn new(customers: Arc<InMemoryCustomerRepository>) -> Self {
    Self {
      invoices: RwLock::new(HashMap::new()),
      customers,
      sequence: AtomicI64::new(0),
    }
  }
}

fn within(at: DateTime<Utc>, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> bool {
  from.is_none_or(|from| at >= from) && to.is_none_or(|to| at <= to)
}

fn newest_first(invoices: &mut [Invoice]) {
  invoices.sort_by(|a, b| {
    b.created_at
      .cmp(&a.created_at)
      .then_with(|| b.invoice_number.value().cmp(a.invoice_number.value()))
  });
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
  async fn next_number(&self) -> Result<InvoiceNumber, InvoiceError> {
    let next = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
    Ok(InvoiceNumber::from_sequence(next))
  }

  async fn save(&self, invoice: &Invoice) -> Result<(), InvoiceError> {
    self
      .invoices
      .write()
      .await
      .insert(invoice.id, invoice.clone());
    Ok(())
  }

  async fn save_with_customer(
    &self,
    invoice: &Invoice,
    customer: &Customer,
  ) -> Result<(), InvoiceError> {
    // Both locks are held so readers never see one write without the other
    let mut invoices = self.invoices.write().await;
    let mut customers = self.customers.customers.write().await;
    customers.insert(customer.id, customer.clone());
    invoices.insert(invoice.id, invoice.clone());
    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    Ok(self.invoices.read().await.get(&id).cloned())
  }

  async fn list(&self, query: &InvoiceQuery) -> Result<Page<Invoice>, InvoiceError> {
    let names = self.customers.names().await;
    let search = query.search.as_ref().map(|s| s.to_lowercase());

    let mut matched: Vec<Invoice> = self
      .invoices
      .read()
      .await
      .values()
      .filter(|i| i.owner_id == query.owner_id)
      .filter(|i| query.status.is_none_or(|status| i.status == status))
      .filter(|i| within(i.created_at, query.created_from, query.created_to))
      .filter(|i| match &search {
        None => true,
        Some(term) => {
          i.invoice_number.value().to_lowercase().contains(term)
            || names
              .get(&i.customer_id)
              .is_some_and(|name| name.contains(term))
        }
      })
      .cloned()
      .collect();

    newest_first(&mut matched);
    Ok(Page::slice(matched, query.page))
  }

  async fn find_in_scope(
    &self,
    scope: OwnerScope,
    created_from: Option<DateTime<Utc>>,
    created_to: Option<DateTime<Utc>>,
  ) -> Result<Vec<Invoice>, InvoiceError> {
    let mut invoices: Vec<Invoice> = self
      .invoices
      .read()
      .await
      .values()
      .filter(|i| scope.includes(i.owner_id) && within(i.created_at, created_from, created_to))
      .cloned()
      .collect();
    newest_first(&mut invoices);
    Ok(invoices)
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    self
      .invoices
      .write()
      .await
      .remove(&id)
      .map(|_| ())
      .ok_or(InvoiceError::InvoiceNotFound(id))
  }
}
