use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::auth::OwnerScope;
use crate::domain::pagination::{Page, PageRequest};

use super::entities::{Customer, Invoice};
use super::errors::{DispatchError, InvoiceError};
use super::value_objects::{InvoiceNumber, InvoiceStatus};

/// Filters for one owner's invoice listing.
#[derive(Debug, Clone, Default)]
pub struct InvoiceQuery {
  pub owner_id: Uuid,
  pub status: Option<InvoiceStatus>,
  /// Matched case-insensitively against customer name and invoice number
  pub search: Option<String>,
  pub created_from: Option<DateTime<Utc>>,
  pub created_to: Option<DateTime<Utc>>,
  pub page: PageRequest,
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
  /// Inserts or replaces the customer
  async fn save(&self, customer: &Customer) -> Result<(), InvoiceError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, InvoiceError>;
  async fn find_by_email(
    &self,
    owner_id: Uuid,
    email: &str,
  ) -> Result<Option<Customer>, InvoiceError>;
  /// Ordered by name
  async fn find_in_scope(&self, scope: OwnerScope) -> Result<Vec<Customer>, InvoiceError>;
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Allocates the next invoice number. Numbers are never reused.
  async fn next_number(&self) -> Result<InvoiceNumber, InvoiceError>;

  /// Atomically upserts the invoice together with its ordered line items
  async fn save(&self, invoice: &Invoice) -> Result<(), InvoiceError>;

  /// Upserts the customer and then the invoice in one transaction. Either
  /// both writes land or neither does.
  async fn save_with_customer(
    &self,
    invoice: &Invoice,
    customer: &Customer,
  ) -> Result<(), InvoiceError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError>;

  /// Newest first
  async fn list(&self, query: &InvoiceQuery) -> Result<Page<Invoice>, InvoiceError>;

  /// Every invoice visible in `scope`, optionally bounded by creation time
  async fn find_in_scope(
    &self,
    scope: OwnerScope,
    created_from: Option<DateTime<Utc>>,
    created_to: Option<DateTime<Utc>>,
  ) -> Result<Vec<Invoice>, InvoiceError>;

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError>;
}

/// A rendered, read-only invoice document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
  pub file_name: String,
  pub content_type: &'static str,
  pub bytes: Vec<u8>,
}

#[async_trait]
pub trait DocumentRenderer: Send + Sync {
  async fn render(
    &self,
    invoice: &Invoice,
    customer: &Customer,
  ) -> Result<RenderedDocument, DispatchError>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
  async fn send_invoice(
    &self,
    to: &str,
    invoice: &Invoice,
    customer: &Customer,
    document: &RenderedDocument,
  ) -> Result<(), DispatchError>;
}

#[async_trait]
pub trait WhatsAppSender: Send + Sync {
  async fn send_invoice(
    &self,
    phone: &str,
    invoice: &Invoice,
    customer: &Customer,
    document: &RenderedDocument,
  ) -> Result<(), DispatchError>;
}
