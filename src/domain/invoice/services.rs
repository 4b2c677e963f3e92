use chrono::{DateTime, Duration, NaiveTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::{OwnerScope, Requester};
use crate::domain::ledger::{Money, PaymentState};
use crate::domain::pagination::{Page, PageRequest};

use super::entities::{Customer, Invoice};
use super::errors::{DispatchError, InvoiceError};
use super::line_items::{LineItemCandidate, parse_line_items};
use super::ports::{
  CustomerRepository, DocumentRenderer, EmailSender, InvoiceQuery, InvoiceRepository,
  WhatsAppSender,
};
use super::value_objects::{CustomerName, InvoiceStatus};

/// Customer fields submitted with an invoice
#[derive(Debug, Clone)]
pub struct CustomerDetails {
  pub name: String,
  pub email: Option<String>,
  pub contact: Option<String>,
  pub address: Option<String>,
}

/// Invoice creation data
#[derive(Debug, Clone)]
pub struct NewInvoice {
  pub customer: CustomerDetails,
  pub items: Vec<LineItemCandidate>,
  pub advance_paid: Decimal,
}

/// Invoice update data
#[derive(Debug, Clone)]
pub struct InvoiceChanges {
  pub customer: CustomerDetails,
  pub items: Vec<LineItemCandidate>,
}

#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
  pub status: Option<InvoiceStatus>,
  pub search: Option<String>,
  pub created_from: Option<DateTime<Utc>>,
  pub created_to: Option<DateTime<Utc>>,
}

impl InvoiceFilter {
  /// Invoices created since midnight UTC
  pub fn today(now: DateTime<Utc>) -> Self {
    let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    Self {
      created_from: Some(midnight),
      created_to: Some(now),
      ..Self::default()
    }
  }

  /// Invoices created during the last seven days
  pub fn last_week(now: DateTime<Utc>) -> Self {
    Self {
      created_from: Some(now - Duration::days(7)),
      created_to: Some(now),
      ..Self::default()
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchChannels {
  pub email: bool,
  pub whatsapp: bool,
}

/// An invoice together with its customer
#[derive(Debug, Clone)]
pub struct InvoiceDetails {
  pub invoice: Invoice,
  pub customer: Option<Customer>,
}

#[derive(Debug, Clone)]
pub struct DispatchOutcome {
  pub invoice: Invoice,
  pub delivered: Vec<&'static str>,
  /// Requested channels the customer has no address for
  pub skipped: Vec<&'static str>,
}

pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  customer_repo: Arc<dyn CustomerRepository>,
  renderer: Arc<dyn DocumentRenderer>,
  email_sender: Arc<dyn EmailSender>,
  whatsapp_sender: Arc<dyn WhatsAppSender>,
}

impl InvoiceService {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    renderer: Arc<dyn DocumentRenderer>,
    email_sender: Arc<dyn EmailSender>,
    whatsapp_sender: Arc<dyn WhatsAppSender>,
  ) -> Self {
    Self {
      invoice_repo,
      customer_repo,
      renderer,
      email_sender,
      whatsapp_sender,
    }
  }

  pub async fn create_invoice(
    &self,
    requester: Requester,
    data: NewInvoice,
  ) -> Result<InvoiceDetails, InvoiceError> {
    let advance_paid = Money::new(data.advance_paid)?;
    let customer = self.resolve_customer(requester.user_id, data.customer).await?;
    let line_items = parse_line_items(data.items);
    let number = self.invoice_repo.next_number().await?;

    let invoice = Invoice::new(
      requester.user_id,
      customer.id,
      number,
      line_items,
      advance_paid,
    );
    self.invoice_repo.save_with_customer(&invoice, &customer).await?;

    tracing::info!(
      invoice_id = %invoice.id,
      invoice_number = %invoice.invoice_number,
      total = %invoice.total,
      "Invoice created"
    );

    Ok(InvoiceDetails {
      invoice,
      customer: Some(customer),
    })
  }

  pub async fn get_invoice(
    &self,
    requester: Requester,
    invoice_id: Uuid,
  ) -> Result<InvoiceDetails, InvoiceError> {
    let invoice = self.load_owned(requester, invoice_id).await?;
    let customer = self.customer_repo.find_by_id(invoice.customer_id).await?;
    Ok(InvoiceDetails { invoice, customer })
  }

  pub async fn list_invoices(
    &self,
    requester: Requester,
    filter: InvoiceFilter,
    page: PageRequest,
  ) -> Result<Page<InvoiceDetails>, InvoiceError> {
    let query = InvoiceQuery {
      owner_id: requester.user_id,
      status: filter.status,
      search: filter
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()),
      created_from: filter.created_from,
      created_to: filter.created_to,
      page,
    };

    let invoices = self.invoice_repo.list(&query).await?;
    let customers: HashMap<Uuid, Customer> = self
      .customer_repo
      .find_in_scope(OwnerScope::Owner(requester.user_id))
      .await?
      .into_iter()
      .map(|c| (c.id, c))
      .collect();

    Ok(invoices.map(|invoice| {
      let customer = customers.get(&invoice.customer_id).cloned();
      InvoiceDetails { invoice, customer }
    }))
  }

  pub async fn update_invoice(
    &self,
    requester: Requester,
    invoice_id: Uuid,
    changes: InvoiceChanges,
  ) -> Result<InvoiceDetails, InvoiceError> {
    let mut invoice = self.load_owned(requester, invoice_id).await?;
    let name = CustomerName::new(changes.customer.name)?;

    invoice.replace_details(parse_line_items(changes.items))?;

    let mut customer = self
      .customer_repo
      .find_by_id(invoice.customer_id)
      .await?
      .ok_or(InvoiceError::CustomerNotFound(invoice.customer_id))?;
    customer.update_contact(
      name,
      normalize(changes.customer.email),
      normalize(changes.customer.contact),
    );

    self.invoice_repo.save_with_customer(&invoice, &customer).await?;

    tracing::info!(invoice_id = %invoice.id, total = %invoice.total, "Invoice updated");

    Ok(InvoiceDetails {
      invoice,
      customer: Some(customer),
    })
  }

  pub async fn change_status(
    &self,
    requester: Requester,
    invoice_id: Uuid,
    status: &str,
  ) -> Result<Invoice, InvoiceError> {
    let new_status: InvoiceStatus = status.parse()?;
    let mut invoice = self.load_owned(requester, invoice_id).await?;

    invoice.change_status(new_status, Utc::now())?;
    self.invoice_repo.save(&invoice).await?;

    tracing::info!(invoice_id = %invoice.id, status = %invoice.status, "Invoice status changed");
    Ok(invoice)
  }

  pub async fn record_payment(
    &self,
    requester: Requester,
    invoice_id: Uuid,
    amount: Decimal,
  ) -> Result<(Invoice, PaymentState), InvoiceError> {
    let mut invoice = self.load_owned(requester, invoice_id).await?;

    let state = match invoice.record_payment(amount, Utc::now()) {
      Ok(state) => state,
      Err(e) => {
        tracing::warn!(invoice_id = %invoice_id, %amount, error = %e, "Payment rejected");
        return Err(e);
      }
    };
    self.invoice_repo.save(&invoice).await?;

    tracing::info!(
      invoice_id = %invoice.id,
      %amount,
      remaining = %invoice.remaining,
      state = %state,
      "Payment recorded"
    );
    Ok((invoice, state))
  }

  pub async fn duplicate_invoice(
    &self,
    requester: Requester,
    invoice_id: Uuid,
  ) -> Result<InvoiceDetails, InvoiceError> {
    let source = self.load_owned(requester, invoice_id).await?;
    let number = self.invoice_repo.next_number().await?;

    let copy = source.duplicate(number);
    self.invoice_repo.save(&copy).await?;

    tracing::info!(
      source_id = %source.id,
      invoice_id = %copy.id,
      invoice_number = %copy.invoice_number,
      "Invoice duplicated"
    );

    let customer = self.customer_repo.find_by_id(copy.customer_id).await?;
    Ok(InvoiceDetails {
      invoice: copy,
      customer,
    })
  }

  pub async fn delete_invoice(
    &self,
    requester: Requester,
    invoice_id: Uuid,
  ) -> Result<(), InvoiceError> {
    let invoice = self.load_owned(requester, invoice_id).await?;

    invoice.ensure_deletable()?;
    self.invoice_repo.delete(invoice.id).await?;

    tracing::info!(invoice_id = %invoice.id, "Invoice deleted");
    Ok(())
  }

  /// Renders the invoice and delivers it over the requested channels.
  ///
  /// Channels the customer has no address for are skipped. Any failed
  /// delivery fails the whole operation and the invoice is left as it was.
  pub async fn send_invoice(
    &self,
    requester: Requester,
    invoice_id: Uuid,
    channels: DispatchChannels,
  ) -> Result<DispatchOutcome, InvoiceError> {
    if !channels.email && !channels.whatsapp {
      return Err(InvoiceError::NoDispatchChannel);
    }

    let mut invoice = self.load_owned(requester, invoice_id).await?;
    let customer = self
      .customer_repo
      .find_by_id(invoice.customer_id)
      .await?
      .ok_or(InvoiceError::CustomerNotFound(invoice.customer_id))?;

    let document = self
      .renderer
      .render(&invoice, &customer)
      .await
      .map_err(|e| InvoiceError::DispatchFailed(e.to_string()))?;

    let mut delivered = Vec::new();
    let mut skipped = Vec::new();
    let mut failures = Vec::new();

    if channels.email {
      match customer.email.as_deref() {
        Some(to) => record_delivery(
          "email",
          self
            .email_sender
            .send_invoice(to, &invoice, &customer, &document)
            .await,
          &mut delivered,
          &mut failures,
        ),
        None => skipped.push("email"),
      }
    }

    if channels.whatsapp {
      match customer.whatsapp.as_deref() {
        Some(phone) => record_delivery(
          "whatsapp",
          self
            .whatsapp_sender
            .send_invoice(phone, &invoice, &customer, &document)
            .await,
          &mut delivered,
          &mut failures,
        ),
        None => skipped.push("whatsapp"),
      }
    }

    if !failures.is_empty() {
      tracing::warn!(
        invoice_id = %invoice.id,
        delivered = ?delivered,
        failures = ?failures,
        "Invoice dispatch failed"
      );
      return Err(InvoiceError::DispatchFailed(failures.join("; ")));
    }

    invoice.mark_dispatched(delivered.contains(&"email"), delivered.contains(&"whatsapp"));
    self.invoice_repo.save(&invoice).await?;

    tracing::info!(
      invoice_id = %invoice.id,
      delivered = ?delivered,
      skipped = ?skipped,
      "Invoice dispatched"
    );

    Ok(DispatchOutcome {
      invoice,
      delivered,
      skipped,
    })
  }

  pub async fn list_customers(&self, requester: Requester) -> Result<Vec<Customer>, InvoiceError> {
    self.customer_repo.find_in_scope(OwnerScope::Owner(requester.user_id)).await
  }

  // Helper methods

  async fn load_owned(&self, requester: Requester, invoice_id: Uuid) -> Result<Invoice, InvoiceError> {
    self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .filter(|invoice| requester.owns(invoice.owner_id))
      .ok_or(InvoiceError::InvoiceNotFound(invoice_id))
  }

  /// Finds the owner's customer by email. A new, unsaved customer is built
  /// when none matches; the caller persists it together with the invoice.
  async fn resolve_customer(
    &self,
    owner_id: Uuid,
    details: CustomerDetails,
  ) -> Result<Customer, InvoiceError> {
    let name = CustomerName::new(details.name)?;
    let email = normalize(details.email);

    if let Some(email) = email.as_deref() {
      if let Some(existing) = self.customer_repo.find_by_email(owner_id, email).await? {
        return Ok(existing);
      }
    }

    let customer = Customer::new(
      owner_id,
      name,
      email,
      normalize(details.contact),
      normalize(details.address),
    );

    tracing::debug!(customer_id = %customer.id, "New customer for invoice");
    Ok(customer)
  }
}

fn record_delivery(
  channel: &'static str,
  result: Result<(), DispatchError>,
  delivered: &mut Vec<&'static str>,
  failures: &mut Vec<String>,
) {
  match result {
    Ok(()) => delivered.push(channel),
    Err(e) => failures.push(e.to_string()),
  }
}

fn normalize(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}
