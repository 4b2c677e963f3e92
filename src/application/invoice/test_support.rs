use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::{Requester, Role};
use crate::domain::invoice::{CustomerDetails, InvoiceService, LineItemCandidate};
use crate::infrastructure::dispatch::{
  JsonDocumentRenderer, LoggingEmailSender, LoggingWhatsAppSender,
};
use crate::infrastructure::persistence::memory::{
  InMemoryCustomerRepository, InMemoryInvoiceRepository,
};

/// Service backed by in-memory storage with email delivery enabled and
/// WhatsApp disabled
pub fn invoice_service() -> Arc<InvoiceService> {
  let customers = Arc::new(InMemoryCustomerRepository::new());
  let output_dir = std::env::temp_dir().join(format!("billdesk-invoices-{}", Uuid::new_v4()));

  Arc::new(InvoiceService::new(
    Arc::new(InMemoryInvoiceRepository::new(customers.clone())),
    customers,
    Arc::new(JsonDocumentRenderer::new(output_dir, "₹".to_string())),
    Arc::new(LoggingEmailSender::new(true)),
    Arc::new(LoggingWhatsAppSender::new(false)),
  ))
}

pub fn user() -> Requester {
  Requester::new(Uuid::new_v4(), Role::User)
}

pub fn customer(name: &str, email: Option<&str>) -> CustomerDetails {
  CustomerDetails {
    name: name.to_string(),
    email: email.map(str::to_string),
    contact: Some("9800012345".to_string()),
    address: None,
  }
}

pub fn row(description: &str, quantity: &str, rate: &str) -> LineItemCandidate {
  LineItemCandidate {
    description: Some(description.to_string()),
    quantity: Some(quantity.to_string()),
    rate: Some(rate.to_string()),
  }
}
