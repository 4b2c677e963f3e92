use serde::Serialize;

use crate::domain::invoice::{Customer, Invoice, InvoiceDetails};

/// An invoice with its customer embedded
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
  #[serde(flatten)]
  pub invoice: Invoice,
  pub customer: Option<Customer>,
}

impl From<InvoiceDetails> for InvoiceResponse {
  fn from(details: InvoiceDetails) -> Self {
    Self {
      invoice: details.invoice,
      customer: details.customer,
    }
  }
}
