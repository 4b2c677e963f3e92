use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::invoice::{InvoiceError, InvoiceService};

pub struct DeleteInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DeleteInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Paid invoices cannot be deleted
  pub async fn execute(&self, requester: Requester, invoice_id: Uuid) -> Result<(), InvoiceError> {
    self
      .invoice_service
      .delete_invoice(requester, invoice_id)
      .await
  }
}
