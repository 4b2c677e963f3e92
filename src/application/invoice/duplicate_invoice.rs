use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::invoice::{InvoiceError, InvoiceService};

use super::InvoiceResponse;

pub struct DuplicateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DuplicateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    invoice_id: Uuid,
  ) -> Result<InvoiceResponse, InvoiceError> {
    let details = self
      .invoice_service
      .duplicate_invoice(requester, invoice_id)
      .await?;
    Ok(details.into())
  }
}
