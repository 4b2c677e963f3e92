use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::invoice::{InvoiceError, InvoiceService, InvoiceStatus};

#[derive(Debug, Serialize)]
pub struct ChangeInvoiceStatusResponse {
  pub invoice_id: Uuid,
  pub status: InvoiceStatus,
}

pub struct ChangeInvoiceStatusUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ChangeInvoiceStatusUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    invoice_id: Uuid,
    new_status: &str,
  ) -> Result<ChangeInvoiceStatusResponse, InvoiceError> {
    let invoice = self
      .invoice_service
      .change_status(requester, invoice_id, new_status)
      .await?;

    Ok(ChangeInvoiceStatusResponse {
      invoice_id: invoice.id,
      status: invoice.status,
    })
  }
}
