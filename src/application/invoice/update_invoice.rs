use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::invoice::{
  CustomerDetails, InvoiceChanges, InvoiceError, InvoiceService, LineItemCandidate,
};

use super::InvoiceResponse;

#[derive(Debug, Clone)]
pub struct UpdateInvoiceCommand {
  pub customer: CustomerDetails,
  pub items: Vec<LineItemCandidate>,
}

pub struct UpdateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl UpdateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    invoice_id: Uuid,
    command: UpdateInvoiceCommand,
  ) -> Result<InvoiceResponse, InvoiceError> {
    let details = self
      .invoice_service
      .update_invoice(
        requester,
        invoice_id,
        InvoiceChanges {
          customer: command.customer,
          items: command.items,
        },
      )
      .await?;
    Ok(details.into())
  }
}
