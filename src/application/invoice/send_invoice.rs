use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::invoice::{DispatchChannels, InvoiceError, InvoiceService, InvoiceStatus};

#[derive(Debug, Clone, Copy)]
pub struct SendInvoiceCommand {
  pub email: bool,
  pub whatsapp: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendInvoiceResponse {
  pub invoice_id: Uuid,
  pub status: InvoiceStatus,
  pub delivered: Vec<&'static str>,
  pub skipped: Vec<&'static str>,
  pub message: String,
}

pub struct SendInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl SendInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    invoice_id: Uuid,
    command: SendInvoiceCommand,
  ) -> Result<SendInvoiceResponse, InvoiceError> {
    let outcome = self
      .invoice_service
      .send_invoice(
        requester,
        invoice_id,
        DispatchChannels {
          email: command.email,
          whatsapp: command.whatsapp,
        },
      )
      .await?;

    let mut message = if outcome.delivered.is_empty() {
      "Invoice marked as sent".to_string()
    } else {
      format!("Invoice sent via {}", outcome.delivered.join(" and "))
    };
    if !outcome.skipped.is_empty() {
      message.push_str(&format!(
        ". Skipped {} (no customer address)",
        outcome.skipped.join(" and ")
      ));
    }

    Ok(SendInvoiceResponse {
      invoice_id: outcome.invoice.id,
      status: outcome.invoice.status,
      delivered: outcome.delivered,
      skipped: outcome.skipped,
      message,
    })
  }
}
