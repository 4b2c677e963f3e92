use async_trait::async_trait;

use crate::domain::invoice::{
  Customer, DispatchError, EmailSender, Invoice, RenderedDocument, WhatsAppSender,
};

pub struct LoggingEmailSender {
  enabled: bool,
}

impl LoggingEmailSender {
  pub fn new(enabled: bool) -> Self {
    Self { enabled }
  }
}

#[async_trait]
impl EmailSender for LoggingEmailSender {
  async fn send_invoice(
    &self,
    to: &str,
    invoice: &Invoice,
    customer: &Customer,
    document: &RenderedDocument,
  ) -> Result<(), DispatchError> {
    if !self.enabled {
      return Err(DispatchError::Unavailable("Email"));
    }

    tracing::info!(
      invoice_id = %invoice.id,
      invoice_number = %invoice.invoice_number,
      to = %to,
      customer = %customer.name.value(),
      attachment = %document.file_name,
      "Invoice email queued"
    );
    Ok(())
  }
}

pub struct LoggingWhatsAppSender {
  enabled: bool,
}

impl LoggingWhatsAppSender {
  pub fn new(enabled: bool) -> Self {
    Self { enabled }
  }
}

#[async_trait]
impl WhatsAppSender for LoggingWhatsAppSender {
  async fn send_invoice(
    &self,
    phone: &str,
    invoice: &Invoice,
    customer: &Customer,
    document: &RenderedDocument,
  ) -> Result<(), DispatchError> {
    if !self.enabled {
      return Err(DispatchError::Unavailable("WhatsApp"));
    }

    tracing::info!(
      invoice_id = %invoice.id,
      invoice_number = %invoice.invoice_number,
      phone = %phone,
      customer = %customer.name.value(),
      attachment = %document.file_name,
      size = document.bytes.len(),
      "Invoice WhatsApp message queued"
    );
    Ok(())
  }
}
