use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::auth::Requester;
use crate::domain::invoice::{
  CustomerDetails, InvoiceError, InvoiceService, LineItemCandidate, NewInvoice,
};
use crate::infrastructure::metrics::INVOICES_CREATED_TOTAL;

use super::InvoiceResponse;

#[derive(Debug, Clone)]
pub struct CreateInvoiceCommand {
  pub customer: CustomerDetails,
  /// Raw rows; incomplete ones are skipped
  pub items: Vec<LineItemCandidate>,
  pub advance_paid: Decimal,
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    command: CreateInvoiceCommand,
  ) -> Result<InvoiceResponse, InvoiceError> {
    let details = self
      .invoice_service
      .create_invoice(
        requester,
        NewInvoice {
          customer: command.customer,
          items: command.items,
          advance_paid: command.advance_paid,
        },
      )
      .await?;

    INVOICES_CREATED_TOTAL.inc();
    Ok(details.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::invoice::test_support::{customer, invoice_service, row, user};
  use crate::domain::invoice::InvoiceStatus;
  use rust_decimal_macros::dec;

  #[tokio::test]
  async fn test_create_skips_incomplete_rows_and_reuses_customer() {
    let use_case = CreateInvoiceUseCase::new(invoice_service());
    let requester = user();

    let first = use_case
      .execute(
        requester,
        CreateInvoiceCommand {
          customer: customer("Asha", Some("asha@example.com")),
          items: vec![
            row("Tax filing", "2", "500"),
            row("", "1", "100"),
            row("Free consult", "1", "0"),
          ],
          advance_paid: dec!(400),
        },
      )
      .await
      .unwrap();

    assert_eq!(first.invoice.line_items.len(), 1);
    assert_eq!(first.invoice.total.amount(), dec!(1000));
    assert_eq!(first.invoice.remaining.amount(), dec!(600));
    assert_eq!(first.invoice.status, InvoiceStatus::Draft);

    let second = use_case
      .execute(
        requester,
        CreateInvoiceCommand {
          customer: customer("Asha T.", Some("asha@example.com")),
          items: vec![row("Audit", "1", "300")],
          advance_paid: Decimal::ZERO,
        },
      )
      .await
      .unwrap();

    assert_eq!(second.invoice.customer_id, first.invoice.customer_id);
    assert_ne!(second.invoice.invoice_number, first.invoice.invoice_number);
  }
}
