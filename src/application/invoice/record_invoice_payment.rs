use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::invoice::{InvoiceError, InvoiceService, InvoiceStatus};
use crate::domain::ledger::{Money, PaymentState};
use crate::infrastructure::metrics::{PAYMENTS_APPLIED_TOTAL, PAYMENTS_REJECTED_TOTAL};

#[derive(Debug, Clone, Serialize)]
pub struct RecordInvoicePaymentResponse {
  pub invoice_id: Uuid,
  pub payment_state: PaymentState,
  pub status: InvoiceStatus,
  pub advance_paid: Money,
  pub remaining: Money,
  pub message: String,
}

pub struct RecordInvoicePaymentUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl RecordInvoicePaymentUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    invoice_id: Uuid,
    amount: Decimal,
  ) -> Result<RecordInvoicePaymentResponse, InvoiceError> {
    let (invoice, state) = match self
      .invoice_service
      .record_payment(requester, invoice_id, amount)
      .await
    {
      Ok(result) => result,
      Err(e) => {
        if matches!(e, InvoiceError::Payment(_) | InvoiceError::CannotPayCancelled) {
          PAYMENTS_REJECTED_TOTAL.with_label_values(&["invoice"]).inc();
        }
        return Err(e);
      }
    };

    PAYMENTS_APPLIED_TOTAL.with_label_values(&["invoice"]).inc();

    let message = if state == PaymentState::Paid {
      "Invoice fully paid".to_string()
    } else {
      format!("Payment recorded. Remaining {}", invoice.remaining)
    };

    Ok(RecordInvoicePaymentResponse {
      invoice_id: invoice.id,
      payment_state: state,
      status: invoice.status,
      advance_paid: invoice.advance_paid,
      remaining: invoice.remaining,
      message,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::invoice::test_support::{customer, invoice_service, row, user};
  use crate::application::invoice::{CreateInvoiceCommand, CreateInvoiceUseCase};
  use crate::domain::ledger::PaymentError;
  use rust_decimal_macros::dec;

  #[tokio::test]
  async fn test_payments_settle_invoice() {
    let service = invoice_service();
    let requester = user();
    let created = CreateInvoiceUseCase::new(service.clone())
      .execute(
        requester,
        CreateInvoiceCommand {
          customer: customer("Asha", None),
          items: vec![row("Filing", "1", "1000")],
          advance_paid: dec!(200),
        },
      )
      .await
      .unwrap();
    let use_case = RecordInvoicePaymentUseCase::new(service);
    let id = created.invoice.id;

    let partial = use_case.execute(requester, id, dec!(300)).await.unwrap();
    assert_eq!(partial.payment_state, PaymentState::Partial);
    assert_eq!(partial.remaining.amount(), dec!(500));
    assert_eq!(partial.status, InvoiceStatus::Sent);

    let err = use_case.execute(requester, id, dec!(500.01)).await.unwrap_err();
    assert!(matches!(
      err,
      InvoiceError::Payment(PaymentError::ExceedsRemaining { .. })
    ));

    let err = use_case.execute(requester, id, dec!(-5)).await.unwrap_err();
    assert!(matches!(
      err,
      InvoiceError::Payment(PaymentError::NegativePayment)
    ));

    let paid = use_case.execute(requester, id, dec!(500)).await.unwrap();
    assert_eq!(paid.payment_state, PaymentState::Paid);
    assert_eq!(paid.status, InvoiceStatus::Paid);
    assert!(paid.remaining.is_zero());
    assert_eq!(paid.message, "Invoice fully paid");
  }
}
