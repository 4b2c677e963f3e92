use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::ledger::{Money, PaymentState};
use crate::domain::work::{WorkError, WorkService};
use crate::infrastructure::metrics::{PAYMENTS_APPLIED_TOTAL, PAYMENTS_REJECTED_TOTAL};

#[derive(Debug, Clone, Serialize)]
pub struct RecordSessionPaymentResponse {
  pub session_id: Uuid,
  pub payment_status: PaymentState,
  pub advance_paid: Money,
  pub remaining: Money,
  pub message: String,
}

pub struct RecordSessionPaymentUseCase {
  work_service: Arc<WorkService>,
}

impl RecordSessionPaymentUseCase {
  pub fn new(work_service: Arc<WorkService>) -> Self {
    Self { work_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    session_id: Uuid,
    amount: Decimal,
  ) -> Result<RecordSessionPaymentResponse, WorkError> {
    let session = match self
      .work_service
      .record_payment(requester, session_id, amount)
      .await
    {
      Ok(session) => session,
      Err(e) => {
        if matches!(e, WorkError::Payment(_)) {
          PAYMENTS_REJECTED_TOTAL
            .with_label_values(&["work_session"])
            .inc();
        }
        return Err(e);
      }
    };

    PAYMENTS_APPLIED_TOTAL
      .with_label_values(&["work_session"])
      .inc();

    Ok(RecordSessionPaymentResponse {
      session_id: session.id,
      payment_status: session.payment_status,
      advance_paid: session.advance_paid,
      remaining: session.remaining,
      message: format!("Payment of {} recorded", amount.round_dp(2)),
    })
  }
}
