use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::invoice::{InvoiceError, InvoiceService};

use super::InvoiceResponse;

pub struct GetInvoiceDetailsUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceDetailsUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Invoices owned by someone else are reported as not found
  pub async fn execute(
    &self,
    requester: Requester,
    invoice_id: Uuid,
  ) -> Result<InvoiceResponse, InvoiceError> {
    let details = self
      .invoice_service
      .get_invoice(requester, invoice_id)
      .await?;
    Ok(details.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::invoice::test_support::{customer, invoice_service, row, user};
  use crate::application::invoice::{CreateInvoiceCommand, CreateInvoiceUseCase};
  use crate::domain::auth::Role;
  use rust_decimal::Decimal;

  #[tokio::test]
  async fn test_other_owners_cannot_read_invoice() {
    let service = invoice_service();
    let owner = user();
    let created = CreateInvoiceUseCase::new(service.clone())
      .execute(
        owner,
        CreateInvoiceCommand {
          customer: customer("Asha", None),
          items: vec![row("Filing", "1", "250")],
          advance_paid: Decimal::ZERO,
        },
      )
      .await
      .unwrap();
    let use_case = GetInvoiceDetailsUseCase::new(service);

    let found = use_case.execute(owner, created.invoice.id).await.unwrap();
    assert_eq!(found.customer.unwrap().name.value(), "Asha");

    let admin = Requester::new(uuid::Uuid::new_v4(), Role::Admin);
    let err = use_case.execute(admin, created.invoice.id).await.unwrap_err();
    assert!(matches!(err, InvoiceError::InvoiceNotFound(_)));
  }
}
