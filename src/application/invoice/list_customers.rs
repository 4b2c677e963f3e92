use std::sync::Arc;

use crate::domain::auth::Requester;
use crate::domain::invoice::{Customer, InvoiceError, InvoiceService};

pub struct ListCustomersUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListCustomersUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, requester: Requester) -> Result<Vec<Customer>, InvoiceError> {
    self.invoice_service.list_customers(requester).await
  }
}
