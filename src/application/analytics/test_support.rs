use std::sync::Arc;

use crate::domain::analytics::AnalyticsService;
use crate::domain::expense::ExpenseService;
use crate::domain::work::WorkService;
use crate::infrastructure::persistence::memory::{
  InMemoryCustomerRepository, InMemoryExpenseCategoryRepository, InMemoryExpenseRepository,
  InMemoryInvoiceRepository, InMemoryUserRepository, InMemoryWorkSessionRepository,
};

/// Services sharing one set of in-memory repositories
pub struct Fixture {
  pub analytics: Arc<AnalyticsService>,
  pub expenses: ExpenseService,
  pub work: WorkService,
}

impl Fixture {
  pub fn new() -> Self {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let invoices = Arc::new(InMemoryInvoiceRepository::new(customers.clone()));
    let expenses = Arc::new(InMemoryExpenseRepository::new());
    let sessions = Arc::new(InMemoryWorkSessionRepository::new());

    Self {
      analytics: Arc::new(AnalyticsService::new(
        invoices,
        customers,
        expenses.clone(),
        sessions.clone(),
        Arc::new(InMemoryUserRepository::new()),
      )),
      expenses: ExpenseService::new(
        expenses,
        Arc::new(InMemoryExpenseCategoryRepository::with_defaults()),
      ),
      work: WorkService::new(sessions),
    }
  }
}
