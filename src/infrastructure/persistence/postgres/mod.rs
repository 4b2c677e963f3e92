pub mod customer_repository;
pub mod expense_repository;
pub mod invoice_repository;
pub mod notification_repository;
pub mod session_repository;
pub mod user_repository;
pub mod work_session_repository;

#[cfg(test)]
pub(crate) mod test_support;

pub use customer_repository::PostgresCustomerRepository;
pub use expense_repository::{PostgresExpenseCategoryRepository, PostgresExpenseRepository};
pub use invoice_repository::PostgresInvoiceRepository;
pub use notification_repository::PostgresNotificationPreferencesRepository;
pub use session_repository::PostgresSessionRepository;
pub use user_repository::PostgresUserRepository;
pub use work_session_repository::PostgresWorkSessionRepository;
