//! Process-local repositories backing the test suite and `IN_MEMORY_STORAGE`
//! runs. Every repository keeps its rows behind a tokio `RwLock`.

mod auth;
mod expense;
mod invoice;
mod notification;
mod work;

pub use auth::{InMemorySessionRepository, InMemoryUserRepository};
pub use expense::{InMemoryExpenseCategoryRepository, InMemoryExpenseRepository};
pub use invoice::{InMemoryCustomerRepository, InMemoryInvoiceRepository};
pub use notification::InMemoryNotificationPreferencesRepository;
pub use work::InMemoryWorkSessionRepository;
