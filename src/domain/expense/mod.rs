pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{DEFAULT_CATEGORIES, Expense, ExpenseCategory, ExpenseDetails};
pub use errors::ExpenseError;
pub use ports::{ExpenseCategoryRepository, ExpenseFilter, ExpenseRepository};
pub use services::{CategoryStats, ExpenseInput, ExpenseListing, ExpenseReport, ExpenseService};
