//! Money primitives and the payment rule shared by invoices and work sessions.

pub mod payment;
pub mod value_objects;

pub use payment::{Payable, PaymentError, PaymentState, apply_payment};
pub use value_objects::{Money, Quantity, TaxRate, ValueObjectError};
