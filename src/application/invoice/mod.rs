//! Invoice and customer use cases

mod change_invoice_status;
mod create_invoice;
mod delete_invoice;
mod duplicate_invoice;
mod get_invoice_details;
mod invoice_response;
mod list_customers;
mod list_invoices;
mod record_invoice_payment;
mod send_invoice;
mod update_invoice;

#[cfg(test)]
pub(crate) mod test_support;

pub use change_invoice_status::{ChangeInvoiceStatusResponse, ChangeInvoiceStatusUseCase};
pub use create_invoice::{CreateInvoiceCommand, CreateInvoiceUseCase};
pub use delete_invoice::DeleteInvoiceUseCase;
pub use duplicate_invoice::DuplicateInvoiceUseCase;
pub use get_invoice_details::GetInvoiceDetailsUseCase;
pub use invoice_response::InvoiceResponse;
pub use list_customers::ListCustomersUseCase;
pub use list_invoices::{InvoiceRange, ListInvoicesCommand, ListInvoicesUseCase};
pub use record_invoice_payment::{RecordInvoicePaymentResponse, RecordInvoicePaymentUseCase};
pub use send_invoice::{SendInvoiceCommand, SendInvoiceResponse, SendInvoiceUseCase};
pub use update_invoice::{UpdateInvoiceCommand, UpdateInvoiceUseCase};
