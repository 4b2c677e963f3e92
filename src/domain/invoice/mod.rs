pub mod entities;
pub mod errors;
pub mod line_items;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Customer, Invoice};
pub use errors::{DispatchError, InvoiceError};
pub use line_items::{LineItem, LineItemCandidate, parse_line_items};
pub use ports::{
  CustomerRepository, DocumentRenderer, EmailSender, InvoiceQuery, InvoiceRepository,
  RenderedDocument, WhatsAppSender,
};
pub use services::{
  CustomerDetails, DispatchChannels, DispatchOutcome, InvoiceChanges, InvoiceDetails,
  InvoiceFilter, InvoiceService, NewInvoice,
};
pub use value_objects::{CustomerName, InvoiceNumber, InvoiceStatus, LineItemDescription};
