//! Bundled delivery adapters. Documents are JSON snapshots written to disk
//! and the senders only log what they would deliver.

mod json_renderer;
mod logging_senders;

pub use json_renderer::JsonDocumentRenderer;
pub use logging_senders::{LoggingEmailSender, LoggingWhatsAppSender};
