//! Prometheus counters for the billing ledger.

use lazy_static::lazy_static;
use prometheus::{
  Encoder, IntCounter, IntCounterVec, TextEncoder, register_int_counter, register_int_counter_vec,
};

lazy_static! {
  pub static ref INVOICES_CREATED_TOTAL: IntCounter = register_int_counter!(
    "billdesk_invoices_created_total",
    "Total number of invoices created"
  )
  .expect("Failed to register invoices_created_total");

  /// Payments applied, labelled by target (`invoice` or `work_session`)
  pub static ref PAYMENTS_APPLIED_TOTAL: IntCounterVec = register_int_counter_vec!(
    "billdesk_payments_applied_total",
    "Total number of payments applied",
    &["target"]
  )
  .expect("Failed to register payments_applied_total");

  pub static ref PAYMENTS_REJECTED_TOTAL: IntCounterVec = register_int_counter_vec!(
    "billdesk_payments_rejected_total",
    "Total number of payments rejected by the ledger",
    &["target"]
  )
  .expect("Failed to register payments_rejected_total");

  pub static ref TIMERS_STOPPED_TOTAL: IntCounter = register_int_counter!(
    "billdesk_timers_stopped_total",
    "Total number of work timers stopped"
  )
  .expect("Failed to register timers_stopped_total");
}

/// Forces registration so every series is exported from the first scrape.
pub fn init_metrics() {
  lazy_static::initialize(&INVOICES_CREATED_TOTAL);
  lazy_static::initialize(&PAYMENTS_APPLIED_TOTAL);
  lazy_static::initialize(&PAYMENTS_REJECTED_TOTAL);
  lazy_static::initialize(&TIMERS_STOPPED_TOTAL);
}

/// All registered metrics in the Prometheus text format
pub fn gather() -> String {
  let mut buffer = Vec::new();
  if let Err(e) = TextEncoder::new().encode(&prometheus::gather(), &mut buffer) {
    tracing::error!(error = %e, "Failed to encode metrics");
  }
  String::from_utf8(buffer).unwrap_or_default()
}
