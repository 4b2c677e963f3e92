use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::sync::Arc;

use crate::domain::auth::Requester;
use crate::domain::invoice::{InvoiceError, InvoiceFilter, InvoiceService, InvoiceStatus};
use crate::domain::pagination::{Page, PageRequest};

use super::InvoiceResponse;

/// Named date ranges offered next to the free-form filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceRange {
  Today,
  LastWeek,
}

#[derive(Debug, Clone, Default)]
pub struct ListInvoicesCommand {
  pub status: Option<String>,
  pub search: Option<String>,
  /// Inclusive creation date bounds
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
  /// Overrides the date bounds when set
  pub range: Option<InvoiceRange>,
  pub page: PageRequest,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    command: ListInvoicesCommand,
  ) -> Result<Page<InvoiceResponse>, InvoiceError> {
    let status = match command.status.as_deref().map(str::trim) {
      None | Some("") | Some("all") => None,
      Some(status) => Some(status.parse::<InvoiceStatus>()?),
    };

    let now = Utc::now();
    let filter = match command.range {
      Some(InvoiceRange::Today) => InvoiceFilter::today(now),
      Some(InvoiceRange::LastWeek) => InvoiceFilter::last_week(now),
      None => InvoiceFilter {
        created_from: command.start_date.map(start_of_day),
        created_to: command.end_date.map(end_of_day),
        ..InvoiceFilter::default()
      },
    };

    let page = self
      .invoice_service
      .list_invoices(
        requester,
        InvoiceFilter {
          status,
          search: command.search,
          ..filter
        },
        command.page,
      )
      .await?;

    Ok(page.map(InvoiceResponse::from))
  }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
  date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
  start_of_day(date) + Duration::days(1) - Duration::microseconds(1)
}
