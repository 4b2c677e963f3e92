use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::auth::Requester;
use crate::domain::work::{ReportFilter, WorkError, WorkReport, WorkService};

#[derive(Debug, Clone, Default)]
pub struct WorkReportCommand {
  pub start_date: Option<NaiveDate>,
  /// Inclusive through the end of the day
  pub end_date: Option<NaiveDate>,
  /// Substring of the project name
  pub project: Option<String>,
}

/// Hours and amounts of completed sessions
pub struct WorkReportUseCase {
  work_service: Arc<WorkService>,
}

impl WorkReportUseCase {
  pub fn new(work_service: Arc<WorkService>) -> Self {
    Self { work_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    command: WorkReportCommand,
  ) -> Result<WorkReport, WorkError> {
    let filter = ReportFilter {
      start_date: command.start_date,
      end_date: command.end_date,
      project: command.project.filter(|p| !p.trim().is_empty()),
    };

    self.work_service.work_report(requester, filter).await
  }
}
