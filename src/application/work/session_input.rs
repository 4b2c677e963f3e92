use rust_decimal::Decimal;

use crate::domain::work::{SessionDetails, WorkError, WorkStatus};

/// Editable fields shared by the start and update commands
#[derive(Debug, Clone)]
pub struct SessionInput {
  pub customer_name: String,
  pub customer_phone: String,
  pub service_type: String,
  pub project_name: String,
  pub task_description: Option<String>,
  pub hourly_rate: Decimal,
  pub advance_paid: Decimal,
  pub work_status: Option<String>,
}

impl SessionInput {
  pub(super) fn details(&self) -> SessionDetails {
    SessionDetails {
      customer_name: self.customer_name.trim().to_string(),
      customer_phone: self.customer_phone.trim().to_string(),
      service_type: self.service_type.trim().to_string(),
      project_name: self.project_name.trim().to_string(),
      task_description: self.task_description.clone(),
    }
  }

  pub(super) fn status(&self) -> Result<Option<WorkStatus>, WorkError> {
    match self.work_status.as_deref().map(str::trim) {
      None | Some("") => Ok(None),
      Some(status) => Ok(Some(status.parse()?)),
    }
  }
}
