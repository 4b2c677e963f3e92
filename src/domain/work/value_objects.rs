use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use crate::domain::ledger::ValueObjectError;

/// Progress of a work session, independent of its payment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
  Pending,
  InProgress,
  Completed,
  Delivered,
}

impl WorkStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      WorkStatus::Pending => "pending",
      WorkStatus::InProgress => "in_progress",
      WorkStatus::Completed => "completed",
      WorkStatus::Delivered => "delivered",
    }
  }

  /// Finished states close the timer.
  pub fn is_finished(&self) -> bool {
    matches!(self, WorkStatus::Completed | WorkStatus::Delivered)
  }

  pub fn label(&self) -> &'static str {
    match self {
      WorkStatus::Pending => "Pending",
      WorkStatus::InProgress => "In Progress",
      WorkStatus::Completed => "Completed",
      WorkStatus::Delivered => "Delivered",
    }
  }
}

impl FromStr for WorkStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "pending" => Ok(WorkStatus::Pending),
      "in_progress" => Ok(WorkStatus::InProgress),
      "completed" => Ok(WorkStatus::Completed),
      "delivered" => Ok(WorkStatus::Delivered),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Invalid work status: {}",
        s
      ))),
    }
  }
}

impl fmt::Display for WorkStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// "passport_renewal" becomes "Passport Renewal".
pub fn service_label(service_type: &str) -> String {
  service_type
    .replace('_', " ")
    .split(' ')
    .map(|word| {
      let mut chars = word.chars();
      match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
      }
    })
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_work_status_round_trip_strings() {
    for status in [
      WorkStatus::Pending,
      WorkStatus::InProgress,
      WorkStatus::Completed,
      WorkStatus::Delivered,
    ] {
      assert_eq!(status.as_str().parse::<WorkStatus>().unwrap(), status);
    }
    assert!("stopped".parse::<WorkStatus>().is_err());
  }

  #[test]
  fn test_service_label() {
    assert_eq!(service_label("passport"), "Passport");
    assert_eq!(service_label("pan_card_update"), "Pan Card Update");
    assert_eq!(service_label("GST_filing"), "Gst Filing");
  }
}
