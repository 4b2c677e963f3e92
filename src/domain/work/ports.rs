use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::auth::OwnerScope;
use crate::domain::pagination::{Page, PageRequest};

use super::entities::WorkSession;
use super::errors::WorkError;
use super::value_objects::WorkStatus;

#[derive(Debug, Clone, Default)]
pub struct WorkQuery {
  pub owner_id: Uuid,
  pub work_status: Option<WorkStatus>,
  /// Exact project name
  pub project: Option<String>,
  pub page: PageRequest,
}

/// Completed sessions for a report. Bounds apply to the start time.
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
  pub owner_id: Uuid,
  pub started_from: Option<DateTime<Utc>>,
  pub started_to: Option<DateTime<Utc>>,
  /// Substring of the project name
  pub project: Option<String>,
}

#[async_trait]
pub trait WorkSessionRepository: Send + Sync {
  async fn save(&self, session: &WorkSession) -> Result<(), WorkError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkSession>, WorkError>;

  /// Newest start time first
  async fn list(&self, query: &WorkQuery) -> Result<Page<WorkSession>, WorkError>;

  /// Distinct project names, sorted
  async fn find_projects(&self, owner_id: Uuid) -> Result<Vec<String>, WorkError>;

  /// The earliest started session whose timer is still running
  async fn find_running(&self, owner_id: Uuid) -> Result<Option<WorkSession>, WorkError>;

  async fn find_completed(&self, query: &ReportQuery) -> Result<Vec<WorkSession>, WorkError>;

  /// Every session visible in `scope`, optionally bounded by start time
  async fn find_in_scope(
    &self,
    scope: OwnerScope,
    started_from: Option<DateTime<Utc>>,
    started_to: Option<DateTime<Utc>>,
  ) -> Result<Vec<WorkSession>, WorkError>;

  async fn delete(&self, id: Uuid) -> Result<(), WorkError>;
}
