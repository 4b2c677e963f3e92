use std::sync::Arc;

use crate::domain::auth::Requester;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::work::{WorkError, WorkService, WorkSession, WorkStatus};

#[derive(Debug, Clone, Default)]
pub struct ListSessionsCommand {
  pub work_status: Option<String>,
  /// Exact project name
  pub project: Option<String>,
  pub page: PageRequest,
}

pub struct ListSessionsUseCase {
  work_service: Arc<WorkService>,
}

impl ListSessionsUseCase {
  pub fn new(work_service: Arc<WorkService>) -> Self {
    Self { work_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    command: ListSessionsCommand,
  ) -> Result<Page<WorkSession>, WorkError> {
    let work_status = match command.work_status.as_deref().map(str::trim) {
      None | Some("") | Some("all") => None,
      Some(status) => Some(status.parse::<WorkStatus>()?),
    };
    let project = command.project.filter(|p| !p.trim().is_empty());

    self
      .work_service
      .list_sessions(requester, work_status, project, command.page)
      .await
  }
}

pub struct ListProjectsUseCase {
  work_service: Arc<WorkService>,
}

impl ListProjectsUseCase {
  pub fn new(work_service: Arc<WorkService>) -> Self {
    Self { work_service }
  }

  pub async fn execute(&self, requester: Requester) -> Result<Vec<String>, WorkError> {
    self.work_service.list_projects(requester).await
  }
}
