use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::auth::OwnerScope;
use crate::domain::pagination::Page;
use crate::domain::work::{
  ReportQuery, WorkError, WorkQuery, WorkSession, WorkSessionRepository, WorkStatus,
};

#[derive(Default)]
pub struct InMemoryWorkSessionRepository {
  sessions: RwLock<HashMap<Uuid, WorkSession>>,
}

impl InMemoryWorkSessionRepository {
  pub fn new() -> Self {
    Self::default()
  }

  async fn collect<F>(&self, keep: F) -> Vec<WorkSession>
  where
    F: Fn(&WorkSession) -> bool,
  {
    let mut sessions: Vec<WorkSession> = self
      .sessions
      .read()
      .await
      .values()
      .filter(|s| keep(s))
      .cloned()
      .collect();
    sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    sessions
  }
}

fn started_within(
  session: &WorkSession,
  from: Option<DateTime<Utc>>,
  to: Option<DateTime<Utc>>,
) -> bool {
  from.is_none_or(|from| session.start_time >= from)
    && to.is_none_or(|to| session.start_time <= to)
}

#[async_trait]
impl WorkSessionRepository for InMemoryWorkSessionRepository {
  async fn save(&self, session: &WorkSession) -> Result<(), WorkError> {
    self
      .sessions
      .write()
      .await
      .insert(session.id, session.clone());
    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkSession>, WorkError> {
    Ok(self.sessions.read().await.get(&id).cloned())
  }

  async fn list(&self, query: &WorkQuery) -> Result<Page<WorkSession>, WorkError> {
    let matched = self
      .collect(|s| {
        s.owner_id == query.owner_id
          && query.work_status.is_none_or(|status| s.work_status == status)
          && query
            .project
            .as_ref()
            .is_none_or(|project| &s.project_name == project)
      })
      .await;
    Ok(Page::slice(matched, query.page))
  }

  async fn find_projects(&self, owner_id: Uuid) -> Result<Vec<String>, WorkError> {
    let sessions = self.sessions.read().await;
    let projects: BTreeSet<String> = sessions
      .values()
      .filter(|s| s.owner_id == owner_id && !s.project_name.is_empty())
      .map(|s| s.project_name.clone())
      .collect();
    Ok(projects.into_iter().collect())
  }

  async fn find_running(&self, owner_id: Uuid) -> Result<Option<WorkSession>, WorkError> {
    let running = self
      .collect(|s| s.owner_id == owner_id && s.is_running())
      .await;
    Ok(running.into_iter().last())
  }

  async fn find_completed(&self, query: &ReportQuery) -> Result<Vec<WorkSession>, WorkError> {
    let project = query.project.as_ref().map(|p| p.to_lowercase());
    Ok(
      self
        .collect(|s| {
          s.owner_id == query.owner_id
            && s.work_status == WorkStatus::Completed
            && started_within(s, query.started_from, query.started_to)
            && project
              .as_ref()
              .is_none_or(|p| s.project_name.to_lowercase().contains(p))
        })
        .await,
    )
  }

  async fn find_in_scope(
    &self,
    scope: OwnerScope,
    started_from: Option<DateTime<Utc>>,
    started_to: Option<DateTime<Utc>>,
  ) -> Result<Vec<WorkSession>, WorkError> {
    Ok(
      self
        .collect(|s| scope.includes(s.owner_id) && started_within(s, started_from, started_to))
        .await,
    )
  }

  async fn delete(&self, id: Uuid) -> Result<(), WorkError> {
    self
      .sessions
      .write()
      .await
      .remove(&id)
      .map(|_| ())
      .ok_or(WorkError::SessionNotFound(id))
  }
}
