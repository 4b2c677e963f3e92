use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::work::{SessionChanges, WorkError, WorkService, WorkSession, WorkStatus};

use super::SessionInput;

pub struct UpdateSessionUseCase {
  work_service: Arc<WorkService>,
}

impl UpdateSessionUseCase {
  pub fn new(work_service: Arc<WorkService>) -> Self {
    Self { work_service }
  }

  /// A missing status keeps the session pending
  pub async fn execute(
    &self,
    requester: Requester,
    session_id: Uuid,
    input: SessionInput,
  ) -> Result<WorkSession, WorkError> {
    let changes = SessionChanges {
      details: input.details(),
      hourly_rate: input.hourly_rate,
      advance_paid: input.advance_paid,
      work_status: input.status()?.unwrap_or(WorkStatus::Pending),
    };

    self
      .work_service
      .update_session(requester, session_id, changes)
      .await
  }
}
