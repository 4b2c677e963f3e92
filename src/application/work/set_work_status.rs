use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::work::{WorkError, WorkService, WorkSession};

pub struct SetWorkStatusUseCase {
  work_service: Arc<WorkService>,
}

impl SetWorkStatusUseCase {
  pub fn new(work_service: Arc<WorkService>) -> Self {
    Self { work_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    session_id: Uuid,
    status: &str,
  ) -> Result<WorkSession, WorkError> {
    self
      .work_service
      .set_work_status(requester, session_id, status)
      .await
  }
}
