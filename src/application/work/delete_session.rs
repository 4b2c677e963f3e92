use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::work::{WorkError, WorkService};

pub struct DeleteSessionUseCase {
  work_service: Arc<WorkService>,
}

impl DeleteSessionUseCase {
  pub fn new(work_service: Arc<WorkService>) -> Self {
    Self { work_service }
  }

  pub async fn execute(&self, requester: Requester, session_id: Uuid) -> Result<(), WorkError> {
    self.work_service.delete_session(requester, session_id).await
  }
}
