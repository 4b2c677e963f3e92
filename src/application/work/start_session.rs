use std::sync::Arc;

use crate::domain::auth::Requester;
use crate::domain::work::{NewSession, WorkError, WorkService, WorkSession};

use super::SessionInput;

/// Starts the timer for a new session
pub struct StartSessionUseCase {
  work_service: Arc<WorkService>,
}

impl StartSessionUseCase {
  pub fn new(work_service: Arc<WorkService>) -> Self {
    Self { work_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    input: SessionInput,
  ) -> Result<WorkSession, WorkError> {
    let data = NewSession {
      details: input.details(),
      hourly_rate: input.hourly_rate,
      advance_paid: input.advance_paid,
      work_status: input.status()?,
    };

    self.work_service.create_session(requester, data).await
  }
}
