use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::work::{PaymentInfo, WorkError, WorkService, WorkSession};

pub struct GetSessionUseCase {
  work_service: Arc<WorkService>,
}

impl GetSessionUseCase {
  pub fn new(work_service: Arc<WorkService>) -> Self {
    Self { work_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    session_id: Uuid,
  ) -> Result<WorkSession, WorkError> {
    self.work_service.get_session(requester, session_id).await
  }
}

/// Total, paid and remaining amounts of one session
pub struct GetPaymentInfoUseCase {
  work_service: Arc<WorkService>,
}

impl GetPaymentInfoUseCase {
  pub fn new(work_service: Arc<WorkService>) -> Self {
    Self { work_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    session_id: Uuid,
  ) -> Result<PaymentInfo, WorkError> {
    self.work_service.payment_info(requester, session_id).await
  }
}

/// The requester's running timer, if any
pub struct GetActiveTimerUseCase {
  work_service: Arc<WorkService>,
}

impl GetActiveTimerUseCase {
  pub fn new(work_service: Arc<WorkService>) -> Self {
    Self { work_service }
  }

  pub async fn execute(&self, requester: Requester) -> Result<Option<WorkSession>, WorkError> {
    self.work_service.active_timer(requester).await
  }
}
