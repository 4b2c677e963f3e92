use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::work::{WorkError, WorkService, WorkSession};
use crate::infrastructure::metrics::TIMERS_STOPPED_TOTAL;

pub struct StopTimerUseCase {
  work_service: Arc<WorkService>,
}

impl StopTimerUseCase {
  pub fn new(work_service: Arc<WorkService>) -> Self {
    Self { work_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    session_id: Uuid,
  ) -> Result<WorkSession, WorkError> {
    let session = self.work_service.stop_timer(requester, session_id).await?;
    TIMERS_STOPPED_TOTAL.inc();
    Ok(session)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::work::test_support::{input, work_service};
  use crate::application::work::{GetActiveTimerUseCase, StartSessionUseCase};
  use crate::domain::auth::Role;
  use crate::domain::work::WorkStatus;
  use rust_decimal_macros::dec;

  #[tokio::test]
  async fn test_stop_completes_session_and_clears_active_timer() {
    let service = work_service();
    let requester = Requester::new(Uuid::new_v4(), Role::User);
    let session = StartSessionUseCase::new(service.clone())
      .execute(requester, input("Passport", dec!(500), dec!(0)))
      .await
      .unwrap();
    let active = GetActiveTimerUseCase::new(service.clone());
    assert!(active.execute(requester).await.unwrap().is_some());

    let use_case = StopTimerUseCase::new(service);
    let stopped = use_case.execute(requester, session.id).await.unwrap();

    assert_eq!(stopped.work_status, WorkStatus::Completed);
    assert_eq!(stopped.duration_minutes, Some(0));
    assert_eq!(stopped.total.amount(), dec!(500));
    assert!(active.execute(requester).await.unwrap().is_none());

    let err = use_case.execute(requester, session.id).await.unwrap_err();
    assert!(matches!(err, WorkError::TimerNotRunning));
  }
}
