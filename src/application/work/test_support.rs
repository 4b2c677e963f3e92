use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::work::WorkService;
use crate::infrastructure::persistence::memory::InMemoryWorkSessionRepository;

use super::SessionInput;

pub fn work_service() -> Arc<WorkService> {
  Arc::new(WorkService::new(Arc::new(
    InMemoryWorkSessionRepository::new(),
  )))
}

pub fn input(project: &str, hourly_rate: Decimal, advance_paid: Decimal) -> SessionInput {
  SessionInput {
    customer_name: "Meera".to_string(),
    customer_phone: "9800011111".to_string(),
    service_type: "passport_renewal".to_string(),
    project_name: project.to_string(),
    task_description: None,
    hourly_rate,
    advance_paid,
    work_status: None,
  }
}
