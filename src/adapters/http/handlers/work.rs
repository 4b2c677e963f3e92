use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{PaymentRequest, SessionListQuery, SessionRequest, StatusRequest, WorkReportQuery},
  errors::ApiError,
};
use crate::application::work::{
  DeleteSessionUseCase, GetActiveTimerUseCase, GetPaymentInfoUseCase, GetSessionUseCase,
  ListProjectsUseCase, ListSessionsCommand, ListSessionsUseCase, RecordSessionPaymentUseCase,
  SessionInput, SetWorkStatusUseCase, StartSessionUseCase, StopTimerUseCase,
  UpdateSessionUseCase, WorkReportCommand, WorkReportUseCase,
};
use crate::domain::pagination::PageRequest;
use crate::infrastructure::config::BillingConfig;

use super::requester;

impl From<SessionRequest> for SessionInput {
  fn from(request: SessionRequest) -> Self {
    SessionInput {
      customer_name: request.customer_name,
      customer_phone: request.customer_phone,
      service_type: request.service_type,
      project_name: request.project_name,
      task_description: request.task_description,
      hourly_rate: request.hourly_rate,
      advance_paid: request.advance_paid,
      work_status: request.work_status,
    }
  }
}

/// POST /api/v1/work
///
/// Starts a session; the timer runs unless a status other than
/// `in_progress` is given.
pub async fn start_session_handler(
  http_req: HttpRequest,
  request: web::Json<SessionRequest>,
  use_case: web::Data<Arc<StartSessionUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let session = use_case
    .execute(requester(&http_req)?, request.into_inner().into())
    .await?;
  Ok(HttpResponse::Created().json(session))
}

/// GET /api/v1/work
pub async fn list_sessions_handler(
  http_req: HttpRequest,
  query: web::Query<SessionListQuery>,
  use_case: web::Data<Arc<ListSessionsUseCase>>,
  billing: web::Data<BillingConfig>,
) -> Result<HttpResponse, ApiError> {
  let query = query.into_inner();
  let command = ListSessionsCommand {
    work_status: query.status,
    project: query.project,
    page: PageRequest::new(query.page, query.per_page, billing.work_per_page),
  };

  let page = use_case.execute(requester(&http_req)?, command).await?;
  Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/work/projects
pub async fn list_projects_handler(
  http_req: HttpRequest,
  use_case: web::Data<Arc<ListProjectsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let projects = use_case.execute(requester(&http_req)?).await?;
  Ok(HttpResponse::Ok().json(projects))
}

/// GET /api/v1/work/timer
///
/// The running session, or `null`.
pub async fn active_timer_handler(
  http_req: HttpRequest,
  use_case: web::Data<Arc<GetActiveTimerUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let session = use_case.execute(requester(&http_req)?).await?;
  Ok(HttpResponse::Ok().json(session))
}

/// GET /api/v1/work/reports
pub async fn work_report_handler(
  http_req: HttpRequest,
  query: web::Query<WorkReportQuery>,
  use_case: web::Data<Arc<WorkReportUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let query = query.into_inner();
  let command = WorkReportCommand {
    start_date: query.start_date,
    end_date: query.end_date,
    project: query.project,
  };

  let report = use_case.execute(requester(&http_req)?, command).await?;
  Ok(HttpResponse::Ok().json(report))
}

/// GET /api/v1/work/{id}
pub async fn get_session_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetSessionUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let session = use_case
    .execute(requester(&http_req)?, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(session))
}

/// PUT /api/v1/work/{id}
pub async fn update_session_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  request: web::Json<SessionRequest>,
  use_case: web::Data<Arc<UpdateSessionUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let session = use_case
    .execute(
      requester(&http_req)?,
      path.into_inner(),
      request.into_inner().into(),
    )
    .await?;
  Ok(HttpResponse::Ok().json(session))
}

/// POST /api/v1/work/{id}/stop
pub async fn stop_timer_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<StopTimerUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let session = use_case
    .execute(requester(&http_req)?, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(session))
}

/// POST /api/v1/work/{id}/status
pub async fn set_work_status_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  request: web::Json<StatusRequest>,
  use_case: web::Data<Arc<SetWorkStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let session = use_case
    .execute(requester(&http_req)?, path.into_inner(), &request.status)
    .await?;
  Ok(HttpResponse::Ok().json(session))
}

/// POST /api/v1/work/{id}/payment
pub async fn record_session_payment_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  request: web::Json<PaymentRequest>,
  use_case: web::Data<Arc<RecordSessionPaymentUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(requester(&http_req)?, path.into_inner(), request.amount)
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/work/{id}/payment
pub async fn payment_info_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetPaymentInfoUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let info = use_case
    .execute(requester(&http_req)?, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(info))
}

/// DELETE /api/v1/work/{id}
pub async fn delete_session_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteSessionUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(requester(&http_req)?, path.into_inner())
    .await?;
  Ok(HttpResponse::NoContent().finish())
}
