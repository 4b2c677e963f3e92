use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{CreateUserRequest, NotificationPreferencesRequest, UpdateProfileRequest},
  errors::ApiError,
};
use crate::application::auth::{
  CreateUserCommand, CreateUserUseCase, ListUsersUseCase, ToggleUserActiveUseCase,
  UpdateProfileCommand, UpdateProfileUseCase,
};
use crate::application::notification::{
  GetNotificationPreferencesUseCase, UpdateNotificationPreferencesCommand,
  UpdateNotificationPreferencesUseCase,
};

use super::requester;

/// PUT /api/v1/users/me
pub async fn update_profile_handler(
  http_req: HttpRequest,
  request: web::Json<UpdateProfileRequest>,
  use_case: web::Data<Arc<UpdateProfileUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = UpdateProfileCommand {
    username: request.username,
    email: request.email,
    phone: request.phone,
    current_password: request.current_password,
    new_password: request.new_password,
  };

  let user = use_case.execute(requester(&http_req)?, command).await?;
  Ok(HttpResponse::Ok().json(user))
}

/// GET /api/v1/users (admin)
pub async fn list_users_handler(
  http_req: HttpRequest,
  use_case: web::Data<Arc<ListUsersUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let users = use_case.execute(requester(&http_req)?).await?;
  Ok(HttpResponse::Ok().json(users))
}

/// POST /api/v1/users (admin)
pub async fn create_user_handler(
  http_req: HttpRequest,
  request: web::Json<CreateUserRequest>,
  use_case: web::Data<Arc<CreateUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = CreateUserCommand {
    username: request.username,
    email: request.email,
    password: request.password,
    role: request.role,
    phone: request.phone,
  };

  let user = use_case.execute(requester(&http_req)?, command).await?;
  Ok(HttpResponse::Created().json(user))
}

/// POST /api/v1/users/{id}/toggle (admin)
pub async fn toggle_user_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ToggleUserActiveUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = use_case
    .execute(requester(&http_req)?, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(user))
}

/// GET /api/v1/users/me/notifications
pub async fn get_notifications_handler(
  http_req: HttpRequest,
  use_case: web::Data<Arc<GetNotificationPreferencesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let preferences = use_case.execute(requester(&http_req)?).await?;
  Ok(HttpResponse::Ok().json(preferences))
}

/// PUT /api/v1/users/me/notifications
pub async fn update_notifications_handler(
  http_req: HttpRequest,
  request: web::Json<NotificationPreferencesRequest>,
  use_case: web::Data<Arc<UpdateNotificationPreferencesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let (quiet_hours_start, quiet_hours_end, report_time) = request.times()?;
  let request = request.into_inner();

  let command = UpdateNotificationPreferencesCommand {
    email: request.email,
    whatsapp: request.whatsapp,
    quiet_hours_start,
    quiet_hours_end,
    weekly_report_day: request.weekly_report_day,
    report_time,
  };

  let preferences = use_case.execute(requester(&http_req)?, command).await?;
  Ok(HttpResponse::Ok().json(preferences))
}
