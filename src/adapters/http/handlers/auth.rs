use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{LoginRequest, RegisterRequest, SuccessResponse},
  errors::ApiError,
  middleware::bearer_token,
};
use crate::application::auth::{
  GetCurrentUserUseCase, LoginUserCommand, LoginUserUseCase, LogoutUserUseCase,
  RegisterUserCommand, RegisterUserUseCase,
};

use super::requester;

/// Extract IP address from the request
fn extract_ip_address(req: &HttpRequest) -> Option<std::net::IpAddr> {
  let info = req.connection_info();
  let addr = info.realip_remote_addr()?;
  // "ip:port" for IPv4 peers, a bare address otherwise
  addr
    .parse()
    .ok()
    .or_else(|| addr.parse::<std::net::SocketAddr>().ok().map(|s| s.ip()))
}

/// Extract user agent from the request
fn extract_user_agent(req: &HttpRequest) -> Option<String> {
  req
    .headers()
    .get("User-Agent")
    .and_then(|h| h.to_str().ok())
    .map(|s| s.to_string())
}

/// POST /api/v1/auth/register
///
/// Creates a regular user and returns a session (201).
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = RegisterUserCommand {
    username: request.username,
    email: request.email,
    password: request.password,
    phone: request.phone,
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Created().json(response))
}

/// POST /api/v1/auth/login
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = LoginUserCommand {
    email: request.email,
    password: request.password,
    remember_me: request.remember_me,
  };

  let response = use_case
    .execute(
      command,
      extract_ip_address(&http_req),
      extract_user_agent(&http_req),
    )
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/v1/auth/logout
pub async fn logout_handler(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = bearer_token(http_req.headers())?;
  use_case.execute(session_token).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Successfully logged out".to_string(),
  }))
}

/// GET /api/v1/auth/me
pub async fn get_current_user_handler(
  use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute(requester(&http_req)?).await?;
  Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_extract_ip_address() {
    let req = TestRequest::default()
      .peer_addr("10.1.2.3:54321".parse().unwrap())
      .to_http_request();

    assert_eq!(
      extract_ip_address(&req),
      Some("10.1.2.3".parse().unwrap())
    );
  }

  #[test]
  fn test_extract_user_agent() {
    let req = TestRequest::default()
      .insert_header(("User-Agent", "curl/8.0"))
      .to_http_request();

    assert_eq!(extract_user_agent(&req).as_deref(), Some("curl/8.0"));
  }
}
