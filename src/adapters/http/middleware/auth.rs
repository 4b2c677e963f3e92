use actix_web::{
  Error, HttpMessage, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header::HeaderMap,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  application::auth::AuthenticateUseCase,
};

/// Authentication middleware that validates bearer session tokens
///
/// This middleware:
/// 1. Extracts the session token from the Authorization header
/// 2. Resolves it to a `Requester` using AuthenticateUseCase
/// 3. Attaches the `Requester` to request extensions for downstream handlers
/// 4. Answers with the mapped error (401 or 403) when the token is rejected
pub struct AuthMiddleware {
  authenticate: Arc<AuthenticateUseCase>,
}

impl AuthMiddleware {
  pub fn new(authenticate: Arc<AuthenticateUseCase>) -> Self {
    Self { authenticate }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      authenticate: self.authenticate.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  authenticate: Arc<AuthenticateUseCase>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let authenticate = self.authenticate.clone();

    Box::pin(async move {
      let requester = match extract_session_token(&req) {
        Ok(token) => authenticate.execute(&token).await.map_err(ApiError::from),
        Err(e) => Err(e),
      };

      let requester = match requester {
        Ok(requester) => requester,
        Err(e) => {
          tracing::debug!(path = %req.path(), error = %e, "Rejected unauthenticated request");
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(requester);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract session token from Authorization header
pub fn extract_session_token(req: &ServiceRequest) -> Result<String, ApiError> {
  bearer_token(req.headers())
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
  headers
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_extract_session_token_valid() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_srv_request();

    let token = extract_session_token(&req).unwrap();
    assert_eq!(token, "test_token_123");
  }

  #[test]
  fn test_extract_session_token_missing() {
    let req = TestRequest::default().to_srv_request();

    let result = extract_session_token(&req);
    assert!(result.is_err());
  }

  #[test]
  fn test_extract_session_token_invalid_format() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "InvalidFormat token"))
      .to_srv_request();

    let result = extract_session_token(&req);
    assert!(result.is_err());
  }

  #[actix_web::test]
  async fn test_middleware_attaches_requester() {
    use crate::application::auth::test_support::{auth_service, register};
    use crate::domain::auth::Requester;
    use actix_web::{App, HttpRequest, HttpResponse, test, web};

    let service = auth_service();
    let token = register(&service, "meera", "meera@example.com").await;
    let app = test::init_service(
      App::new()
        .wrap(AuthMiddleware::new(Arc::new(AuthenticateUseCase::new(
          service,
        ))))
        .route(
          "/whoami",
          web::get().to(|req: HttpRequest| async move {
            match req.extensions().get::<Requester>() {
              Some(requester) => HttpResponse::Ok().body(requester.user_id.to_string()),
              None => HttpResponse::InternalServerError().finish(),
            }
          }),
        ),
    )
    .await;

    let anonymous = TestRequest::get().uri("/whoami").to_request();
    let resp = test::call_service(&app, anonymous).await;
    assert_eq!(resp.status(), 401);

    let signed_in = TestRequest::get()
      .uri("/whoami")
      .insert_header(("Authorization", format!("Bearer {}", token)))
      .to_request();
    let resp = test::call_service(&app, signed_in).await;
    assert_eq!(resp.status(), 200);
  }
}
