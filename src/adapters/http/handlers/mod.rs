pub mod auth;
pub mod dashboard;
pub mod expenses;
pub mod invoices;
pub mod system;
pub mod users;
pub mod work;

use crate::{
  adapters::http::{
    errors::{ApiError, AuthErrorKind},
    middleware::RequestIdExt,
  },
  domain::auth::Requester,
};
use actix_web::{HttpMessage, HttpRequest};

/// Identity attached by `AuthMiddleware`
pub fn requester(req: &HttpRequest) -> Result<Requester, ApiError> {
  let requester = req.extensions().get::<Requester>().copied();

  if requester.is_none() {
    tracing::warn!(
      request_id = ?req.request_id(),
      "requester: no Requester in request extensions for path {}",
      req.path()
    );
  }

  requester.ok_or(ApiError::Auth(AuthErrorKind::InvalidSession))
}
