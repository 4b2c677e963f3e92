use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::analytics::AnalyticsError;
use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::auth::value_objects::ValueObjectError;
use crate::domain::expense::ExpenseError;
use crate::domain::invoice::InvoiceError;
use crate::domain::notification::NotificationError;
use crate::domain::work::WorkError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Malformed or out-of-range input (400 Bad Request)
  Validation(String),

  /// Operation not permitted in the current state (409 Conflict)
  Conflict(String),

  /// Missing, or owned by someone else (404 Not Found)
  NotFound(String),

  /// Authentication error (401 Unauthorized or 403 Forbidden)
  Auth(AuthErrorKind),

  /// A delivery channel failed (502 Bad Gateway)
  Dispatch(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug, Serialize)]
pub enum AuthErrorKind {
  /// Invalid credentials (401)
  InvalidCredentials,

  /// Session expired or invalid (401)
  InvalidSession,

  /// Invalid token format (401)
  InvalidToken,

  /// Deactivated account (403)
  AccountDisabled,

  /// Admin-only operation (403)
  AdminRequired,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::Dispatch(msg) => write!(f, "Dispatch error: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::InvalidSession => StatusCode::UNAUTHORIZED,
        AuthErrorKind::InvalidToken => StatusCode::UNAUTHORIZED,
        AuthErrorKind::AccountDisabled => StatusCode::FORBIDDEN,
        AuthErrorKind::AdminRequired => StatusCode::FORBIDDEN,
      },
      ApiError::Dispatch(_) => StatusCode::BAD_GATEWAY,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Conflict(msg) => ("conflict", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => (
          "invalid_credentials",
          "Invalid email or password".to_string(),
        ),
        AuthErrorKind::InvalidSession => {
          ("invalid_session", "Invalid or expired session".to_string())
        }
        AuthErrorKind::InvalidToken => (
          "invalid_token",
          "Invalid or missing authorization token".to_string(),
        ),
        AuthErrorKind::AccountDisabled => (
          "account_disabled",
          "This account has been deactivated".to_string(),
        ),
        AuthErrorKind::AdminRequired => (
          "admin_required",
          "Administrator access required".to_string(),
        ),
      },
      ApiError::Dispatch(msg) => {
        tracing::warn!("Dispatch failed: {}", msg);
        ("dispatch_failed", msg.clone())
      }
      ApiError::Internal(msg) => {
        // Don't expose internal error details
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::InvalidSession => ApiError::Auth(AuthErrorKind::InvalidSession),
      AuthError::AccountDisabled => ApiError::Auth(AuthErrorKind::AccountDisabled),
      AuthError::AdminRequired => ApiError::Auth(AuthErrorKind::AdminRequired),
      AuthError::EmailAlreadyExists | AuthError::UsernameAlreadyExists => {
        ApiError::Conflict(error.to_string())
      }
      AuthError::UserNotFound => ApiError::NotFound(error.to_string()),
      AuthError::CannotToggleSelf | AuthError::CurrentPasswordMismatch => {
        ApiError::Validation(error.to_string())
      }
      AuthError::ValueObject(ValueObjectError::InvalidToken) => {
        ApiError::Auth(AuthErrorKind::InvalidToken)
      }
      AuthError::ValueObject(err) => ApiError::Validation(err.to_string()),
      AuthError::Repository(err) => match err {
        RepositoryError::NotFound => ApiError::NotFound("User not found".to_string()),
        RepositoryError::DuplicateKey(_) => {
          ApiError::Conflict("Username or email already exists".to_string())
        }
        _ => ApiError::Internal(err.to_string()),
      },
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
    }
  }
}

impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::Validation(_) | InvoiceError::Payment(_) | InvoiceError::NoDispatchChannel => {
        ApiError::Validation(error.to_string())
      }
      InvoiceError::InvoiceNotFound(_) | InvoiceError::CustomerNotFound(_) => {
        ApiError::NotFound(error.to_string())
      }
      InvoiceError::InvalidStatusTransition { .. }
      | InvoiceError::CannotEditPaid
      | InvoiceError::CannotDeletePaid
      | InvoiceError::CannotPayCancelled => ApiError::Conflict(error.to_string()),
      InvoiceError::DispatchFailed(_) => ApiError::Dispatch(error.to_string()),
      InvoiceError::Repository(_) | InvoiceError::Database(_) => {
        ApiError::Internal(error.to_string())
      }
    }
  }
}

impl From<WorkError> for ApiError {
  fn from(error: WorkError) -> Self {
    match error {
      WorkError::Validation(_) | WorkError::Payment(_) => ApiError::Validation(error.to_string()),
      WorkError::SessionNotFound(_) => ApiError::NotFound(error.to_string()),
      WorkError::TimerNotRunning => ApiError::Conflict(error.to_string()),
      WorkError::Repository(_) | WorkError::Database(_) => ApiError::Internal(error.to_string()),
    }
  }
}

impl From<ExpenseError> for ApiError {
  fn from(error: ExpenseError) -> Self {
    match error {
      ExpenseError::Validation(_) => ApiError::Validation(error.to_string()),
      ExpenseError::ExpenseNotFound(_) => ApiError::NotFound(error.to_string()),
      ExpenseError::AdminRequired => ApiError::Auth(AuthErrorKind::AdminRequired),
      ExpenseError::Repository(_) | ExpenseError::Database(_) => {
        ApiError::Internal(error.to_string())
      }
    }
  }
}

impl From<NotificationError> for ApiError {
  fn from(error: NotificationError) -> Self {
    match error {
      NotificationError::Validation(_) => ApiError::Validation(error.to_string()),
      NotificationError::Repository(_) | NotificationError::Database(_) => {
        ApiError::Internal(error.to_string())
      }
    }
  }
}

impl From<AnalyticsError> for ApiError {
  fn from(error: AnalyticsError) -> Self {
    match error {
      AnalyticsError::InvalidChart(_)
      | AnalyticsError::InvalidPeriod(_)
      | AnalyticsError::InvalidRange => ApiError::Validation(error.to_string()),
      AnalyticsError::Invoice(e) => e.into(),
      AnalyticsError::Expense(e) => e.into(),
      AnalyticsError::Work(e) => e.into(),
      AnalyticsError::Auth(e) => e.into(),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ledger::PaymentError;
  use crate::domain::invoice::InvoiceStatus;
  use uuid::Uuid;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::InvalidCredentials).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::AdminRequired).status_code(),
      StatusCode::FORBIDDEN
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_auth_error_conversion() {
    let api_error: ApiError = AuthError::InvalidCredentials.into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);

    let api_error: ApiError = AuthError::EmailAlreadyExists.into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);

    let api_error: ApiError = AuthError::ValueObject(ValueObjectError::InvalidToken).into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);
  }

  #[test]
  fn test_ledger_errors_follow_taxonomy() {
    let overpay: ApiError = InvoiceError::Payment(PaymentError::NegativePayment).into();
    assert_eq!(overpay.status_code(), StatusCode::BAD_REQUEST);

    let paid: ApiError = InvoiceError::CannotDeletePaid.into();
    assert_eq!(paid.status_code(), StatusCode::CONFLICT);

    let terminal: ApiError = InvoiceError::InvalidStatusTransition {
      from: InvoiceStatus::Paid,
      to: InvoiceStatus::Draft,
    }
    .into();
    assert_eq!(terminal.status_code(), StatusCode::CONFLICT);

    let missing: ApiError = WorkError::SessionNotFound(Uuid::new_v4()).into();
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let stopped: ApiError = WorkError::TimerNotRunning.into();
    assert_eq!(stopped.status_code(), StatusCode::CONFLICT);
  }
}
