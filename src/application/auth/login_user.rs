use chrono::{DateTime, Utc};
use serde::Serialize;
use std::net::IpAddr;
use std::sync::Arc;

use crate::domain::auth::{AuthError, AuthService, Email, Password};

use super::UserResponse;

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
  /// Whether to create a long-lived session
  pub remember_me: bool,
}

/// Response after successful user login
#[derive(Debug, Clone, Serialize)]
pub struct LoginUserResponse {
  pub user: UserResponse,
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user login use case
  ///
  /// # Arguments
  /// * `command` - The login command containing credentials
  /// * `ip_address` - Optional IP address of the client
  /// * `user_agent` - Optional user agent string from the client
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for an unknown email or wrong
  /// password and `AuthError::AccountDisabled` for deactivated accounts
  pub async fn execute(
    &self,
    command: LoginUserCommand,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
  ) -> Result<LoginUserResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let (user, session, session_token) = self
      .auth_service
      .login(email, password, ip_address, user_agent, command.remember_me)
      .await?;

    Ok(LoginUserResponse {
      user: user.into(),
      session_token: session_token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}
