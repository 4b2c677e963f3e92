use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::auth::{AuthError, AuthService, Email, NewAccount, Password, Role, Username};

use super::UserResponse;

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub username: String,
  pub email: String,
  /// Plain text, hashed by the service
  pub password: String,
  pub phone: Option<String>,
}

/// Response after successful user registration
#[derive(Debug, Clone, Serialize)]
pub struct RegisterUserResponse {
  pub user: UserResponse,
  /// Session token for immediate login
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Registers a regular user and opens a session for them
  ///
  /// # Errors
  /// Returns `AuthError` if the email or username is taken or a field is invalid
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, AuthError> {
    let account = NewAccount {
      username: Username::new(command.username)?,
      email: Email::new(command.email)?,
      password: Password::new(command.password)?,
      role: Role::User,
      phone: command.phone.filter(|p| !p.trim().is_empty()),
    };

    let (user, session, session_token) = self.auth_service.register(account).await?;

    Ok(RegisterUserResponse {
      user: user.into(),
      session_token: session_token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}
