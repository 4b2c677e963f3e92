use std::sync::Arc;

use crate::domain::auth::{
  AuthError, AuthService, Email, Password, ProfileChanges, Requester, Username,
};

use super::UserResponse;

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
  pub username: String,
  pub email: String,
  pub phone: Option<String>,
  pub current_password: Option<String>,
  pub new_password: Option<String>,
}

/// Use case for editing the requester's own profile
pub struct UpdateProfileUseCase {
  auth_service: Arc<AuthService>,
}

impl UpdateProfileUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// The password only changes when both the current and the new password
  /// are supplied.
  pub async fn execute(
    &self,
    requester: Requester,
    command: UpdateProfileCommand,
  ) -> Result<UserResponse, AuthError> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

    let password_change = match (
      non_empty(command.current_password),
      non_empty(command.new_password),
    ) {
      (Some(current), Some(new)) => Some((Password::new(current)?, Password::new(new)?)),
      _ => None,
    };

    let changes = ProfileChanges {
      username: Username::new(command.username)?,
      email: Email::new(command.email)?,
      phone: command.phone.filter(|p| !p.trim().is_empty()),
      password_change,
    };

    let user = self.auth_service.update_profile(requester, changes).await?;
    Ok(user.into())
  }
}
