use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::{
  AuthError, AuthService, Email, NewAccount, Password, Requester, Role, Username,
};

use super::UserResponse;

#[derive(Debug, Clone)]
pub struct CreateUserCommand {
  pub username: String,
  pub email: String,
  pub password: String,
  pub role: String,
  pub phone: Option<String>,
}

/// Admin-only account creation with an explicit role
pub struct CreateUserUseCase {
  auth_service: Arc<AuthService>,
}

impl CreateUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    command: CreateUserCommand,
  ) -> Result<UserResponse, AuthError> {
    let account = NewAccount {
      username: Username::new(command.username)?,
      email: Email::new(command.email)?,
      password: Password::new(command.password)?,
      role: Role::from_str(&command.role)?,
      phone: command.phone.filter(|p| !p.trim().is_empty()),
    };

    let user = self.auth_service.create_user(requester, account).await?;
    Ok(user.into())
  }
}

pub struct ListUsersUseCase {
  auth_service: Arc<AuthService>,
}

impl ListUsersUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, requester: Requester) -> Result<Vec<UserResponse>, AuthError> {
    let users = self.auth_service.list_users(requester).await?;
    Ok(users.into_iter().map(UserResponse::from).collect())
  }
}

pub struct ToggleUserActiveUseCase {
  auth_service: Arc<AuthService>,
}

impl ToggleUserActiveUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    user_id: Uuid,
  ) -> Result<UserResponse, AuthError> {
    let user = self
      .auth_service
      .toggle_user_active(requester, user_id)
      .await?;
    Ok(user.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::test_support::{admin, auth_service, register};
  use crate::application::auth::AuthenticateUseCase;

  fn command(role: &str) -> CreateUserCommand {
    CreateUserCommand {
      username: "operator".to_string(),
      email: "operator@example.com".to_string(),
      password: "operator-secret".to_string(),
      role: role.to_string(),
      phone: None,
    }
  }

  #[tokio::test]
  async fn test_only_admins_create_users() {
    let service = auth_service();
    let token = register(&service, "plain", "plain@example.com").await;
    let requester = AuthenticateUseCase::new(service.clone())
      .execute(&token)
      .await
      .unwrap();
    let use_case = CreateUserUseCase::new(service.clone());

    let err = use_case.execute(requester, command("user")).await.unwrap_err();
    assert!(matches!(err, AuthError::AdminRequired));

    let admin = admin(&service).await;
    let created = use_case.execute(admin, command("admin")).await.unwrap();
    assert_eq!(created.role, "admin");
  }

  #[tokio::test]
  async fn test_toggle_deactivates_and_blocks_sessions() {
    let service = auth_service();
    let admin = admin(&service).await;
    let token = register(&service, "temp", "temp@example.com").await;
    let authenticate = AuthenticateUseCase::new(service.clone());
    let target = authenticate.execute(&token).await.unwrap();

    let toggled = ToggleUserActiveUseCase::new(service.clone())
      .execute(admin, target.user_id)
      .await
      .unwrap();

    assert!(!toggled.is_active);
    assert!(authenticate.execute(&token).await.is_err());

    let err = ToggleUserActiveUseCase::new(service.clone())
      .execute(admin, admin.user_id)
      .await
      .unwrap_err();
    assert!(matches!(err, AuthError::CannotToggleSelf));

    let users = ListUsersUseCase::new(service).execute(admin).await.unwrap();
    assert_eq!(users.len(), 2);
  }
}
