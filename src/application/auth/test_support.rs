use std::sync::Arc;

use crate::domain::auth::{
  AuthService, AuthServiceConfig, Email, Password, Requester, Role, Username,
};
use crate::infrastructure::persistence::memory::{
  InMemorySessionRepository, InMemoryUserRepository,
};
use crate::infrastructure::security::{Argon2PasswordHasher, SecureTokenGenerator};

use super::{RegisterUserCommand, RegisterUserUseCase};

pub fn auth_service() -> Arc<AuthService> {
  Arc::new(AuthService::new(
    Arc::new(InMemoryUserRepository::new()),
    Arc::new(InMemorySessionRepository::new()),
    Arc::new(Argon2PasswordHasher::new().unwrap()),
    Arc::new(SecureTokenGenerator::new()),
    AuthServiceConfig::default(),
  ))
}

/// Registers a user and returns the session token
pub async fn register(service: &Arc<AuthService>, username: &str, email: &str) -> String {
  RegisterUserUseCase::new(service.clone())
    .execute(RegisterUserCommand {
      username: username.to_string(),
      email: email.to_string(),
      password: "correct-horse-battery".to_string(),
      phone: None,
    })
    .await
    .unwrap()
    .session_token
}

/// Bootstraps the administrator and returns its identity
pub async fn admin(service: &Arc<AuthService>) -> Requester {
  let email = "root@example.com";
  service
    .ensure_admin(
      Username::new("root").unwrap(),
      Email::new(email).unwrap(),
      Password::new("root-password").unwrap(),
    )
    .await
    .unwrap();

  let (user, _, _) = service
    .login(
      Email::new(email).unwrap(),
      Password::new("root-password").unwrap(),
      None,
      None,
      false,
    )
    .await
    .unwrap();
  Requester::new(user.id, Role::Admin)
}
