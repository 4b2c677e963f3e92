use std::sync::Arc;

use crate::domain::auth::{AuthError, AuthService, Requester, SessionToken};

/// Resolves a bearer token into the identity passed to every other use case
pub struct AuthenticateUseCase {
  auth_service: Arc<AuthService>,
}

impl AuthenticateUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, session_token: &str) -> Result<Requester, AuthError> {
    let token = SessionToken::from_string(session_token)?;
    let user = self.auth_service.authenticate(token).await?;
    Ok(Requester::new(user.id, user.role))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::test_support::{auth_service, register};
  use crate::application::auth::LogoutUserUseCase;
  use crate::domain::auth::Role;

  #[tokio::test]
  async fn test_token_resolves_until_logout() {
    let service = auth_service();
    let token = register(&service, "ravi", "ravi@example.com").await;
    let authenticate = AuthenticateUseCase::new(service.clone());

    let requester = authenticate.execute(&token).await.unwrap();
    assert_eq!(requester.role, Role::User);

    LogoutUserUseCase::new(service)
      .execute(token.clone())
      .await
      .unwrap();

    let err = authenticate.execute(&token).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidSession));
  }

  #[tokio::test]
  async fn test_malformed_token_is_rejected() {
    let authenticate = AuthenticateUseCase::new(auth_service());

    assert!(authenticate.execute("not-a-token").await.is_err());
  }
}
