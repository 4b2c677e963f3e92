use std::sync::Arc;

use crate::domain::auth::{AuthError, AuthService, Requester};

use super::UserResponse;

/// Use case for getting the current authenticated user
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, requester: Requester) -> Result<UserResponse, AuthError> {
    let user = self.auth_service.current_user(requester).await?;
    Ok(user.into())
  }
}
