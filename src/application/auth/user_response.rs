use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::auth::User;

/// Public view of an account; the password hash never leaves the domain
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
  pub id: Uuid,
  pub username: String,
  pub email: String,
  pub role: &'static str,
  pub phone: Option<String>,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      username: user.username,
      email: user.email,
      role: user.role.as_str(),
      phone: user.phone,
      is_active: user.is_active,
      created_at: user.created_at,
    }
  }
}
