use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use uuid::Uuid;

use super::value_objects::{Requester, Role};

/// User entity representing an account in the system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// Display and login handle (unique)
  pub username: String,
  /// User's email address (unique)
  pub email: String,
  /// Hashed password using Argon2
  pub password_hash: String,
  pub role: Role,
  pub phone: Option<String>,
  /// Inactive accounts cannot log in
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new active user
  pub fn new(
    username: String,
    email: String,
    password_hash: String,
    role: Role,
    phone: Option<String>,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      username,
      email,
      password_hash,
      role,
      phone,
      is_active: true,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn requester(&self) -> Requester {
    Requester::new(self.id, self.role)
  }

  pub fn is_admin(&self) -> bool {
    self.role == Role::Admin
  }

  pub fn update_profile(&mut self, username: String, email: String, phone: Option<String>) {
    self.username = username;
    self.email = email;
    self.phone = phone;
    self.updated_at = Utc::now();
  }

  pub fn update_password(&mut self, new_password_hash: String) {
    self.password_hash = new_password_hash;
    self.updated_at = Utc::now();
  }

  pub fn toggle_active(&mut self) {
    self.is_active = !self.is_active;
    self.updated_at = Utc::now();
  }
}

/// Session entity; only the hash of the bearer token is kept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub id: Uuid,
  pub user_id: Uuid,
  /// SHA-256 of the session token, hex encoded
  pub token_hash: String,
  pub ip_address: Option<IpAddr>,
  pub user_agent: Option<String>,
  pub expires_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

impl Session {
  /// Creates a session expiring `duration` from now
  pub fn with_duration(
    user_id: Uuid,
    token_hash: String,
    duration: Duration,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      token_hash,
      ip_address,
      user_agent,
      expires_at: now + duration,
      created_at: now,
    }
  }

  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn user(role: Role) -> User {
    User::new(
      "tester".to_string(),
      "test@example.com".to_string(),
      "hashed_password".to_string(),
      role,
      None,
    )
  }

  #[test]
  fn test_user_creation() {
    let user = user(Role::User);
    assert!(user.is_active);
    assert!(!user.is_admin());
    assert_eq!(user.requester().user_id, user.id);
  }

  #[test]
  fn test_toggle_active() {
    let mut user = user(Role::Admin);
    user.toggle_active();
    assert!(!user.is_active);
    user.toggle_active();
    assert!(user.is_active);
  }

  #[test]
  fn test_session_expiration() {
    let live = Session::with_duration(
      Uuid::new_v4(),
      "hash".to_string(),
      Duration::hours(1),
      Some("127.0.0.1".parse().unwrap()),
      None,
    );
    assert!(!live.is_expired());

    let expired = Session::with_duration(
      Uuid::new_v4(),
      "hash".to_string(),
      Duration::seconds(-10),
      None,
      None,
    );
    assert!(expired.is_expired());
  }
}
