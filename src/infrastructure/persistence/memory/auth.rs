use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::auth::{
  AuthError, Email, RepositoryError, Session, SessionRepository, User, UserRepository,
};

#[derive(Default)]
pub struct InMemoryUserRepository {
  users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

/// Mirrors the unique constraints of the `users` table.
fn ensure_unique(users: &HashMap<Uuid, User>, user: &User) -> Result<(), AuthError> {
  for other in users.values().filter(|u| u.id != user.id) {
    if other.email == user.email {
      return Err(RepositoryError::DuplicateKey("users_email_key".to_string()).into());
    }
    if other.username == user.username {
      return Err(RepositoryError::DuplicateKey("users_username_key".to_string()).into());
    }
  }
  Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let mut users = self.users.write().await;
    ensure_unique(&users, &user)?;
    users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    Ok(self.users.read().await.get(&id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let users = self.users.read().await;
    Ok(users.values().find(|u| u.email == email.as_str()).cloned())
  }

  async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
    let users = self.users.read().await;
    Ok(users.values().find(|u| u.username == username).cloned())
  }

  async fn update(&self, user: User) -> Result<User, AuthError> {
    let mut users = self.users.write().await;
    if !users.contains_key(&user.id) {
      return Err(AuthError::UserNotFound);
    }
    ensure_unique(&users, &user)?;
    users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn list(&self) -> Result<Vec<User>, AuthError> {
    let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
    users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(users)
  }

  async fn count(&self) -> Result<i64, AuthError> {
    Ok(self.users.read().await.len() as i64)
  }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
  sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
  async fn create(&self, session: Session) -> Result<Session, AuthError> {
    self
      .sessions
      .write()
      .await
      .insert(session.id, session.clone());
    Ok(session)
  }

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError> {
    let sessions = self.sessions.read().await;
    Ok(
      sessions
        .values()
        .find(|s| s.token_hash == token_hash)
        .cloned(),
    )
  }

  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError> {
    self.sessions.write().await.remove(&session_id);
    Ok(())
  }

  async fn delete_all_for_user(&self, user_id: Uuid) -> Result<(), AuthError> {
    self
      .sessions
      .write()
      .await
      .retain(|_, s| s.user_id != user_id);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::Role;

  fn user(name: &str) -> User {
    User::new(
      name.to_string(),
      format!("{}@example.com", name),
      "hash".to_string(),
      Role::User,
      None,
    )
  }

  #[tokio::test]
  async fn test_create_rejects_duplicate_username() {
    let repo = InMemoryUserRepository::new();
    repo.create(user("alice")).await.unwrap();

    let mut clash = user("bob");
    clash.username = "alice".to_string();
    let err = repo.create(clash).await.unwrap_err();

    assert!(matches!(
      err,
      AuthError::Repository(RepositoryError::DuplicateKey(ref c)) if c.contains("username")
    ));
    assert_eq!(repo.count().await.unwrap(), 1);
  }
}
