use chrono::Duration;
use std::net::IpAddr;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Session, User};
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, SessionRepository, TokenGenerator, UserRepository};
use super::value_objects::{Email, Password, PasswordHash, Requester, Role, SessionToken, Username};

/// Session lifetimes
#[derive(Debug, Clone, Copy)]
pub struct AuthServiceConfig {
  pub session_ttl_seconds: i64,
  pub remember_me_ttl_seconds: i64,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      session_ttl_seconds: 24 * 60 * 60,
      remember_me_ttl_seconds: 30 * 24 * 60 * 60,
    }
  }
}

/// Validated input for a new account
#[derive(Debug)]
pub struct NewAccount {
  pub username: Username,
  pub email: Email,
  pub password: Password,
  pub role: Role,
  pub phone: Option<String>,
}

/// Validated profile changes; the password only changes when both are given
#[derive(Debug)]
pub struct ProfileChanges {
  pub username: Username,
  pub email: Email,
  pub phone: Option<String>,
  pub password_change: Option<(Password, Password)>,
}

/// Authentication and user administration
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_generator: Arc<dyn TokenGenerator>,
  config: AuthServiceConfig,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_generator: Arc<dyn TokenGenerator>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      password_hasher,
      token_generator,
      config,
    }
  }

  /// Public self-registration; the role is always `user`.
  pub async fn register(
    &self,
    mut account: NewAccount,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    account.role = Role::User;
    let user = self.create_account(account).await?;
    let (session, token) = self.open_session(&user, None, None, false).await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((user, session, token))
  }

  /// Authenticates a user and creates a new session
  pub async fn login(
    &self,
    email: Email,
    password: Password,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
    remember_me: bool,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    let user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    let password_hash = PasswordHash::from_hash(user.password_hash.clone())?;
    if !self.password_hasher.verify(&password, &password_hash).await? {
      tracing::warn!(user_id = %user.id, "Rejected login with wrong password");
      return Err(AuthError::InvalidCredentials);
    }

    if !user.is_active {
      tracing::warn!(user_id = %user.id, "Rejected login for deactivated account");
      return Err(AuthError::AccountDisabled);
    }

    let (session, token) = self
      .open_session(&user, ip_address, user_agent, remember_me)
      .await?;

    Ok((user, session, token))
  }

  /// Invalidates the session behind the token
  pub async fn logout(&self, token: SessionToken) -> Result<(), AuthError> {
    let session = self
      .session_repo
      .find_by_token_hash(token.hash().as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    self.session_repo.delete(session.id).await
  }

  /// Resolves a bearer token to its user; expired sessions are removed.
  pub async fn authenticate(&self, token: SessionToken) -> Result<User, AuthError> {
    let session = self
      .session_repo
      .find_by_token_hash(token.hash().as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if session.is_expired() {
      self.session_repo.delete(session.id).await?;
      return Err(AuthError::InvalidSession);
    }

    let user = self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if !user.is_active {
      return Err(AuthError::AccountDisabled);
    }

    Ok(user)
  }

  pub async fn current_user(&self, requester: Requester) -> Result<User, AuthError> {
    self
      .user_repo
      .find_by_id(requester.user_id)
      .await?
      .ok_or(AuthError::UserNotFound)
  }

  pub async fn update_profile(
    &self,
    requester: Requester,
    changes: ProfileChanges,
  ) -> Result<User, AuthError> {
    let mut user = self.current_user(requester).await?;

    if let Some(other) = self.user_repo.find_by_email(&changes.email).await? {
      if other.id != user.id {
        return Err(AuthError::EmailAlreadyExists);
      }
    }
    if let Some(other) = self
      .user_repo
      .find_by_username(changes.username.as_str())
      .await?
    {
      if other.id != user.id {
        return Err(AuthError::UsernameAlreadyExists);
      }
    }

    if let Some((current, new)) = changes.password_change {
      let stored = PasswordHash::from_hash(user.password_hash.clone())?;
      if !self.password_hasher.verify(&current, &stored).await? {
        return Err(AuthError::CurrentPasswordMismatch);
      }
      let new_hash = self.password_hasher.hash(&new).await?;
      user.update_password(new_hash.into_inner());
    }

    user.update_profile(
      changes.username.into_inner(),
      changes.email.into_inner(),
      changes.phone,
    );

    self.user_repo.update(user).await
  }

  /// Admin-only account creation with an explicit role.
  pub async fn create_user(
    &self,
    requester: Requester,
    account: NewAccount,
  ) -> Result<User, AuthError> {
    Self::require_admin(requester)?;
    let user = self.create_account(account).await?;

    tracing::info!(user_id = %user.id, role = user.role.as_str(), created_by = %requester.user_id, "User created");
    Ok(user)
  }

  pub async fn list_users(&self, requester: Requester) -> Result<Vec<User>, AuthError> {
    Self::require_admin(requester)?;
    self.user_repo.list().await
  }

  /// Flips the active flag of another account. Deactivation also ends its sessions.
  pub async fn toggle_user_active(
    &self,
    requester: Requester,
    user_id: Uuid,
  ) -> Result<User, AuthError> {
    Self::require_admin(requester)?;
    if requester.user_id == user_id {
      return Err(AuthError::CannotToggleSelf);
    }

    let mut user = self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    user.toggle_active();
    let user = self.user_repo.update(user).await?;

    if !user.is_active {
      self.session_repo.delete_all_for_user(user.id).await?;
    }

    tracing::info!(user_id = %user.id, is_active = user.is_active, "User active flag changed");
    Ok(user)
  }

  /// Creates the bootstrap administrator unless the email is already taken.
  pub async fn ensure_admin(
    &self,
    username: Username,
    email: Email,
    password: Password,
  ) -> Result<bool, AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Ok(false);
    }

    self
      .create_account(NewAccount {
        username,
        email,
        password,
        role: Role::Admin,
        phone: None,
      })
      .await?;
    Ok(true)
  }

  fn require_admin(requester: Requester) -> Result<(), AuthError> {
    if requester.is_admin() {
      Ok(())
    } else {
      Err(AuthError::AdminRequired)
    }
  }

  async fn create_account(&self, account: NewAccount) -> Result<User, AuthError> {
    if self.user_repo.find_by_email(&account.email).await?.is_some() {
      return Err(AuthError::EmailAlreadyExists);
    }
    if self
      .user_repo
      .find_by_username(account.username.as_str())
      .await?
      .is_some()
    {
      return Err(AuthError::UsernameAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&account.password).await?;
    let user = User::new(
      account.username.into_inner(),
      account.email.into_inner(),
      password_hash.into_inner(),
      account.role,
      account.phone,
    );

    match self.user_repo.create(user).await {
      Ok(user) => Ok(user),
      Err(AuthError::Repository(RepositoryError::DuplicateKey(constraint)))
        if constraint.contains("username") =>
      {
        Err(AuthError::UsernameAlreadyExists)
      }
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        Err(AuthError::EmailAlreadyExists)
      }
      Err(e) => Err(e),
    }
  }

  async fn open_session(
    &self,
    user: &User,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
    remember_me: bool,
  ) -> Result<(Session, SessionToken), AuthError> {
    let token = self.token_generator.generate()?;

    let ttl = if remember_me {
      self.config.remember_me_ttl_seconds
    } else {
      self.config.session_ttl_seconds
    };

    let session = Session::with_duration(
      user.id,
      token.hash().into_inner(),
      Duration::seconds(ttl),
      ip_address,
      user_agent,
    );

    let session = self.session_repo.create(session).await?;
    Ok((session, token))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::memory::{
    InMemorySessionRepository, InMemoryUserRepository,
  };
  use crate::infrastructure::security::{Argon2PasswordHasher, SecureTokenGenerator};

  fn service() -> AuthService {
    AuthService::new(
      Arc::new(InMemoryUserRepository::new()),
      Arc::new(InMemorySessionRepository::new()),
      Arc::new(Argon2PasswordHasher::new().unwrap()),
      Arc::new(SecureTokenGenerator::new()),
      AuthServiceConfig::default(),
    )
  }

  fn account(name: &str, role: Role) -> NewAccount {
    NewAccount {
      username: Username::new(name).unwrap(),
      email: Email::new(format!("{}@example.com", name)).unwrap(),
      password: Password::new("password123").unwrap(),
      role,
      phone: None,
    }
  }

  #[tokio::test]
  async fn test_register_always_creates_regular_user() {
    let service = service();
    let (user, _session, token) = service.register(account("alice", Role::Admin)).await.unwrap();

    assert_eq!(user.role, Role::User);
    let authenticated = service.authenticate(token).await.unwrap();
    assert_eq!(authenticated.id, user.id);
  }

  #[tokio::test]
  async fn test_register_rejects_duplicate_email() {
    let service = service();
    service.register(account("bob", Role::User)).await.unwrap();

    let mut duplicate = account("bobby", Role::User);
    duplicate.email = Email::new("bob@example.com").unwrap();
    let result = service.register(duplicate).await;
    assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));
  }

  #[tokio::test]
  async fn test_login_and_logout() {
    let service = service();
    service.register(account("carol", Role::User)).await.unwrap();

    let wrong = service
      .login(
        Email::new("carol@example.com").unwrap(),
        Password::new("not-the-password").unwrap(),
        None,
        None,
        false,
      )
      .await;
    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

    let (_, _, token) = service
      .login(
        Email::new("carol@example.com").unwrap(),
        Password::new("password123").unwrap(),
        None,
        None,
        true,
      )
      .await
      .unwrap();

    service.logout(token.clone()).await.unwrap();
    assert!(matches!(
      service.authenticate(token).await,
      Err(AuthError::InvalidSession)
    ));
  }

  #[tokio::test]
  async fn test_admin_toggles_other_user_but_not_self() {
    let service = service();
    service
      .ensure_admin(
        Username::new("admin").unwrap(),
        Email::new("admin@example.com").unwrap(),
        Password::new("admin-password").unwrap(),
      )
      .await
      .unwrap();
    let (admin, _, _) = service
      .login(
        Email::new("admin@example.com").unwrap(),
        Password::new("admin-password").unwrap(),
        None,
        None,
        false,
      )
      .await
      .unwrap();
    let (dave, _, dave_token) = service.register(account("dave", Role::User)).await.unwrap();

    let self_toggle = service
      .toggle_user_active(admin.requester(), admin.id)
      .await;
    assert!(matches!(self_toggle, Err(AuthError::CannotToggleSelf)));

    let toggled = service
      .toggle_user_active(admin.requester(), dave.id)
      .await
      .unwrap();
    assert!(!toggled.is_active);

    // Deactivation revokes sessions and blocks login
    assert!(service.authenticate(dave_token).await.is_err());
    let login = service
      .login(
        Email::new("dave@example.com").unwrap(),
        Password::new("password123").unwrap(),
        None,
        None,
        false,
      )
      .await;
    assert!(matches!(login, Err(AuthError::AccountDisabled)));
  }

  #[tokio::test]
  async fn test_non_admin_cannot_manage_users() {
    let service = service();
    let (erin, _, _) = service.register(account("erin", Role::User)).await.unwrap();

    let result = service
      .create_user(erin.requester(), account("frank", Role::Admin))
      .await;
    assert!(matches!(result, Err(AuthError::AdminRequired)));
    assert!(matches!(
      service.list_users(erin.requester()).await,
      Err(AuthError::AdminRequired)
    ));
  }

  #[tokio::test]
  async fn test_password_change_requires_current_password() {
    let service = service();
    let (gina, _, _) = service.register(account("gina", Role::User)).await.unwrap();

    let rejected = service
      .update_profile(
        gina.requester(),
        ProfileChanges {
          username: Username::new("gina").unwrap(),
          email: Email::new("gina@example.com").unwrap(),
          phone: Some("555-0100".to_string()),
          password_change: Some((
            Password::new("wrong-password").unwrap(),
            Password::new("new-password").unwrap(),
          )),
        },
      )
      .await;
    assert!(matches!(rejected, Err(AuthError::CurrentPasswordMismatch)));

    let updated = service
      .update_profile(
        gina.requester(),
        ProfileChanges {
          username: Username::new("gina_r").unwrap(),
          email: Email::new("gina@example.com").unwrap(),
          phone: Some("555-0100".to_string()),
          password_change: Some((
            Password::new("password123").unwrap(),
            Password::new("new-password").unwrap(),
          )),
        },
      )
      .await
      .unwrap();
    assert_eq!(updated.username, "gina_r");

    assert!(
      service
        .login(
          Email::new("gina@example.com").unwrap(),
          Password::new("new-password").unwrap(),
          None,
          None,
          false,
        )
        .await
        .is_ok()
    );
  }
}
