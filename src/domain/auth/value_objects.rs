use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Username must be 3 to 80 characters of letters, digits, '.', '_' or '-'")]
  InvalidUsername,

  #[error("Password is too short (minimum 8 characters)")]
  PasswordTooShort,

  #[error("Password is too long (maximum 128 characters)")]
  PasswordTooLong,

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Invalid token format")]
  InvalidToken,

  #[error("Token generation failed: {0}")]
  TokenGenerationFailed(String),

  #[error("Unknown role: {0}")]
  InvalidRole(String),
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into().trim().to_string();

    if !email.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    // Normalize to lowercase
    Ok(Self(email.to_lowercase()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// Username Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
  pub fn new(username: impl Into<String>) -> Result<Self, ValueObjectError> {
    let username = username.into().trim().to_string();
    let valid_chars = username
      .chars()
      .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if !(3..=80).contains(&username.chars().count()) || !valid_chars {
      return Err(ValueObjectError::InvalidUsername);
    }

    Ok(Self(username))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  const MIN_LENGTH: usize = 8;
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.len() < Self::MIN_LENGTH {
      return Err(ValueObjectError::PasswordTooShort);
    }

    if password.len() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong);
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id Hash)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Wraps a PHC-formatted hash string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    argon2::PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// SessionToken Value Object (Random Secure Token)
// ============================================================================

#[derive(Clone)]
pub struct SessionToken(String);

impl SessionToken {
  pub const TOKEN_LENGTH: usize = 32; // 32 bytes = 256 bits

  /// Wraps raw random bytes as a hex token
  pub fn from_bytes(bytes: &[u8; Self::TOKEN_LENGTH]) -> Self {
    Self(hex::encode(bytes))
  }

  /// Parses a token presented by a client
  pub fn from_string(token: impl Into<String>) -> Result<Self, ValueObjectError> {
    let token = token.into();

    if token.len() != Self::TOKEN_LENGTH * 2 || !token.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(token.to_lowercase()))
  }

  /// Creates a hash of this token for storage
  pub fn hash(&self) -> TokenHash {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(self.0.as_bytes());
    TokenHash(hex::encode(hasher.finalize()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// Implement Debug without exposing the token
impl fmt::Debug for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SessionToken(***)")
  }
}

// ============================================================================
// TokenHash Value Object (SHA-256 Hash of Token)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHash(String);

impl TokenHash {
  pub fn verify(&self, token: &SessionToken) -> bool {
    self.0 == token.hash().0
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// Role and Requester
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  User,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Role::Admin => "admin",
      Role::User => "user",
    }
  }
}

impl FromStr for Role {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "admin" => Ok(Role::Admin),
      "user" => Ok(Role::User),
      _ => Err(ValueObjectError::InvalidRole(s.to_string())),
    }
  }
}

/// Identity of the caller, passed explicitly into every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
  pub user_id: Uuid,
  pub role: Role,
}

impl Requester {
  pub fn new(user_id: Uuid, role: Role) -> Self {
    Self { user_id, role }
  }

  pub fn is_admin(&self) -> bool {
    self.role == Role::Admin
  }

  pub fn owns(&self, owner_id: Uuid) -> bool {
    self.user_id == owner_id
  }

  /// Aggregation scope: admins see every owner, users only themselves.
  pub fn scope(&self) -> OwnerScope {
    if self.is_admin() {
      OwnerScope::All
    } else {
      OwnerScope::Owner(self.user_id)
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
  All,
  Owner(Uuid),
}

impl OwnerScope {
  pub fn includes(&self, owner_id: Uuid) -> bool {
    match self {
      OwnerScope::All => true,
      OwnerScope::Owner(id) => *id == owner_id,
    }
  }

  /// Owner filter for SQL binds; `None` means no restriction.
  pub fn owner_id(&self) -> Option<Uuid> {
    match self {
      OwnerScope::All => None,
      OwnerScope::Owner(id) => Some(*id),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_email_validation() {
    assert!(Email::new("test@example.com").is_ok());
    assert!(Email::new("invalid").is_err());
    assert!(Email::new("@example.com").is_err());
  }

  #[test]
  fn test_email_normalization() {
    let email = Email::new("  Test@Example.COM ").unwrap();
    assert_eq!(email.as_str(), "test@example.com");
  }

  #[test]
  fn test_username_rules() {
    assert!(Username::new("jane_doe").is_ok());
    assert!(Username::new("ab").is_err());
    assert!(Username::new("has space").is_err());
  }

  #[test]
  fn test_password_validation() {
    assert!(Password::new("password123").is_ok());
    assert!(matches!(
      Password::new("short"),
      Err(ValueObjectError::PasswordTooShort)
    ));
    assert!(matches!(
      Password::new("a".repeat(129)),
      Err(ValueObjectError::PasswordTooLong)
    ));
  }

  #[test]
  fn test_password_debug_is_redacted() {
    let password = Password::new("supersecret").unwrap();
    assert_eq!(format!("{:?}", password), "Password(***)");
  }

  #[test]
  fn test_token_round_trip_and_hash() {
    let token = SessionToken::from_bytes(&[7u8; 32]);
    assert_eq!(token.as_str().len(), 64);

    let parsed = SessionToken::from_string(token.as_str().to_string()).unwrap();
    assert!(token.hash().verify(&parsed));
    assert_eq!(token.hash().as_str().len(), 64);

    assert!(SessionToken::from_string("not-a-token").is_err());
  }

  #[test]
  fn test_requester_scope() {
    let id = Uuid::new_v4();
    let admin = Requester::new(id, Role::Admin);
    let user = Requester::new(id, Role::User);

    assert_eq!(admin.scope(), OwnerScope::All);
    assert_eq!(user.scope(), OwnerScope::Owner(id));
    assert!(user.scope().includes(id));
    assert!(!user.scope().includes(Uuid::new_v4()));
    assert!(OwnerScope::All.includes(Uuid::new_v4()));
  }

  #[test]
  fn test_role_parsing() {
    assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    assert!("owner".parse::<Role>().is_err());
  }
}
