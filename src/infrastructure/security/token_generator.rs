use rand::RngCore;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::TokenGenerator;
use crate::domain::auth::value_objects::{SessionToken, ValueObjectError};

/// Session tokens from the operating system's CSPRNG
#[derive(Debug, Default)]
pub struct SecureTokenGenerator;

impl SecureTokenGenerator {
  pub fn new() -> Self {
    Self
  }
}

impl TokenGenerator for SecureTokenGenerator {
  fn generate(&self) -> Result<SessionToken, AuthError> {
    let mut bytes = [0u8; SessionToken::TOKEN_LENGTH];
    rand::rngs::OsRng
      .try_fill_bytes(&mut bytes)
      .map_err(|e| ValueObjectError::TokenGenerationFailed(e.to_string()))?;

    Ok(SessionToken::from_bytes(&bytes))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tokens_are_unique() {
    let generator = SecureTokenGenerator::new();

    let first = generator.generate().unwrap();
    let second = generator.generate().unwrap();

    assert_ne!(first.as_str(), second.as_str());
  }

  #[test]
  fn test_token_is_hex_and_round_trips() {
    let token = SecureTokenGenerator::new().generate().unwrap();

    assert_eq!(token.as_str().len(), 64);
    assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    assert!(SessionToken::from_string(token.as_str()).is_ok());
  }
}
