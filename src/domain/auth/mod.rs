pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Session, User};
pub use errors::{AuthError, HashError, RepositoryError};
pub use ports::{PasswordHasher, SessionRepository, TokenGenerator, UserRepository};
pub use services::{AuthService, AuthServiceConfig, NewAccount, ProfileChanges};
pub use value_objects::{
  Email, OwnerScope, Password, PasswordHash, Requester, Role, SessionToken, TokenHash, Username,
};
