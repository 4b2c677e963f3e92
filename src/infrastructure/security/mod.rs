mod argon2_hasher;
mod token_generator;

pub use argon2_hasher::Argon2PasswordHasher;
pub use token_generator::SecureTokenGenerator;
