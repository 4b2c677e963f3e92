//! Authentication and user administration use cases

mod authenticate;
mod get_current_user;
mod login_user;
mod logout_user;
mod manage_users;
mod register_user;
mod update_profile;
mod user_response;

#[cfg(test)]
pub(crate) mod test_support;

pub use authenticate::AuthenticateUseCase;
pub use get_current_user::GetCurrentUserUseCase;
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use logout_user::LogoutUserUseCase;
pub use manage_users::{
  CreateUserCommand, CreateUserUseCase, ListUsersUseCase, ToggleUserActiveUseCase,
};
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
pub use update_profile::{UpdateProfileCommand, UpdateProfileUseCase};
pub use user_response::UserResponse;
