pub mod dtos;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{ErrorResponse, SuccessResponse};
pub use errors::{ApiError, AuthErrorKind};
pub use middleware::{AuthMiddleware, RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{configure_api_routes, configure_system_routes};
