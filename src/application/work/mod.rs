//! Work session and timer use cases

mod delete_session;
mod get_session;
mod list_sessions;
mod record_session_payment;
mod session_input;
mod set_work_status;
mod start_session;
mod stop_timer;
mod update_session;
mod work_report;

#[cfg(test)]
pub(crate) mod test_support;

pub use delete_session::DeleteSessionUseCase;
pub use get_session::{GetActiveTimerUseCase, GetPaymentInfoUseCase, GetSessionUseCase};
pub use list_sessions::{ListProjectsUseCase, ListSessionsCommand, ListSessionsUseCase};
pub use record_session_payment::{RecordSessionPaymentResponse, RecordSessionPaymentUseCase};
pub use session_input::SessionInput;
pub use set_work_status::SetWorkStatusUseCase;
pub use start_session::StartSessionUseCase;
pub use stop_timer::StopTimerUseCase;
pub use update_session::UpdateSessionUseCase;
pub use work_report::{WorkReportCommand, WorkReportUseCase};
