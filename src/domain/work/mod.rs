pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{SessionDetails, WorkSession};
pub use errors::WorkError;
pub use ports::{ReportQuery, WorkQuery, WorkSessionRepository};
pub use services::{
  NewSession, PaymentInfo, ProjectStats, ReportFilter, SessionChanges, WorkReport, WorkService,
};
pub use value_objects::WorkStatus;
