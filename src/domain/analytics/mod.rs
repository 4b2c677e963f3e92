//! Dashboards, charts and profit reporting over invoices, expenses and work
//! sessions.

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::AnalyticsError;
pub use services::{
  Analytics, AnalyticsService, ChartData, CustomerTotals, DashboardSummary, ExportStats,
  ProfitLoss, RecordStats, StatusTotals, WorkStatusBreakdown,
};
pub use value_objects::{ChartKind, ReportPeriod};
