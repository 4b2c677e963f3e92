//! Dashboard, chart and profit reporting use cases

mod dashboard;
mod reports;

#[cfg(test)]
pub(crate) mod test_support;

pub use dashboard::{DashboardSummaryUseCase, ExportStatsUseCase};
pub use reports::{AnalyticsUseCase, ChartDataUseCase, ProfitLossUseCase};
