use chrono::Utc;
use std::sync::Arc;

use crate::domain::analytics::{AnalyticsError, AnalyticsService, DashboardSummary, ExportStats};
use crate::domain::auth::Requester;

pub struct DashboardSummaryUseCase {
  analytics_service: Arc<AnalyticsService>,
}

impl DashboardSummaryUseCase {
  pub fn new(analytics_service: Arc<AnalyticsService>) -> Self {
    Self { analytics_service }
  }

  pub async fn execute(&self, requester: Requester) -> Result<DashboardSummary, AnalyticsError> {
    self
      .analytics_service
      .dashboard_summary(requester, Utc::now())
      .await
  }
}

pub struct ExportStatsUseCase {
  analytics_service: Arc<AnalyticsService>,
}

impl ExportStatsUseCase {
  pub fn new(analytics_service: Arc<AnalyticsService>) -> Self {
    Self { analytics_service }
  }

  pub async fn execute(&self, requester: Requester) -> Result<ExportStats, AnalyticsError> {
    self.analytics_service.export_stats(requester).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::analytics::test_support::Fixture;
  use crate::domain::auth::Role;
  use crate::domain::work::{NewSession, SessionDetails};
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  fn session(advance_paid: rust_decimal::Decimal) -> NewSession {
    NewSession {
      details: SessionDetails {
        customer_name: "Ravi".to_string(),
        customer_phone: "9811122233".to_string(),
        service_type: "pan_card".to_string(),
        project_name: "PAN".to_string(),
        task_description: None,
      },
      hourly_rate: dec!(400),
      advance_paid,
      work_status: None,
    }
  }

  #[tokio::test]
  async fn test_user_dashboard_hides_profit() {
    let fixture = Fixture::new();
    let requester = Requester::new(Uuid::new_v4(), Role::User);
    fixture
      .work
      .create_session(requester, session(dec!(400)))
      .await
      .unwrap();
    fixture
      .work
      .create_session(requester, session(dec!(100)))
      .await
      .unwrap();

    let summary = DashboardSummaryUseCase::new(fixture.analytics.clone())
      .execute(requester)
      .await
      .unwrap();

    assert!(!summary.is_admin);
    assert!(summary.total_profit.is_none());
    assert!(summary.total_users.is_none());
    assert_eq!(summary.total_work_entries, 2);
    assert_eq!(summary.work_status.in_progress, 2);
    assert_eq!(summary.today_work, 2);
    assert_eq!(summary.work_revenue.amount(), dec!(400));
    assert_eq!(summary.total_pending_payments.amount(), dec!(300));
  }

  #[tokio::test]
  async fn test_export_stats_counts_own_records() {
    let fixture = Fixture::new();
    let requester = Requester::new(Uuid::new_v4(), Role::User);
    let other = Requester::new(Uuid::new_v4(), Role::User);
    fixture
      .work
      .create_session(requester, session(dec!(0)))
      .await
      .unwrap();
    fixture
      .work
      .create_session(other, session(dec!(0)))
      .await
      .unwrap();

    let stats = ExportStatsUseCase::new(fixture.analytics.clone())
      .execute(requester)
      .await
      .unwrap();

    assert_eq!(stats.work_sessions.count, 1);
    assert_eq!(stats.work_sessions.total.amount(), dec!(400));
    assert_eq!(stats.invoices.count, 0);
  }
}
