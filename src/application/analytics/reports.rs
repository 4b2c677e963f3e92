use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use crate::domain::analytics::{
  Analytics, AnalyticsError, AnalyticsService, ChartData, ChartKind, ProfitLoss, ReportPeriod,
};
use crate::domain::auth::Requester;

/// Parses an optional period, falling back to twelve months.
fn period(raw: Option<&str>) -> Result<ReportPeriod, AnalyticsError> {
  match raw.map(str::trim) {
    None | Some("") => Ok(ReportPeriod::default()),
    Some(value) => value.parse(),
  }
}

pub struct AnalyticsUseCase {
  analytics_service: Arc<AnalyticsService>,
}

impl AnalyticsUseCase {
  pub fn new(analytics_service: Arc<AnalyticsService>) -> Self {
    Self { analytics_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    period_param: Option<&str>,
  ) -> Result<Analytics, AnalyticsError> {
    let period = period(period_param)?;
    self
      .analytics_service
      .analytics(requester, period, Utc::now())
      .await
  }
}

pub struct ChartDataUseCase {
  analytics_service: Arc<AnalyticsService>,
}

impl ChartDataUseCase {
  pub fn new(analytics_service: Arc<AnalyticsService>) -> Self {
    Self { analytics_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    chart: &str,
    period_param: Option<&str>,
  ) -> Result<ChartData, AnalyticsError> {
    let kind: ChartKind = chart.parse()?;
    let period = period(period_param)?;
    self
      .analytics_service
      .chart_data(requester, kind, period, Utc::now())
      .await
  }
}

pub struct ProfitLossUseCase {
  analytics_service: Arc<AnalyticsService>,
}

impl ProfitLossUseCase {
  pub fn new(analytics_service: Arc<AnalyticsService>) -> Self {
    Self { analytics_service }
  }

  pub async fn execute(
    &self,
    requester: Requester,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
  ) -> Result<ProfitLoss, AnalyticsError> {
    self
      .analytics_service
      .profit_loss(requester, start_date, end_date, Utc::now())
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::analytics::test_support::Fixture;
  use crate::domain::auth::Role;
  use crate::domain::expense::ExpenseInput;
  use rust_decimal::Decimal;
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  #[tokio::test]
  async fn test_unknown_chart_and_period_are_rejected() {
    let fixture = Fixture::new();
    let use_case = ChartDataUseCase::new(fixture.analytics.clone());
    let requester = Requester::new(Uuid::new_v4(), Role::User);

    let err = use_case.execute(requester, "pie", None).await.unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidChart(_)));

    let err = use_case
      .execute(requester, "revenue", Some("2"))
      .await
      .unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidPeriod(_)));

    let chart = use_case
      .execute(requester, "expenses", Some("3"))
      .await
      .unwrap();
    assert_eq!(chart.label, "Expenses");
    assert!(chart.data.is_empty());
  }

  #[tokio::test]
  async fn test_profit_loss_with_expenses_only() {
    let fixture = Fixture::new();
    let requester = Requester::new(Uuid::new_v4(), Role::User);
    let day = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
    fixture
      .expenses
      .create_expense(
        requester,
        ExpenseInput {
          title: "Internet".to_string(),
          description: None,
          amount: dec!(999),
          category: "Utilities".to_string(),
          date: day,
        },
      )
      .await
      .unwrap();

    let report = ProfitLossUseCase::new(fixture.analytics.clone())
      .execute(requester, Some(day), Some(day))
      .await
      .unwrap();

    assert_eq!(report.total_expenses.amount(), dec!(999));
    assert_eq!(report.net_profit, dec!(-999));
    assert_eq!(report.profit_margin, Decimal::ZERO);
  }

  #[tokio::test]
  async fn test_profit_loss_rejects_inverted_range() {
    let fixture = Fixture::new();
    let requester = Requester::new(Uuid::new_v4(), Role::User);

    let err = ProfitLossUseCase::new(fixture.analytics.clone())
      .execute(
        requester,
        NaiveDate::from_ymd_opt(2026, 3, 2),
        NaiveDate::from_ymd_opt(2026, 3, 1),
      )
      .await
      .unwrap_err();

    assert!(matches!(err, AnalyticsError::InvalidRange));
  }
}
