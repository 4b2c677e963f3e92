use chrono::Duration;
use serde::Serialize;
use std::str::FromStr;

use super::errors::AnalyticsError;

/// Look-back window for analytics and charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ReportPeriod {
  #[serde(rename = "1month")]
  OneMonth,
  #[serde(rename = "3months")]
  ThreeMonths,
  #[serde(rename = "6months")]
  SixMonths,
  #[default]
  #[serde(rename = "12months")]
  TwelveMonths,
}

impl ReportPeriod {
  pub fn lookback(&self) -> Duration {
    match self {
      ReportPeriod::OneMonth => Duration::days(30),
      ReportPeriod::ThreeMonths => Duration::days(90),
      ReportPeriod::SixMonths => Duration::days(180),
      ReportPeriod::TwelveMonths => Duration::days(365),
    }
  }
}

impl FromStr for ReportPeriod {
  type Err = AnalyticsError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "1" | "1month" => Ok(ReportPeriod::OneMonth),
      "3" | "3months" => Ok(ReportPeriod::ThreeMonths),
      "6" | "6months" => Ok(ReportPeriod::SixMonths),
      "12" | "12months" => Ok(ReportPeriod::TwelveMonths),
      other => Err(AnalyticsError::InvalidPeriod(other.to_string())),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
  Revenue,
  Expenses,
  Profit,
  CategoryExpenses,
}

impl ChartKind {
  pub fn label(&self) -> &'static str {
    match self {
      ChartKind::Revenue => "Revenue",
      ChartKind::Expenses => "Expenses",
      ChartKind::Profit => "Profit",
      ChartKind::CategoryExpenses => "Expenses by Category",
    }
  }
}

impl FromStr for ChartKind {
  type Err = AnalyticsError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "revenue" => Ok(ChartKind::Revenue),
      "expenses" => Ok(ChartKind::Expenses),
      "profit" => Ok(ChartKind::Profit),
      "category_expenses" => Ok(ChartKind::CategoryExpenses),
      other => Err(AnalyticsError::InvalidChart(other.to_string())),
    }
  }
}
