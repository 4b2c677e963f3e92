use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::{OwnerScope, Requester, UserRepository};
use crate::domain::expense::{Expense, ExpenseFilter, ExpenseRepository};
use crate::domain::invoice::{CustomerRepository, Invoice, InvoiceRepository, InvoiceStatus};
use crate::domain::ledger::{Money, PaymentState};
use crate::domain::work::{WorkSession, WorkSessionRepository, WorkStatus};

use super::errors::AnalyticsError;
use super::value_objects::{ChartKind, ReportPeriod};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkStatusBreakdown {
  pub pending: u64,
  pub in_progress: u64,
  pub completed: u64,
  pub delivered: u64,
}

/// Headline figures. Profit and user count are only reported to admins.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
  pub is_admin: bool,
  pub total_invoices: u64,
  pub monthly_invoices: u64,
  pub total_revenue: Money,
  pub monthly_revenue: Money,
  pub total_remaining: Money,
  pub monthly_remaining: Money,
  pub total_expenses: Money,
  pub monthly_expenses: Money,
  pub total_work_entries: u64,
  pub monthly_work_entries: u64,
  pub work_status: WorkStatusBreakdown,
  pub work_revenue: Money,
  pub monthly_work_revenue: Money,
  pub total_combined_revenue: Money,
  pub monthly_combined_revenue: Money,
  pub total_profit: Option<Decimal>,
  pub monthly_profit: Option<Decimal>,
  pub total_pending_payments: Money,
  pub today_work: u64,
  pub total_users: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusTotals {
  pub count: u64,
  pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerTotals {
  pub customer_id: Uuid,
  pub name: Option<String>,
  pub total: Money,
  pub invoice_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Analytics {
  pub period: ReportPeriod,
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
  pub monthly_revenue: BTreeMap<String, Money>,
  pub monthly_expenses: BTreeMap<String, Money>,
  pub monthly_work_minutes: BTreeMap<String, i64>,
  pub category_expenses: BTreeMap<String, Money>,
  pub status_breakdown: BTreeMap<String, StatusTotals>,
  pub top_customers: Vec<CustomerTotals>,
  pub total_revenue: Money,
  pub total_expenses: Money,
  pub total_profit: Decimal,
  pub profit_growth: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
  pub label: &'static str,
  pub labels: Vec<String>,
  pub data: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitLoss {
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  pub total_revenue: Money,
  pub total_expenses: Money,
  pub net_profit: Decimal,
  pub profit_margin: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordStats {
  pub count: u64,
  pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportStats {
  pub invoices: RecordStats,
  pub expenses: RecordStats,
  pub work_sessions: RecordStats,
  pub net_profit: Decimal,
}

struct Dataset {
  invoices: Vec<Invoice>,
  expenses: Vec<Expense>,
  sessions: Vec<WorkSession>,
}

pub struct AnalyticsService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  customer_repo: Arc<dyn CustomerRepository>,
  expense_repo: Arc<dyn ExpenseRepository>,
  session_repo: Arc<dyn WorkSessionRepository>,
  user_repo: Arc<dyn UserRepository>,
}

impl AnalyticsService {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    expense_repo: Arc<dyn ExpenseRepository>,
    session_repo: Arc<dyn WorkSessionRepository>,
    user_repo: Arc<dyn UserRepository>,
  ) -> Self {
    Self {
      invoice_repo,
      customer_repo,
      expense_repo,
      session_repo,
      user_repo,
    }
  }

  pub async fn dashboard_summary(
    &self,
    requester: Requester,
    now: DateTime<Utc>,
  ) -> Result<DashboardSummary, AnalyticsError> {
    let data = self.load(requester.scope(), None).await?;
    let (month_start, next_month) = month_bounds(now);
    let in_month = |at: DateTime<Utc>| at >= month_start && at < next_month;
    let month_start_date = month_start.date_naive();
    let next_month_date = next_month.date_naive();

    let paid_invoices = || {
      data
        .invoices
        .iter()
        .filter(|i| i.status == InvoiceStatus::Paid)
    };
    let paid_sessions = || {
      data
        .sessions
        .iter()
        .filter(|s| s.payment_status == PaymentState::Paid)
    };

    let total_revenue: Money = paid_invoices().map(|i| i.total).sum();
    let monthly_revenue: Money = paid_invoices()
      .filter(|i| in_month(i.created_at))
      .map(|i| i.total)
      .sum();
    let total_expenses: Money = data.expenses.iter().map(|e| e.amount).sum();
    let monthly_expenses: Money = data
      .expenses
      .iter()
      .filter(|e| e.date >= month_start_date && e.date < next_month_date)
      .map(|e| e.amount)
      .sum();
    let work_revenue: Money = paid_sessions().map(|s| s.total).sum();
    let monthly_work_revenue: Money = paid_sessions()
      .filter(|s| in_month(s.created_at))
      .map(|s| s.total)
      .sum();

    let mut work_status = WorkStatusBreakdown::default();
    for session in &data.sessions {
      match session.work_status {
        WorkStatus::Pending => work_status.pending += 1,
        WorkStatus::InProgress => work_status.in_progress += 1,
        WorkStatus::Completed => work_status.completed += 1,
        WorkStatus::Delivered => work_status.delivered += 1,
      }
    }

    let total_combined_revenue = total_revenue.add(work_revenue);
    let monthly_combined_revenue = monthly_revenue.add(monthly_work_revenue);
    let pending_invoices: Money = data.invoices.iter().map(|i| i.remaining).sum();
    let pending_sessions: Money = data.sessions.iter().map(|s| s.remaining).sum();

    let today = now.date_naive();
    let today_work = data
      .sessions
      .iter()
      .filter(|s| {
        matches!(s.work_status, WorkStatus::Pending | WorkStatus::InProgress)
          && s.created_at.date_naive() == today
      })
      .count() as u64;

    let is_admin = requester.is_admin();
    let (total_profit, monthly_profit, total_users) = if is_admin {
      (
        Some(total_combined_revenue.amount() - total_expenses.amount()),
        Some(monthly_combined_revenue.amount() - monthly_expenses.amount()),
        Some(self.user_repo.count().await?),
      )
    } else {
      (None, None, None)
    };

    Ok(DashboardSummary {
      is_admin,
      total_invoices: data.invoices.len() as u64,
      monthly_invoices: data.invoices.iter().filter(|i| in_month(i.created_at)).count() as u64,
      total_revenue,
      monthly_revenue,
      total_remaining: pending_invoices,
      monthly_remaining: data
        .invoices
        .iter()
        .filter(|i| in_month(i.created_at))
        .map(|i| i.remaining)
        .sum(),
      total_expenses,
      monthly_expenses,
      total_work_entries: data.sessions.len() as u64,
      monthly_work_entries: data.sessions.iter().filter(|s| in_month(s.created_at)).count() as u64,
      work_status,
      work_revenue,
      monthly_work_revenue,
      total_combined_revenue,
      monthly_combined_revenue,
      total_profit,
      monthly_profit,
      total_pending_payments: pending_invoices.add(pending_sessions),
      today_work,
      total_users,
    })
  }

  pub async fn analytics(
    &self,
    requester: Requester,
    period: ReportPeriod,
    now: DateTime<Utc>,
  ) -> Result<Analytics, AnalyticsError> {
    let scope = requester.scope();
    let start = now - period.lookback();
    let data = self.load(scope, Some(start)).await?;

    let monthly_revenue = monthly_revenue(&data.invoices);
    let monthly_expenses = monthly_expenses(&data.expenses);

    let mut monthly_work_minutes: BTreeMap<String, i64> = BTreeMap::new();
    for session in data
      .sessions
      .iter()
      .filter(|s| s.work_status == WorkStatus::Completed)
    {
      *monthly_work_minutes
        .entry(month_key(session.start_time.date_naive()))
        .or_default() += session.duration_minutes.unwrap_or(0);
    }

    let mut status_breakdown: BTreeMap<String, StatusTotals> = BTreeMap::new();
    for invoice in &data.invoices {
      let entry = status_breakdown
        .entry(invoice.status.as_str().to_string())
        .or_insert(StatusTotals {
          count: 0,
          total: Money::zero(),
        });
      entry.count += 1;
      entry.total = entry.total.add(invoice.total);
    }

    let top_customers = self.top_customers(scope, &data.invoices).await?;

    let total_revenue: Money = monthly_revenue.values().copied().sum();
    let total_expenses: Money = monthly_expenses.values().copied().sum();

    Ok(Analytics {
      period,
      start,
      end: now,
      profit_growth: profit_growth(&monthly_revenue, &monthly_expenses),
      category_expenses: category_totals(&data.expenses),
      monthly_revenue,
      monthly_expenses,
      monthly_work_minutes,
      status_breakdown,
      top_customers,
      total_revenue,
      total_expenses,
      total_profit: total_revenue.amount() - total_expenses.amount(),
    })
  }

  pub async fn chart_data(
    &self,
    requester: Requester,
    kind: ChartKind,
    period: ReportPeriod,
    now: DateTime<Utc>,
  ) -> Result<ChartData, AnalyticsError> {
    let data = self.load(requester.scope(), Some(now - period.lookback())).await?;

    let series: Vec<(String, Decimal)> = match kind {
      ChartKind::Revenue => to_series(monthly_revenue(&data.invoices)),
      ChartKind::Expenses => to_series(monthly_expenses(&data.expenses)),
      ChartKind::CategoryExpenses => to_series(category_totals(&data.expenses)),
      ChartKind::Profit => {
        let revenue = monthly_revenue(&data.invoices);
        let expenses = monthly_expenses(&data.expenses);
        let months: BTreeSet<&String> = revenue.keys().chain(expenses.keys()).collect();
        months
          .into_iter()
          .map(|month| (month.clone(), month_profit(&revenue, &expenses, month)))
          .collect()
      }
    };

    let (labels, data) = series.into_iter().unzip();
    Ok(ChartData {
      label: kind.label(),
      labels,
      data,
    })
  }

  /// Revenue of paid invoices against expenses over an inclusive date range.
  /// Defaults to the last 365 days.
  pub async fn profit_loss(
    &self,
    requester: Requester,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    now: DateTime<Utc>,
  ) -> Result<ProfitLoss, AnalyticsError> {
    let today = now.date_naive();
    let start_date = start_date.unwrap_or(today - Duration::days(365));
    let end_date = end_date.unwrap_or(today);
    if start_date > end_date {
      return Err(AnalyticsError::InvalidRange);
    }

    let scope = requester.scope();
    let from = start_date.and_time(NaiveTime::MIN).and_utc();
    let to = (end_date + Duration::days(1)).and_time(NaiveTime::MIN).and_utc() - Duration::nanoseconds(1);

    let total_revenue: Money = self
      .invoice_repo
      .find_in_scope(scope, Some(from), Some(to))
      .await?
      .iter()
      .filter(|i| i.status == InvoiceStatus::Paid)
      .map(|i| i.total)
      .sum();

    let filter = ExpenseFilter {
      category: None,
      start_date: Some(start_date),
      end_date: Some(end_date),
    };
    let total_expenses: Money = self
      .expense_repo
      .find_matching(scope, &filter)
      .await?
      .iter()
      .map(|e| e.amount)
      .sum();

    let net_profit = total_revenue.amount() - total_expenses.amount();
    let profit_margin = if total_revenue.is_zero() {
      Decimal::ZERO
    } else {
      (net_profit / total_revenue.amount() * Decimal::ONE_HUNDRED).round_dp(2)
    };

    Ok(ProfitLoss {
      start_date,
      end_date,
      total_revenue,
      total_expenses,
      net_profit,
      profit_margin,
    })
  }

  /// Counts and totals of the requester's own records.
  pub async fn export_stats(&self, requester: Requester) -> Result<ExportStats, AnalyticsError> {
    let data = self.load(OwnerScope::Owner(requester.user_id), None).await?;

    let invoices = RecordStats {
      count: data.invoices.len() as u64,
      total: data.invoices.iter().map(|i| i.total).sum(),
    };
    let expenses = RecordStats {
      count: data.expenses.len() as u64,
      total: data.expenses.iter().map(|e| e.amount).sum(),
    };
    let work_sessions = RecordStats {
      count: data.sessions.len() as u64,
      total: data.sessions.iter().map(|s| s.total).sum(),
    };

    let earned: Money = data
      .invoices
      .iter()
      .filter(|i| i.status == InvoiceStatus::Paid)
      .map(|i| i.total)
      .chain(
        data
          .sessions
          .iter()
          .filter(|s| s.payment_status == PaymentState::Paid)
          .map(|s| s.total),
      )
      .sum();

    Ok(ExportStats {
      net_profit: earned.amount() - expenses.total.amount(),
      invoices,
      expenses,
      work_sessions,
    })
  }

  async fn load(
    &self,
    scope: OwnerScope,
    since: Option<DateTime<Utc>>,
  ) -> Result<Dataset, AnalyticsError> {
    let invoices = self.invoice_repo.find_in_scope(scope, since, None).await?;
    let filter = ExpenseFilter {
      category: None,
      start_date: since.map(|s| s.date_naive()),
      end_date: None,
    };
    let expenses = self.expense_repo.find_matching(scope, &filter).await?;
    let sessions = self.session_repo.find_in_scope(scope, since, None).await?;

    Ok(Dataset {
      invoices,
      expenses,
      sessions,
    })
  }

  async fn top_customers(
    &self,
    scope: OwnerScope,
    invoices: &[Invoice],
  ) -> Result<Vec<CustomerTotals>, AnalyticsError> {
    let names: HashMap<Uuid, String> = self
      .customer_repo
      .find_in_scope(scope)
      .await?
      .into_iter()
      .map(|c| (c.id, c.name.into_inner()))
      .collect();

    let mut totals: HashMap<Uuid, (Money, u64)> = HashMap::new();
    for invoice in invoices {
      let entry = totals.entry(invoice.customer_id).or_default();
      entry.0 = entry.0.add(invoice.total);
      entry.1 += 1;
    }

    let mut ranked: Vec<CustomerTotals> = totals
      .into_iter()
      .map(|(customer_id, (total, invoice_count))| CustomerTotals {
        customer_id,
        name: names.get(&customer_id).cloned(),
        total,
        invoice_count,
      })
      .collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total).then(a.name.cmp(&b.name)));
    ranked.truncate(10);
    Ok(ranked)
  }
}

fn month_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
  let first = now.date_naive().with_day(1).unwrap_or(now.date_naive());
  let next = first
    .checked_add_months(chrono::Months::new(1))
    .unwrap_or(first + Duration::days(31));
  (
    first.and_time(NaiveTime::MIN).and_utc(),
    next.and_time(NaiveTime::MIN).and_utc(),
  )
}

fn month_key(date: NaiveDate) -> String {
  date.format("%Y-%m").to_string()
}

fn monthly_revenue(invoices: &[Invoice]) -> BTreeMap<String, Money> {
  let mut months: BTreeMap<String, Money> = BTreeMap::new();
  for invoice in invoices.iter().filter(|i| i.status == InvoiceStatus::Paid) {
    let month = months.entry(month_key(invoice.created_at.date_naive())).or_default();
    *month = month.add(invoice.total);
  }
  months
}

fn monthly_expenses(expenses: &[Expense]) -> BTreeMap<String, Money> {
  let mut months: BTreeMap<String, Money> = BTreeMap::new();
  for expense in expenses {
    let month = months.entry(expense.month_key()).or_default();
    *month = month.add(expense.amount);
  }
  months
}

fn category_totals(expenses: &[Expense]) -> BTreeMap<String, Money> {
  let mut categories: BTreeMap<String, Money> = BTreeMap::new();
  for expense in expenses {
    let category = categories.entry(expense.category.clone()).or_default();
    *category = category.add(expense.amount);
  }
  categories
}

fn month_profit(
  revenue: &BTreeMap<String, Money>,
  expenses: &BTreeMap<String, Money>,
  month: &str,
) -> Decimal {
  let earned = revenue.get(month).copied().unwrap_or_default();
  let spent = expenses.get(month).copied().unwrap_or_default();
  earned.amount() - spent.amount()
}

/// Percentage change of profit between the first and last month with data.
/// Zero unless both series cover at least two months and the first month's
/// profit is non-zero.
fn profit_growth(revenue: &BTreeMap<String, Money>, expenses: &BTreeMap<String, Money>) -> Decimal {
  if revenue.len() < 2 || expenses.len() < 2 {
    return Decimal::ZERO;
  }

  let months: BTreeSet<&String> = revenue.keys().chain(expenses.keys()).collect();
  let (Some(first), Some(last)) = (months.first(), months.last()) else {
    return Decimal::ZERO;
  };

  let first_profit = month_profit(revenue, expenses, first);
  let last_profit = month_profit(revenue, expenses, last);
  if first_profit.is_zero() {
    return Decimal::ZERO;
  }

  ((last_profit - first_profit) / first_profit.abs() * Decimal::ONE_HUNDRED).round_dp(2)
}

fn to_series(map: BTreeMap<String, Money>) -> Vec<(String, Decimal)> {
  map.into_iter().map(|(k, v)| (k, v.amount())).collect()
}
