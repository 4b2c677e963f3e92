//! Application layer
//!
//! This layer contains use cases that orchestrate domain logic to implement
//! application-specific workflows. Each use case wraps one domain service
//! operation and shapes its input and output for the adapters.

pub mod analytics;
pub mod auth;
pub mod expense;
pub mod invoice;
pub mod notification;
pub mod work;

use std::sync::Arc;

use crate::domain::analytics::AnalyticsService;
use crate::domain::auth::AuthService;
use crate::domain::expense::ExpenseService;
use crate::domain::invoice::InvoiceService;
use crate::domain::notification::NotificationService;
use crate::domain::work::WorkService;

use self::analytics::{
  AnalyticsUseCase, ChartDataUseCase, DashboardSummaryUseCase, ExportStatsUseCase,
  ProfitLossUseCase,
};
use self::auth::{
  AuthenticateUseCase, CreateUserUseCase, GetCurrentUserUseCase, ListUsersUseCase,
  LoginUserUseCase, LogoutUserUseCase, RegisterUserUseCase, ToggleUserActiveUseCase,
  UpdateProfileUseCase,
};
use self::expense::{
  CreateExpenseUseCase, DeleteExpenseUseCase, ExpenseReportUseCase, GetExpenseUseCase,
  ListConfiguredCategoriesUseCase, ListExpenseCategoriesUseCase, ListExpensesUseCase,
  UpdateExpenseUseCase,
};
use self::invoice::{
  ChangeInvoiceStatusUseCase, CreateInvoiceUseCase, DeleteInvoiceUseCase,
  DuplicateInvoiceUseCase, GetInvoiceDetailsUseCase, ListCustomersUseCase, ListInvoicesUseCase,
  RecordInvoicePaymentUseCase, SendInvoiceUseCase, UpdateInvoiceUseCase,
};
use self::notification::{
  GetNotificationPreferencesUseCase, UpdateNotificationPreferencesUseCase,
};
use self::work::{
  DeleteSessionUseCase, GetActiveTimerUseCase, GetPaymentInfoUseCase, GetSessionUseCase,
  ListProjectsUseCase, ListSessionsUseCase, RecordSessionPaymentUseCase, SetWorkStatusUseCase,
  StartSessionUseCase, StopTimerUseCase, UpdateSessionUseCase, WorkReportUseCase,
};

/// Domain services the use cases are built from
#[derive(Clone)]
pub struct DomainServices {
  pub auth: Arc<AuthService>,
  pub notification: Arc<NotificationService>,
  pub invoice: Arc<InvoiceService>,
  pub work: Arc<WorkService>,
  pub expense: Arc<ExpenseService>,
  pub analytics: Arc<AnalyticsService>,
}

/// Every use case the HTTP adapter exposes, shared across server workers
#[derive(Clone)]
pub struct UseCases {
  // Auth and users
  pub register_user: Arc<RegisterUserUseCase>,
  pub login_user: Arc<LoginUserUseCase>,
  pub logout_user: Arc<LogoutUserUseCase>,
  pub authenticate: Arc<AuthenticateUseCase>,
  pub get_current_user: Arc<GetCurrentUserUseCase>,
  pub update_profile: Arc<UpdateProfileUseCase>,
  pub create_user: Arc<CreateUserUseCase>,
  pub list_users: Arc<ListUsersUseCase>,
  pub toggle_user_active: Arc<ToggleUserActiveUseCase>,

  // Notifications
  pub get_notification_preferences: Arc<GetNotificationPreferencesUseCase>,
  pub update_notification_preferences: Arc<UpdateNotificationPreferencesUseCase>,

  // Invoices and customers
  pub create_invoice: Arc<CreateInvoiceUseCase>,
  pub get_invoice_details: Arc<GetInvoiceDetailsUseCase>,
  pub list_invoices: Arc<ListInvoicesUseCase>,
  pub update_invoice: Arc<UpdateInvoiceUseCase>,
  pub change_invoice_status: Arc<ChangeInvoiceStatusUseCase>,
  pub record_invoice_payment: Arc<RecordInvoicePaymentUseCase>,
  pub duplicate_invoice: Arc<DuplicateInvoiceUseCase>,
  pub delete_invoice: Arc<DeleteInvoiceUseCase>,
  pub send_invoice: Arc<SendInvoiceUseCase>,
  pub list_customers: Arc<ListCustomersUseCase>,

  // Work sessions
  pub start_session: Arc<StartSessionUseCase>,
  pub get_session: Arc<GetSessionUseCase>,
  pub list_sessions: Arc<ListSessionsUseCase>,
  pub list_projects: Arc<ListProjectsUseCase>,
  pub update_session: Arc<UpdateSessionUseCase>,
  pub stop_timer: Arc<StopTimerUseCase>,
  pub set_work_status: Arc<SetWorkStatusUseCase>,
  pub record_session_payment: Arc<RecordSessionPaymentUseCase>,
  pub get_payment_info: Arc<GetPaymentInfoUseCase>,
  pub delete_session: Arc<DeleteSessionUseCase>,
  pub get_active_timer: Arc<GetActiveTimerUseCase>,
  pub work_report: Arc<WorkReportUseCase>,

  // Expenses
  pub create_expense: Arc<CreateExpenseUseCase>,
  pub get_expense: Arc<GetExpenseUseCase>,
  pub list_expenses: Arc<ListExpensesUseCase>,
  pub update_expense: Arc<UpdateExpenseUseCase>,
  pub delete_expense: Arc<DeleteExpenseUseCase>,
  pub list_expense_categories: Arc<ListExpenseCategoriesUseCase>,
  pub list_configured_categories: Arc<ListConfiguredCategoriesUseCase>,
  pub expense_report: Arc<ExpenseReportUseCase>,

  // Dashboard
  pub dashboard_summary: Arc<DashboardSummaryUseCase>,
  pub analytics: Arc<AnalyticsUseCase>,
  pub chart_data: Arc<ChartDataUseCase>,
  pub profit_loss: Arc<ProfitLossUseCase>,
  pub export_stats: Arc<ExportStatsUseCase>,
}

impl UseCases {
  pub fn new(services: &DomainServices) -> Self {
    let auth = &services.auth;
    let notification = &services.notification;
    let invoice = &services.invoice;
    let work = &services.work;
    let expense = &services.expense;
    let analytics = &services.analytics;

    Self {
      register_user: Arc::new(RegisterUserUseCase::new(auth.clone())),
      login_user: Arc::new(LoginUserUseCase::new(auth.clone())),
      logout_user: Arc::new(LogoutUserUseCase::new(auth.clone())),
      authenticate: Arc::new(AuthenticateUseCase::new(auth.clone())),
      get_current_user: Arc::new(GetCurrentUserUseCase::new(auth.clone())),
      update_profile: Arc::new(UpdateProfileUseCase::new(auth.clone())),
      create_user: Arc::new(CreateUserUseCase::new(auth.clone())),
      list_users: Arc::new(ListUsersUseCase::new(auth.clone())),
      toggle_user_active: Arc::new(ToggleUserActiveUseCase::new(auth.clone())),

      get_notification_preferences: Arc::new(GetNotificationPreferencesUseCase::new(
        notification.clone(),
      )),
      update_notification_preferences: Arc::new(UpdateNotificationPreferencesUseCase::new(
        notification.clone(),
      )),

      create_invoice: Arc::new(CreateInvoiceUseCase::new(invoice.clone())),
      get_invoice_details: Arc::new(GetInvoiceDetailsUseCase::new(invoice.clone())),
      list_invoices: Arc::new(ListInvoicesUseCase::new(invoice.clone())),
      update_invoice: Arc::new(UpdateInvoiceUseCase::new(invoice.clone())),
      change_invoice_status: Arc::new(ChangeInvoiceStatusUseCase::new(invoice.clone())),
      record_invoice_payment: Arc::new(RecordInvoicePaymentUseCase::new(invoice.clone())),
      duplicate_invoice: Arc::new(DuplicateInvoiceUseCase::new(invoice.clone())),
      delete_invoice: Arc::new(DeleteInvoiceUseCase::new(invoice.clone())),
      send_invoice: Arc::new(SendInvoiceUseCase::new(invoice.clone())),
      list_customers: Arc::new(ListCustomersUseCase::new(invoice.clone())),

      start_session: Arc::new(StartSessionUseCase::new(work.clone())),
      get_session: Arc::new(GetSessionUseCase::new(work.clone())),
      list_sessions: Arc::new(ListSessionsUseCase::new(work.clone())),
      list_projects: Arc::new(ListProjectsUseCase::new(work.clone())),
      update_session: Arc::new(UpdateSessionUseCase::new(work.clone())),
      stop_timer: Arc::new(StopTimerUseCase::new(work.clone())),
      set_work_status: Arc::new(SetWorkStatusUseCase::new(work.clone())),
      record_session_payment: Arc::new(RecordSessionPaymentUseCase::new(work.clone())),
      get_payment_info: Arc::new(GetPaymentInfoUseCase::new(work.clone())),
      delete_session: Arc::new(DeleteSessionUseCase::new(work.clone())),
      get_active_timer: Arc::new(GetActiveTimerUseCase::new(work.clone())),
      work_report: Arc::new(WorkReportUseCase::new(work.clone())),

      create_expense: Arc::new(CreateExpenseUseCase::new(expense.clone())),
      get_expense: Arc::new(GetExpenseUseCase::new(expense.clone())),
      list_expenses: Arc::new(ListExpensesUseCase::new(expense.clone())),
      update_expense: Arc::new(UpdateExpenseUseCase::new(expense.clone())),
      delete_expense: Arc::new(DeleteExpenseUseCase::new(expense.clone())),
      list_expense_categories: Arc::new(ListExpenseCategoriesUseCase::new(expense.clone())),
      list_configured_categories: Arc::new(ListConfiguredCategoriesUseCase::new(expense.clone())),
      expense_report: Arc::new(ExpenseReportUseCase::new(expense.clone())),

      dashboard_summary: Arc::new(DashboardSummaryUseCase::new(analytics.clone())),
      analytics: Arc::new(AnalyticsUseCase::new(analytics.clone())),
      chart_data: Arc::new(ChartDataUseCase::new(analytics.clone())),
      profit_loss: Arc::new(ProfitLossUseCase::new(analytics.clone())),
      export_stats: Arc::new(ExportStatsUseCase::new(analytics.clone())),
    }
  }
}
