//! Assembles repositories, domain services and use cases for the server and
//! the HTTP integration tests.

use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{DomainServices, UseCases};
use crate::domain::analytics::AnalyticsService;
use crate::domain::auth::{
  AuthError, AuthService, AuthServiceConfig, Email, Password, SessionRepository, UserRepository,
  Username,
};
use crate::domain::expense::{ExpenseCategoryRepository, ExpenseRepository, ExpenseService};
use crate::domain::invoice::{CustomerRepository, InvoiceRepository, InvoiceService};
use crate::domain::notification::{NotificationPreferencesRepository, NotificationService};
use crate::domain::work::{WorkService, WorkSessionRepository};

use super::config::{BootstrapAdminConfig, Config};
use super::dispatch::{JsonDocumentRenderer, LoggingEmailSender, LoggingWhatsAppSender};
use super::persistence::memory::{
  InMemoryCustomerRepository, InMemoryExpenseCategoryRepository, InMemoryExpenseRepository,
  InMemoryInvoiceRepository, InMemoryNotificationPreferencesRepository,
  InMemorySessionRepository, InMemoryUserRepository, InMemoryWorkSessionRepository,
};
use super::persistence::postgres::{
  PostgresCustomerRepository, PostgresExpenseCategoryRepository, PostgresExpenseRepository,
  PostgresInvoiceRepository, PostgresNotificationPreferencesRepository,
  PostgresSessionRepository, PostgresUserRepository, PostgresWorkSessionRepository,
};
use super::security::{Argon2PasswordHasher, SecureTokenGenerator};

/// One implementation of every repository port
#[derive(Clone)]
pub struct Repositories {
  pub users: Arc<dyn UserRepository>,
  pub sessions: Arc<dyn SessionRepository>,
  pub customers: Arc<dyn CustomerRepository>,
  pub invoices: Arc<dyn InvoiceRepository>,
  pub work_sessions: Arc<dyn WorkSessionRepository>,
  pub expenses: Arc<dyn ExpenseRepository>,
  pub expense_categories: Arc<dyn ExpenseCategoryRepository>,
  pub notification_preferences: Arc<dyn NotificationPreferencesRepository>,
}

impl Repositories {
  pub fn in_memory() -> Self {
    let customers = Arc::new(InMemoryCustomerRepository::new());
    Self {
      users: Arc::new(InMemoryUserRepository::new()),
      sessions: Arc::new(InMemorySessionRepository::new()),
      invoices: Arc::new(InMemoryInvoiceRepository::new(customers.clone())),
      customers,
      work_sessions: Arc::new(InMemoryWorkSessionRepository::new()),
      expenses: Arc::new(InMemoryExpenseRepository::new()),
      expense_categories: Arc::new(InMemoryExpenseCategoryRepository::with_defaults()),
      notification_preferences: Arc::new(InMemoryNotificationPreferencesRepository::new()),
    }
  }

  pub fn postgres(pool: PgPool) -> Self {
    Self {
      users: Arc::new(PostgresUserRepository::new(pool.clone())),
      sessions: Arc::new(PostgresSessionRepository::new(pool.clone())),
      customers: Arc::new(PostgresCustomerRepository::new(pool.clone())),
      invoices: Arc::new(PostgresInvoiceRepository::new(pool.clone())),
      work_sessions: Arc::new(PostgresWorkSessionRepository::new(pool.clone())),
      expenses: Arc::new(PostgresExpenseRepository::new(pool.clone())),
      expense_categories: Arc::new(PostgresExpenseCategoryRepository::new(pool.clone())),
      notification_preferences: Arc::new(PostgresNotificationPreferencesRepository::new(pool)),
    }
  }
}

/// Builds the domain services over `repos`.
pub fn build_services(repos: &Repositories, config: &Config) -> Result<DomainServices, AuthError> {
  let auth_config = AuthServiceConfig {
    session_ttl_seconds: config.security.session_ttl_seconds as i64,
    remember_me_ttl_seconds: config.security.remember_me_ttl_seconds as i64,
  };

  let auth = Arc::new(AuthService::new(
    repos.users.clone(),
    repos.sessions.clone(),
    Arc::new(Argon2PasswordHasher::new()?),
    Arc::new(SecureTokenGenerator::new()),
    auth_config,
  ));

  let invoice = Arc::new(InvoiceService::new(
    repos.invoices.clone(),
    repos.customers.clone(),
    Arc::new(JsonDocumentRenderer::new(
      PathBuf::from(&config.dispatch.output_dir),
      config.billing.currency_symbol.clone(),
    )),
    Arc::new(LoggingEmailSender::new(config.dispatch.email_enabled)),
    Arc::new(LoggingWhatsAppSender::new(config.dispatch.whatsapp_enabled)),
  ));

  let analytics = Arc::new(AnalyticsService::new(
    repos.invoices.clone(),
    repos.customers.clone(),
    repos.expenses.clone(),
    repos.work_sessions.clone(),
    repos.users.clone(),
  ));

  Ok(DomainServices {
    auth,
    notification: Arc::new(NotificationService::new(
      repos.notification_preferences.clone(),
    )),
    invoice,
    work: Arc::new(WorkService::new(repos.work_sessions.clone())),
    expense: Arc::new(ExpenseService::new(
      repos.expenses.clone(),
      repos.expense_categories.clone(),
    )),
    analytics,
  })
}

/// Creates the configured administrator unless an account with that email exists.
pub async fn bootstrap_admin(
  auth: &AuthService,
  admin: &BootstrapAdminConfig,
) -> Result<(), AuthError> {
  let created = auth
    .ensure_admin(
      Username::new(admin.username.clone())?,
      Email::new(admin.email.clone())?,
      Password::new(admin.password.clone())?,
    )
    .await?;

  if created {
    tracing::info!(email = %admin.email, "Bootstrap administrator created");
  } else {
    tracing::debug!(email = %admin.email, "Bootstrap administrator already present");
  }
  Ok(())
}

/// Services and use cases over `repos`, with the bootstrap admin in place.
pub async fn build_use_cases(repos: &Repositories, config: &Config) -> Result<UseCases, AuthError> {
  let services = build_services(repos, config)?;
  if let Some(admin) = &config.bootstrap_admin {
    bootstrap_admin(&services.auth, admin).await?;
  }
  Ok(UseCases::new(&services))
}
