use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::web;

use crate::application::UseCases;
use crate::infrastructure::config::RateLimitConfig;

use super::handlers::{auth, dashboard, expenses, invoices, system, users, work};
use super::middleware::AuthMiddleware;

/// Mounts the JSON API under `/api/v1`.
///
/// Everything except register, login and logout runs behind
/// `AuthMiddleware`. Static segments such as `/invoices/today` are registered
/// before the `/{id}` routes they would otherwise collide with.
///
/// # Example
///
/// ```no_run
/// use actix_web::App;
/// # use billdesk::application::UseCases;
/// # use billdesk::infrastructure::config::RateLimitConfig;
/// # use billdesk::adapters::http::routes::configure_api_routes;
///
/// # fn example(use_cases: UseCases, rate_limit: RateLimitConfig) {
/// let app = App::new().configure(|cfg| configure_api_routes(cfg, &use_cases, &rate_limit));
/// # }
/// ```
pub fn configure_api_routes(
  cfg: &mut web::ServiceConfig,
  use_cases: &UseCases,
  rate_limit: &RateLimitConfig,
) {
  let protected = || AuthMiddleware::new(use_cases.authenticate.clone());

  cfg.service(
    web::scope("/api/v1")
      .configure(|cfg| configure_auth_routes(cfg, use_cases, rate_limit))
      .service(
        web::scope("/users")
          .wrap(protected())
          .configure(|cfg| configure_user_routes(cfg, use_cases)),
      )
      .service(
        web::scope("/invoices")
          .wrap(protected())
          .configure(|cfg| configure_invoice_routes(cfg, use_cases)),
      )
      .service(
        web::scope("/customers")
          .wrap(protected())
          .app_data(web::Data::new(use_cases.list_customers.clone()))
          .route("", web::get().to(invoices::list_customers_handler)),
      )
      .service(
        web::scope("/work")
          .wrap(protected())
          .configure(|cfg| configure_work_routes(cfg, use_cases)),
      )
      .service(
        web::scope("/expenses")
          .wrap(protected())
          .configure(|cfg| configure_expense_routes(cfg, use_cases)),
      )
      .service(
        web::scope("/dashboard")
          .wrap(protected())
          .configure(|cfg| configure_dashboard_routes(cfg, use_cases)),
      ),
  );
}

/// Unauthenticated health and metrics endpoints
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(system::health_handler))
    .route("/metrics", web::get().to(system::metrics_handler));
}

/// Register and login share a per-peer token bucket.
fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  use_cases: &UseCases,
  rate_limit: &RateLimitConfig,
) {
  cfg
    .app_data(web::Data::new(use_cases.register_user.clone()))
    .app_data(web::Data::new(use_cases.login_user.clone()))
    .app_data(web::Data::new(use_cases.logout_user.clone()))
    .app_data(web::Data::new(use_cases.get_current_user.clone()));

  let governor = GovernorConfigBuilder::default()
    .seconds_per_request(rate_limit.auth_replenish_seconds.max(1))
    .burst_size(rate_limit.auth_burst_size.max(1))
    .finish();

  match governor {
    Some(governor) => {
      cfg
        .service(
          web::resource("/auth/register")
            .wrap(Governor::new(&governor))
            .route(web::post().to(auth::register_handler)),
        )
        .service(
          web::resource("/auth/login")
            .wrap(Governor::new(&governor))
            .route(web::post().to(auth::login_handler)),
        );
    }
    None => {
      tracing::warn!("Rate limit configuration rejected, auth endpoints are unthrottled");
      cfg
        .route("/auth/register", web::post().to(auth::register_handler))
        .route("/auth/login", web::post().to(auth::login_handler));
    }
  }

  cfg
    .route("/auth/logout", web::post().to(auth::logout_handler))
    .service(
      web::resource("/auth/me")
        .wrap(AuthMiddleware::new(use_cases.authenticate.clone()))
        .route(web::get().to(auth::get_current_user_handler)),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig, use_cases: &UseCases) {
  cfg
    .app_data(web::Data::new(use_cases.update_profile.clone()))
    .app_data(web::Data::new(use_cases.list_users.clone()))
    .app_data(web::Data::new(use_cases.create_user.clone()))
    .app_data(web::Data::new(use_cases.toggle_user_active.clone()))
    .app_data(web::Data::new(use_cases.get_notification_preferences.clone()))
    .app_data(web::Data::new(use_cases.update_notification_preferences.clone()))
    .route("", web::get().to(users::list_users_handler))
    .route("", web::post().to(users::create_user_handler))
    .route("/me", web::put().to(users::update_profile_handler))
    .route(
      "/me/notifications",
      web::get().to(users::get_notifications_handler),
    )
    .route(
      "/me/notifications",
      web::put().to(users::update_notifications_handler),
    )
    .route("/{id}/toggle", web::post().to(users::toggle_user_handler));
}

fn configure_invoice_routes(cfg: &mut web::ServiceConfig, use_cases: &UseCases) {
  cfg
    .app_data(web::Data::new(use_cases.create_invoice.clone()))
    .app_data(web::Data::new(use_cases.get_invoice_details.clone()))
    .app_data(web::Data::new(use_cases.list_invoices.clone()))
    .app_data(web::Data::new(use_cases.update_invoice.clone()))
    .app_data(web::Data::new(use_cases.change_invoice_status.clone()))
    .app_data(web::Data::new(use_cases.record_invoice_payment.clone()))
    .app_data(web::Data::new(use_cases.duplicate_invoice.clone()))
    .app_data(web::Data::new(use_cases.delete_invoice.clone()))
    .app_data(web::Data::new(use_cases.send_invoice.clone()))
    .route("", web::post().to(invoices::create_invoice_handler))
    .route("", web::get().to(invoices::list_invoices_handler))
    .route(
      "/today",
      web::get().to(invoices::list_today_invoices_handler),
    )
    .route(
      "/last-week",
      web::get().to(invoices::list_last_week_invoices_handler),
    )
    .route("/{id}", web::get().to(invoices::get_invoice_handler))
    .route("/{id}", web::put().to(invoices::update_invoice_handler))
    .route("/{id}", web::delete().to(invoices::delete_invoice_handler))
    .route("/{id}/status", web::post().to(invoices::change_status_handler))
    .route(
      "/{id}/payment",
      web::post().to(invoices::record_payment_handler),
    )
    .route(
      "/{id}/duplicate",
      web::post().to(invoices::duplicate_invoice_handler),
    )
    .route("/{id}/send", web::post().to(invoices::send_invoice_handler));
}

fn configure_work_routes(cfg: &mut web::ServiceConfig, use_cases: &UseCases) {
  cfg
    .app_data(web::Data::new(use_cases.start_session.clone()))
    .app_data(web::Data::new(use_cases.get_session.clone()))
    .app_data(web::Data::new(use_cases.list_sessions.clone()))
    .app_data(web::Data::new(use_cases.list_projects.clone()))
    .app_data(web::Data::new(use_cases.update_session.clone()))
    .app_data(web::Data::new(use_cases.stop_timer.clone()))
    .app_data(web::Data::new(use_cases.set_work_status.clone()))
    .app_data(web::Data::new(use_cases.record_session_payment.clone()))
    .app_data(web::Data::new(use_cases.get_payment_info.clone()))
    .app_data(web::Data::new(use_cases.delete_session.clone()))
    .app_data(web::Data::new(use_cases.get_active_timer.clone()))
    .app_data(web::Data::new(use_cases.work_report.clone()))
    .route("", web::post().to(work::start_session_handler))
    .route("", web::get().to(work::list_sessions_handler))
    .route("/projects", web::get().to(work::list_projects_handler))
    .route("/timer", web::get().to(work::active_timer_handler))
    .route("/reports", web::get().to(work::work_report_handler))
    .route("/{id}", web::get().to(work::get_session_handler))
    .route("/{id}", web::put().to(work::update_session_handler))
    .route("/{id}", web::delete().to(work::delete_session_handler))
    .route("/{id}/stop", web::post().to(work::stop_timer_handler))
    .route("/{id}/status", web::post().to(work::set_work_status_handler))
    .route(
      "/{id}/payment",
      web::post().to(work::record_session_payment_handler),
    )
    .route("/{id}/payment", web::get().to(work::payment_info_handler));
}

fn configure_expense_routes(cfg: &mut web::ServiceConfig, use_cases: &UseCases) {
  cfg
    .app_data(web::Data::new(use_cases.create_expense.clone()))
    .app_data(web::Data::new(use_cases.get_expense.clone()))
    .app_data(web::Data::new(use_cases.list_expenses.clone()))
    .app_data(web::Data::new(use_cases.update_expense.clone()))
    .app_data(web::Data::new(use_cases.delete_expense.clone()))
    .app_data(web::Data::new(use_cases.list_expense_categories.clone()))
    .app_data(web::Data::new(use_cases.list_configured_categories.clone()))
    .app_data(web::Data::new(use_cases.expense_report.clone()))
    .route("", web::post().to(expenses::create_expense_handler))
    .route("", web::get().to(expenses::list_expenses_handler))
    .route(
      "/categories",
      web::get().to(expenses::list_categories_handler),
    )
    .route(
      "/admin/categories",
      web::get().to(expenses::list_configured_categories_handler),
    )
    .route("/reports", web::get().to(expenses::expense_report_handler))
    .route("/{id}", web::get().to(expenses::get_expense_handler))
    .route("/{id}", web::put().to(expenses::update_expense_handler))
    .route("/{id}", web::delete().to(expenses::delete_expense_handler));
}

fn configure_dashboard_routes(cfg: &mut web::ServiceConfig, use_cases: &UseCases) {
  cfg
    .app_data(web::Data::new(use_cases.dashboard_summary.clone()))
    .app_data(web::Data::new(use_cases.analytics.clone()))
    .app_data(web::Data::new(use_cases.chart_data.clone()))
    .app_data(web::Data::new(use_cases.profit_loss.clone()))
    .app_data(web::Data::new(use_cases.export_stats.clone()))
    .route("", web::get().to(dashboard::dashboard_summary_handler))
    .route("/analytics", web::get().to(dashboard::analytics_handler))
    .route("/chart-data", web::get().to(dashboard::chart_data_handler))
    .route("/profit-loss", web::get().to(dashboard::profit_loss_handler))
    .route("/export-stats", web::get().to(dashboard::export_stats_handler));
}
