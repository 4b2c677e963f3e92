//! End-to-end HTTP tests over the in-memory repositories.

use actix_web::{App, http::StatusCode, test, web};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::net::SocketAddr;

use billdesk::{
  adapters::http::{configure_api_routes, configure_system_routes},
  application::UseCases,
  infrastructure::{
    config::Config,
    wiring::{Repositories, build_use_cases},
  },
};

const CONFIG: &str = r#"
  [server]
  host = "127.0.0.1"
  port = 0

  [database]
  url = "postgres://unused"
  max_connections = 1

  [security]
  session_ttl_seconds = 3600
  remember_me_ttl_seconds = 7200

  [dispatch]
  output_dir = "target/test-invoices"

  [bootstrap_admin]
  username = "admin"
  email = "admin@example.com"
  password = "admin-password"
"#;

async fn setup() -> (UseCases, Config) {
  let config: Config = toml::from_str(CONFIG).unwrap();
  let use_cases = build_use_cases(&Repositories::in_memory(), &config)
    .await
    .unwrap();
  (use_cases, config)
}

macro_rules! init_app {
  ($use_cases:expr, $config:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new($config.billing.clone()))
        .configure(configure_system_routes)
        .configure(|cfg| configure_api_routes(cfg, &$use_cases, &$config.rate_limit)),
    )
    .await
  };
}

fn peer() -> SocketAddr {
  "127.0.0.1:40000".parse().unwrap()
}

fn money(value: &Value) -> Decimal {
  value.as_str().unwrap().parse().unwrap()
}

fn bearer(token: &str) -> (&'static str, String) {
  ("Authorization", format!("Bearer {}", token))
}

#[actix_web::test]
async fn test_health_and_metrics_are_public() {
  let (use_cases, config) = setup().await;
  let app = init_app!(use_cases, config);

  let req = test::TestRequest::get().uri("/health").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["status"], "ok");

  let req = test::TestRequest::get().uri("/metrics").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_protected_routes_require_a_session() {
  let (use_cases, config) = setup().await;
  let app = init_app!(use_cases, config);

  let req = test::TestRequest::get().uri("/api/v1/invoices").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::get()
    .uri("/api/v1/work")
    .insert_header(bearer("not-a-real-token"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_register_login_and_logout() {
  let (use_cases, config) = setup().await;
  let app = init_app!(use_cases, config);

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/register")
    .peer_addr(peer())
    .set_json(json!({
      "username": "asha",
      "email": "Asha@Example.com",
      "password": "correct-horse"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["user"]["email"], "asha@example.com");
  assert_eq!(body["user"]["role"], "user");

  // Same email again
  let req = test::TestRequest::post()
    .uri("/api/v1/auth/register")
    .peer_addr(peer())
    .set_json(json!({
      "username": "asha2",
      "email": "asha@example.com",
      "password": "correct-horse"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/login")
    .peer_addr(peer())
    .set_json(json!({ "email": "asha@example.com", "password": "wrong-password" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/login")
    .peer_addr(peer())
    .set_json(json!({ "email": "asha@example.com", "password": "correct-horse" }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  let token = body["session_token"].as_str().unwrap().to_string();

  let req = test::TestRequest::get()
    .uri("/api/v1/auth/me")
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["username"], "asha");

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/logout")
    .insert_header(bearer(&token))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let req = test::TestRequest::get()
    .uri("/api/v1/auth/me")
    .insert_header(bearer(&token))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

/// Registers `$username` and yields its session token
macro_rules! register {
  ($app:expr, $username:expr) => {{
    let req = test::TestRequest::post()
      .uri("/api/v1/auth/register")
      .peer_addr(peer())
      .set_json(json!({
        "username": $username,
        "email": format!("{}@example.com", $username),
        "password": "correct-horse"
      }))
      .to_request();
    let body: Value = test::call_and_read_body_json(&$app, req).await;
    body["session_token"].as_str().unwrap().to_string()
  }};
}

#[actix_web::test]
async fn test_invoice_payment_flow() {
  let (use_cases, config) = setup().await;
  let app = init_app!(use_cases, config);
  let token = register!(app, "ravi");

  let req = test::TestRequest::post()
    .uri("/api/v1/invoices")
    .insert_header(bearer(&token))
    .set_json(json!({
      "customer_name": "Meera",
      "customer_contact": "9876543210",
      "advance_amount": "200",
      "items": [
        { "description": "Passport application", "quantity": 2, "rate": "500" },
        { "description": "", "quantity": 1, "rate": "99" },
        { "description": "Courier", "quantity": "x", "rate": "50" }
      ]
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let invoice: Value = test::read_body_json(resp).await;
  let id = invoice["id"].as_str().unwrap().to_string();

  assert_eq!(invoice["line_items"].as_array().unwrap().len(), 1);
  assert_eq!(money(&invoice["total"]), Decimal::from(1000));
  assert_eq!(money(&invoice["remaining"]), Decimal::from(800));
  assert_eq!(invoice["status"], "draft");
  assert_eq!(invoice["customer"]["name"], "Meera");

  // Larger than the remaining balance
  let req = test::TestRequest::post()
    .uri(&format!("/api/v1/invoices/{}/payment", id))
    .insert_header(bearer(&token))
    .set_json(json!({ "amount": "900" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let req = test::TestRequest::post()
    .uri(&format!("/api/v1/invoices/{}/payment", id))
    .insert_header(bearer(&token))
    .set_json(json!({ "amount": "300" }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["payment_state"], "partial");
  assert_eq!(money(&body["remaining"]), Decimal::from(500));

  let req = test::TestRequest::post()
    .uri(&format!("/api/v1/invoices/{}/payment", id))
    .insert_header(bearer(&token))
    .set_json(json!({ "amount": "500" }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["payment_state"], "paid");
  assert_eq!(body["status"], "paid");

  let req = test::TestRequest::delete()
    .uri(&format!("/api/v1/invoices/{}", id))
    .insert_header(bearer(&token))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);

  let req = test::TestRequest::get()
    .uri("/api/v1/invoices/today")
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["total"], 1);
}

#[actix_web::test]
async fn test_invoice_form_submission_and_isolation() {
  let (use_cases, config) = setup().await;
  let app = init_app!(use_cases, config);
  let owner = register!(app, "kiran");
  let stranger = register!(app, "lata");

  let req = test::TestRequest::post()
    .uri("/api/v1/invoices")
    .insert_header(bearer(&owner))
    .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
    .set_payload(
      "customer_name=Anil&items%5B2%5D%5Bdescription%5D=Visa&items%5B2%5D%5Bquantity%5D=1\
       &items%5B2%5D%5Brate%5D=2500",
    )
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let invoice: Value = test::read_body_json(resp).await;
  let id = invoice["id"].as_str().unwrap().to_string();
  assert_eq!(money(&invoice["total"]), Decimal::from(2500));

  let req = test::TestRequest::get()
    .uri(&format!("/api/v1/invoices/{}", id))
    .insert_header(bearer(&stranger))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::get()
    .uri("/api/v1/customers")
    .insert_header(bearer(&stranger))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert!(body.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_work_session_timer_and_payment() {
  let (use_cases, config) = setup().await;
  let app = init_app!(use_cases, config);
  let token = register!(app, "nisha");

  let req = test::TestRequest::post()
    .uri("/api/v1/work")
    .insert_header(bearer(&token))
    .set_json(json!({
      "customer_name": "Gopal",
      "customer_phone": "9000000000",
      "service_type": "Form filling",
      "project_name": "Passport",
      "hourly_rate": "400",
      "advance_paid": "100"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let session: Value = test::read_body_json(resp).await;
  let id = session["id"].as_str().unwrap().to_string();
  assert_eq!(session["work_status"], "in_progress");

  let req = test::TestRequest::get()
    .uri("/api/v1/work/timer")
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["id"], id.as_str());

  let req = test::TestRequest::post()
    .uri(&format!("/api/v1/work/{}/stop", id))
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["work_status"], "completed");
  assert_eq!(money(&body["total"]), Decimal::from(400));
  assert_eq!(money(&body["remaining"]), Decimal::from(300));

  let req = test::TestRequest::post()
    .uri(&format!("/api/v1/work/{}/stop", id))
    .insert_header(bearer(&token))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);

  let req = test::TestRequest::post()
    .uri(&format!("/api/v1/work/{}/payment", id))
    .insert_header(bearer(&token))
    .set_json(json!({ "amount": "300" }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["payment_status"], "paid");

  let req = test::TestRequest::get()
    .uri("/api/v1/work/timer")
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert!(body.is_null());

  let req = test::TestRequest::get()
    .uri("/api/v1/work/projects")
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body, json!(["Passport"]));
}

#[actix_web::test]
async fn test_admin_only_endpoints() {
  let (use_cases, config) = setup().await;
  let app = init_app!(use_cases, config);
  let user = register!(app, "sunil");

  let req = test::TestRequest::get()
    .uri("/api/v1/users")
    .insert_header(bearer(&user))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/login")
    .peer_addr(peer())
    .set_json(json!({ "email": "admin@example.com", "password": "admin-password" }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  let admin = body["session_token"].as_str().unwrap().to_string();

  let req = test::TestRequest::get()
    .uri("/api/v1/users")
    .insert_header(bearer(&admin))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body.as_array().unwrap().len(), 2);

  let req = test::TestRequest::get()
    .uri("/api/v1/expenses/admin/categories")
    .insert_header(bearer(&admin))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_expenses_feed_the_dashboard() {
  let (use_cases, config) = setup().await;
  let app = init_app!(use_cases, config);
  let token = register!(app, "vani");

  let req = test::TestRequest::post()
    .uri("/api/v1/expenses")
    .insert_header(bearer(&token))
    .set_json(json!({
      "title": "Printer ink",
      "amount": "450",
      "category": "Office Supplies",
      "date": "2026-03-02"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let req = test::TestRequest::get()
    .uri("/api/v1/expenses?category=&page=")
    .insert_header(bearer(&token))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let req = test::TestRequest::get()
    .uri("/api/v1/dashboard/profit-loss?start_date=2026-03-01&end_date=2026-03-31")
    .insert_header(bearer(&token))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let req = test::TestRequest::get()
    .uri("/api/v1/dashboard/chart-data?type=bogus")
    .insert_header(bearer(&token))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_login_is_throttled_per_peer() {
  let (use_cases, mut config) = setup().await;
  config.rate_limit.auth_burst_size = 2;
  config.rate_limit.auth_replenish_seconds = 60;
  let app = init_app!(use_cases, config);

  let mut statuses = Vec::new();
  for _ in 0..3 {
    let req = test::TestRequest::post()
      .uri("/api/v1/auth/login")
      .peer_addr(peer())
      .set_json(json!({ "email": "admin@example.com", "password": "wrong-password" }))
      .to_request();
    // The limiter rejects with an error rather than a response
    let status = match test::try_call_service(&app, req).await {
      Ok(resp) => resp.status(),
      Err(err) => err.error_response().status(),
    };
    statuses.push(status);
  }

  assert_eq!(
    statuses,
    vec![
      StatusCode::UNAUTHORIZED,
      StatusCode::UNAUTHORIZED,
      StatusCode::TOO_MANY_REQUESTS
    ]
  );

  // Another client still gets through
  let req = test::TestRequest::post()
    .uri("/api/v1/auth/login")
    .peer_addr("127.0.0.2:40000".parse().unwrap())
    .set_json(json!({ "email": "admin@example.com", "password": "wrong-password" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
