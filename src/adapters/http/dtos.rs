use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::domain::invoice::LineItemCandidate;
use crate::domain::notification::{EmailNotifications, WhatsAppNotifications};

use super::errors::ApiError;

/// Treats a missing or blank value as `None` and parses anything else.
/// Query strings and form bodies send empty filters as `key=`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: FromStr,
  T::Err: fmt::Display,
{
  let raw = Option::<String>::deserialize(deserializer)?;
  match raw.as_deref().map(str::trim) {
    None | Some("") => Ok(None),
    Some(value) => value.parse().map(Some).map_err(de::Error::custom),
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
  Text(String),
  Number(serde_json::Number),
}

/// Line item fields arrive as text from forms and as numbers from most JSON
/// clients; both are kept as text for the tolerant row parser.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(
    Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
      TextOrNumber::Text(text) => text,
      TextOrNumber::Number(number) => number.to_string(),
    }),
  )
}

fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ApiError> {
  let value = value.trim();
  NaiveTime::parse_from_str(value, "%H:%M:%S")
    .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
    .map_err(|_| ApiError::Validation(format!("Invalid time for {}: {}", field, value)))
}

// ============================================================================
// Auth and users
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(length(
    min = 3,
    max = 80,
    message = "Username must be between 3 and 80 characters"
  ))]
  pub username: String,

  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub password: String,

  #[serde(default)]
  pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,

  /// Whether to create a long-lived session
  #[serde(default)]
  pub remember_me: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
  #[validate(length(
    min = 3,
    max = 80,
    message = "Username must be between 3 and 80 characters"
  ))]
  pub username: String,

  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[serde(default)]
  pub phone: Option<String>,

  #[serde(default)]
  pub current_password: Option<String>,

  #[serde(default)]
  pub new_password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
  #[validate(length(
    min = 3,
    max = 80,
    message = "Username must be between 3 and 80 characters"
  ))]
  pub username: String,

  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub password: String,

  /// `admin` or `user`
  #[serde(default = "default_role")]
  pub role: String,

  #[serde(default)]
  pub phone: Option<String>,
}

fn default_role() -> String {
  "user".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationPreferencesRequest {
  #[serde(default)]
  pub email: EmailNotifications,
  #[serde(default)]
  pub whatsapp: WhatsAppNotifications,
  pub quiet_hours_start: String,
  pub quiet_hours_end: String,
  pub weekly_report_day: String,
  pub report_time: String,
}

impl NotificationPreferencesRequest {
  /// Quiet hours start, quiet hours end and report time
  pub fn times(&self) -> Result<(NaiveTime, NaiveTime, NaiveTime), ApiError> {
    Ok((
      parse_time("quiet_hours_start", &self.quiet_hours_start)?,
      parse_time("quiet_hours_end", &self.quiet_hours_end)?,
      parse_time("report_time", &self.report_time)?,
    ))
  }
}

// ============================================================================
// Invoices
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItemRequest {
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default, deserialize_with = "text_or_number")]
  pub quantity: Option<String>,
  #[serde(default, deserialize_with = "text_or_number")]
  pub rate: Option<String>,
}

impl From<LineItemRequest> for LineItemCandidate {
  fn from(item: LineItemRequest) -> Self {
    LineItemCandidate {
      description: item.description,
      quantity: item.quantity,
      rate: item.rate,
    }
  }
}

/// Invoice body for create and update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct InvoiceRequest {
  #[validate(length(
    min = 1,
    max = 100,
    message = "Customer name must be between 1 and 100 characters"
  ))]
  pub customer_name: String,

  #[serde(default, deserialize_with = "empty_as_none")]
  #[validate(email(message = "Invalid customer email"))]
  pub customer_email: Option<String>,

  #[serde(default, deserialize_with = "empty_as_none")]
  pub customer_contact: Option<String>,

  #[serde(default, deserialize_with = "empty_as_none")]
  pub customer_address: Option<String>,

  /// Ignored on update
  #[serde(default, alias = "advance_amount")]
  pub advance_paid: Decimal,

  #[serde(default)]
  pub items: Vec<LineItemRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceListQuery {
  #[serde(default, deserialize_with = "empty_as_none")]
  pub status: Option<String>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub search: Option<String>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub start_date: Option<NaiveDate>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub end_date: Option<NaiveDate>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub page: Option<u32>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusRequest {
  pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
  pub amount: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendInvoiceRequest {
  #[serde(default)]
  pub email: bool,
  #[serde(default)]
  pub whatsapp: bool,
}

// ============================================================================
// Work sessions
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SessionRequest {
  #[validate(length(
    min = 1,
    max = 100,
    message = "Customer name must be between 1 and 100 characters"
  ))]
  pub customer_name: String,

  #[validate(length(max = 20, message = "Customer phone is too long"))]
  #[serde(default)]
  pub customer_phone: String,

  #[validate(length(min = 1, max = 100, message = "Service type is required"))]
  pub service_type: String,

  #[serde(default)]
  pub project_name: String,

  #[serde(default, deserialize_with = "empty_as_none")]
  pub task_description: Option<String>,

  pub hourly_rate: Decimal,

  #[serde(default, alias = "advance_amount")]
  pub advance_paid: Decimal,

  #[serde(default, deserialize_with = "empty_as_none")]
  pub work_status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionListQuery {
  #[serde(default, deserialize_with = "empty_as_none")]
  pub status: Option<String>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub project: Option<String>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub page: Option<u32>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkReportQuery {
  #[serde(default, deserialize_with = "empty_as_none")]
  pub start_date: Option<NaiveDate>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub end_date: Option<NaiveDate>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub project: Option<String>,
}

// ============================================================================
// Expenses
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExpenseRequest {
  #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
  pub title: String,

  #[serde(default, deserialize_with = "empty_as_none")]
  pub description: Option<String>,

  pub amount: Decimal,

  #[validate(length(
    min = 1,
    max = 50,
    message = "Category must be between 1 and 50 characters"
  ))]
  pub category: String,

  pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseListQuery {
  #[serde(default, deserialize_with = "empty_as_none")]
  pub category: Option<String>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub start_date: Option<NaiveDate>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub end_date: Option<NaiveDate>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub page: Option<u32>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub per_page: Option<u32>,
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PeriodQuery {
  #[serde(default)]
  pub period: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartQuery {
  #[serde(rename = "type", default = "default_chart")]
  pub chart: String,
  #[serde(default)]
  pub period: Option<String>,
}

fn default_chart() -> String {
  "revenue".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateRangeQuery {
  #[serde(default, deserialize_with = "empty_as_none")]
  pub start_date: Option<NaiveDate>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub end_date: Option<NaiveDate>,
}

// ============================================================================
// Shared responses
// ============================================================================

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,
}
