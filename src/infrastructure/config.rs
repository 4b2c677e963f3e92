use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_currency_symbol() -> String {
  "₹".to_string()
}

fn default_per_page() -> u32 {
  10
}

fn default_output_dir() -> String {
  "./data/invoices".to_string()
}

fn default_burst_size() -> u32 {
  10
}

fn default_replenish_seconds() -> u64 {
  2
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  pub security: SecurityConfig,
  #[serde(default)]
  pub rate_limit: RateLimitConfig,
  #[serde(default)]
  pub billing: BillingConfig,
  #[serde(default)]
  pub dispatch: DispatchConfig,
  #[serde(default)]
  pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
  pub session_ttl_seconds: u64,
  pub remember_me_ttl_seconds: u64,
}

/// Token bucket applied to the login and register endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
  /// Seconds until one spent request is restored to the bucket
  #[serde(default = "default_replenish_seconds")]
  pub auth_replenish_seconds: u64,
  #[serde(default = "default_burst_size")]
  pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
  fn default() -> Self {
    Self {
      auth_replenish_seconds: default_replenish_seconds(),
      auth_burst_size: default_burst_size(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
  #[serde(default = "default_currency_symbol")]
  pub currency_symbol: String,
  #[serde(default = "default_per_page")]
  pub invoices_per_page: u32,
  #[serde(default = "default_per_page")]
  pub work_per_page: u32,
  #[serde(default = "default_per_page")]
  pub expenses_per_page: u32,
}

impl Default for BillingConfig {
  fn default() -> Self {
    Self {
      currency_symbol: default_currency_symbol(),
      invoices_per_page: default_per_page(),
      work_per_page: default_per_page(),
      expenses_per_page: default_per_page(),
    }
  }
}

/// Outbound invoice delivery
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
  #[serde(default)]
  pub email_enabled: bool,
  #[serde(default)]
  pub whatsapp_enabled: bool,
  /// Directory where rendered invoice documents are written
  #[serde(default = "default_output_dir")]
  pub output_dir: String,
}

impl Default for DispatchConfig {
  fn default() -> Self {
    Self {
      email_enabled: false,
      whatsapp_enabled: false,
      output_dir: default_output_dir(),
    }
  }
}

/// Administrator account created at startup when no user has this email
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapAdminConfig {
  pub username: String,
  pub email: String,
  pub password: String,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Later sources override earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with the BILLDESK_ prefix, sections separated
  ///    by double underscores, e.g. `BILLDESK_SERVER__PORT=8080` or
  ///    `BILLDESK_DISPATCH__EMAIL_ENABLED=true`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("BILLDESK")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "postgres://localhost/billdesk"
            max_connections = 5

            [security]
            session_ttl_seconds = 86400
            remember_me_ttl_seconds = 2592000

            [dispatch]
            email_enabled = true
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.url, "postgres://localhost/billdesk");
    assert_eq!(config.database.connect_timeout_seconds, 5); // default
    assert_eq!(config.database.acquire_timeout_seconds, 3); // default
    assert_eq!(config.security.session_ttl_seconds, 86400);
    assert_eq!(config.rate_limit.auth_burst_size, 10);
    assert_eq!(config.billing.invoices_per_page, 10);
    assert_eq!(config.billing.currency_symbol, "₹");
    assert!(config.dispatch.email_enabled);
    assert!(!config.dispatch.whatsapp_enabled);
    assert_eq!(config.dispatch.output_dir, "./data/invoices");
    assert!(config.bootstrap_admin.is_none());
  }

  #[test]
  fn test_bootstrap_admin_section() {
    let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 80

            [database]
            url = "postgres://db/billdesk"
            max_connections = 10

            [security]
            session_ttl_seconds = 60
            remember_me_ttl_seconds = 120

            [bootstrap_admin]
            username = "admin"
            email = "admin@example.com"
            password = "change-me-now"
        "#;

    let config: Config = toml::from_str(toml).unwrap();
    let admin = config.bootstrap_admin.unwrap();

    assert_eq!(admin.username, "admin");
    assert_eq!(admin.email, "admin@example.com");
  }
}
