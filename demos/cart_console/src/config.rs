// demos/cart_console/src/config.rs

use crate::errors::{AppError, Result};
use cartflow::CartSettings;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Root of the shop backend, e.g. `http://127.0.0.1:5000`.
  pub api_base_url: String,
  /// Raw `Cookie` header value carrying the shop session.
  pub session_cookie: Option<String>,
  /// Mirrors the page's authenticated-session flag.
  pub authenticated: bool,
  pub settings: CartSettings,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|var_name| env::var(var_name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the
  /// process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_var = |var_name: &str| lookup(var_name).filter(|value| !value.trim().is_empty());

    let api_base_url = get_var("CART_API_BASE_URL")
      .ok_or_else(|| AppError::Config("Missing environment variable 'CART_API_BASE_URL'".to_string()))?;
    let session_cookie = get_var("CART_SESSION_COOKIE");
    let authenticated = match get_var("CART_AUTHENTICATED") {
      Some(raw) => parse_var::<bool>("CART_AUTHENTICATED", &raw)?,
      None => session_cookie.is_some(),
    };

    let mut settings = CartSettings::default();
    if let Some(raw) = get_var("CART_VAT_PERCENT") {
      settings.vat_percent = parse_var("CART_VAT_PERCENT", &raw)?;
    }
    if let Some(raw) = get_var("CART_NOTIFICATION_TTL_MS") {
      settings.notification_ttl = Duration::from_millis(parse_var("CART_NOTIFICATION_TTL_MS", &raw)?);
    }
    if let Some(raw) = get_var("CART_ROW_FADE_MS") {
      settings.row_fade = Duration::from_millis(parse_var("CART_ROW_FADE_MS", &raw)?);
    }
    settings
      .validate()
      .map_err(|e| AppError::Config(e.to_string()))?;

    tracing::info!(%api_base_url, authenticated, "Application configuration loaded successfully.");
    // The session cookie is a credential; only its presence is logged.
    tracing::debug!(has_session_cookie = session_cookie.is_some(), settings = ?settings, "Loaded config details");

    Ok(Self {
      api_base_url,
      session_cookie,
      authenticated,
      settings,
    })
  }
}

fn parse_var<T>(var_name: &str, raw: &str) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .trim()
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e)))
}
