// demos/cart_console/src/errors.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("HTTP Client Error: {0}")]
  Http(#[from] reqwest::Error),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
