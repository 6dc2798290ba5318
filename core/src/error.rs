// core/src/error.rs

//! Error types for the cart controller.
//!
//! Failures are split by how the page reacts to them (see [`ErrorKind`]):
//! user-facing errors end in an alert, silent ones are only logged while the
//! UI falls back to a safe default.

use thiserror::Error;

/// Failure reported by a [`CartApi`](crate::api::CartApi) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
  #[error("Transport failure: {0}")]
  Transport(String),

  /// The backend answered with a non-success status. `message` carries the
  /// `{"error": ...}` body when the backend sent one.
  #[error("Backend answered with status {status}")]
  Status { status: u16, message: Option<String> },

  #[error("Malformed response body: {0}")]
  Decode(String),
}

impl ApiError {
  /// `true` when the backend refused the call for lack of a session.
  pub fn is_unauthenticated(&self) -> bool {
    matches!(self, ApiError::Status { status: 401, .. })
  }

  /// Error message provided by the backend, if any.
  pub fn server_message(&self) -> Option<&str> {
    match self {
      ApiError::Status { message, .. } => message.as_deref(),
      _ => None,
    }
  }
}

/// Setup and runtime errors of the step-flow engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
  #[error("Step '{step}' not found in flow '{flow}'")]
  StepNotFound { flow: String, step: String },

  #[error("Step '{step}' declared twice in flow '{flow}'")]
  DuplicateStep { flow: String, step: String },

  #[error("Handler missing for non-optional step '{step}' in flow '{flow}'")]
  HandlerMissing { flow: String, step: String },

  #[error("Internal flow error: {0}")]
  Internal(String),
}

/// How the page reacts to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  /// Shown to the user through an alert or notification.
  UserFacing,
  /// Logged only; the UI falls back to a safe default.
  Silent,
}

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Cart API error: {0}")]
  Api(#[from] ApiError),

  /// The backend refused the operation; the message is meant for the user.
  #[error("{0}")]
  Rejected(String),

  #[error("Invalid payment redirect: {0}")]
  InvalidRedirect(String),

  #[error("Cart flow error: {source}")]
  Flow {
    #[from]
    source: FlowError,
  },

  #[error("Configuration error: {0}")]
  Config(String),
}

impl CartError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      CartError::Rejected(_) | CartError::InvalidRedirect(_) => ErrorKind::UserFacing,
      CartError::Api(_) | CartError::Flow { .. } | CartError::Config(_) => ErrorKind::Silent,
    }
  }

  /// Maps an API failure onto a user-facing rejection, preferring the
  /// backend's own message over `fallback`.
  pub(crate) fn rejected(err: &ApiError, fallback: &str) -> Self {
    CartError::Rejected(err.server_message().unwrap_or(fallback).to_string())
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
