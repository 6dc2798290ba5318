// core/src/render.rs

//! The rendering port: everything the view model needs from the page.

use crate::models::ItemId;
use crate::view::{BadgeView, CartSummary, CartView};
use async_trait::async_trait;
use std::time::Duration;

/// Visual state of a row's delete control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlState {
  Idle,
  /// Disabled with a spinner while the delete request is in flight.
  Busy,
}

/// Transient success message that removes itself after `dismiss_after`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub message: String,
  pub dismiss_after: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
  /// Plain navigation to the login entry point.
  Login { path: String },
  /// Hidden form POSTed to `action` right away, carrying `fields`.
  FormPost { action: String, fields: Vec<(String, String)> },
}

/// Page surface driven by the view model.
///
/// The view model is the only writer; implementations only draw what they
/// are told.
#[async_trait]
pub trait CartRenderer: Send + Sync {
  /// Whether the cart item list is part of the current page.
  fn is_cart_view(&self) -> bool;

  /// The authenticated-session flag published by the page.
  fn is_authenticated(&self) -> bool;

  /// Redraws the whole cart, empty state included.
  fn show_cart(&self, view: &CartView);

  /// Redraws only the totals block and empty state.
  fn show_summary(&self, summary: &CartSummary);

  fn show_badge(&self, badge: &BadgeView);

  fn notify(&self, notification: &Notification);

  /// Blocking user-visible message.
  fn alert(&self, message: &str);

  fn set_remove_control(&self, item_id: ItemId, state: ControlState);

  /// Fades the row out over `duration` and removes it once the fade ends.
  async fn fade_out_row(&self, item_id: ItemId, duration: Duration);

  fn set_loading_overlay(&self, visible: bool);

  fn redirect(&self, redirect: &Redirect);

  /// Interactive yes/no question.
  async fn confirm(&self, prompt: &str) -> bool;
}
