// core/src/settings.rs

//! Tunables of the cart page.

use crate::error::{CartError, CartResult};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSettings {
  /// VAT included in every price, as a whole percentage (19 gives the 1.19 divisor).
  pub vat_percent: u32,
  /// Badge counts above this value are shown as `"{cap}+"`.
  pub badge_cap: u32,
  /// How long the "added to cart" notification stays visible.
  pub notification_ttl: Duration,
  /// Fade-out duration of a removed cart row.
  pub row_fade: Duration,
  /// Where anonymous users are sent when they try to add to the cart.
  pub login_path: String,
  /// Directory prefixed to bare product image file names.
  pub product_image_dir: String,
  /// Image shown for products without one.
  pub placeholder_image: String,
  /// Form field carrying the payment token to the gateway.
  pub payment_token_field: String,
}

impl Default for CartSettings {
  fn default() -> Self {
    Self {
      vat_percent: 19,
      badge_cap: 9,
      notification_ttl: Duration::from_millis(3000),
      row_fade: Duration::from_millis(300),
      login_path: "/login".to_string(),
      product_image_dir: "/static/images/products/".to_string(),
      placeholder_image: "no-image.jpg".to_string(),
      payment_token_field: "token_ws".to_string(),
    }
  }
}

impl CartSettings {
  pub fn validate(&self) -> CartResult<()> {
    if self.vat_percent > 100 {
      return Err(CartError::Config(format!(
        "VAT percentage must be between 0 and 100, got {}",
        self.vat_percent
      )));
    }
    if self.badge_cap == 0 {
      return Err(CartError::Config("Badge cap must be at least 1".to_string()));
    }
    if self.login_path.trim().is_empty() {
      return Err(CartError::Config("Login path must not be empty".to_string()));
    }
    if self.payment_token_field.trim().is_empty() {
      return Err(CartError::Config("Payment token field must not be empty".to_string()));
    }
    Ok(())
  }

  /// Placeholder image path, resolved against the product image directory.
  pub fn placeholder_image_src(&self) -> String {
    format!("{}{}", self.product_image_dir, self.placeholder_image)
  }
}
