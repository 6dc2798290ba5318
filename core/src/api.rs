// core/src/api.rs

//! The cart backend as seen by the page.
//!
//! [`CartApi`] is the port the view model talks to; [`Endpoints`] holds the
//! backend routes for HTTP adapters.

use crate::error::{ApiError, CartError, CartResult};
use crate::models::{CartItem, ItemId, ProductId};
use crate::quantity::Quantity;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddItemRequest {
  pub product_id: ProductId,
  pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateItemRequest {
  pub quantity: Quantity,
}

/// `{"error": "..."}` body sent with non-success responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
  #[serde(default)]
  pub error: Option<String>,
}

/// Raw answer of the payment start endpoint. Both fields are opaque and must
/// be present and non-empty for the handshake to proceed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentSessionResponse {
  #[serde(default)]
  pub token: Option<String>,
  #[serde(default)]
  pub url: Option<String>,
}

/// A validated payment handshake: where to POST and which token to carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRedirect {
  pub url: String,
  pub token: String,
}

impl PaymentSessionResponse {
  pub fn into_redirect(self) -> CartResult<PaymentRedirect> {
    let token = self.token.filter(|token| !token.trim().is_empty());
    let url = self.url.filter(|url| !url.trim().is_empty());
    match (token, url) {
      (Some(token), Some(url)) => Ok(PaymentRedirect { url, token }),
      (None, _) => Err(CartError::InvalidRedirect("missing payment token".to_string())),
      (_, None) => Err(CartError::InvalidRedirect("missing redirect url".to_string())),
    }
  }
}

/// Remote cart operations. Every call reflects server state; nothing is
/// cached on the client side.
#[async_trait]
pub trait CartApi: Send + Sync {
  /// The authoritative item list. Anonymous sessions get a 401 status error.
  async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError>;

  async fn add_item(&self, request: &AddItemRequest) -> Result<CartItem, ApiError>;

  async fn update_item(&self, item_id: ItemId, request: &UpdateItemRequest) -> Result<(), ApiError>;

  async fn remove_item(&self, item_id: ItemId) -> Result<(), ApiError>;

  async fn clear_cart(&self) -> Result<(), ApiError>;

  async fn initiate_payment(&self) -> Result<PaymentSessionResponse, ApiError>;
}

/// Backend routes, resolved against a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
  base_url: String,
}

impl Endpoints {
  pub fn new(base_url: impl Into<String>) -> Self {
    let base_url: String = base_url.into();
    Self {
      base_url: base_url.trim_end_matches('/').to_string(),
    }
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn cart(&self) -> String {
    format!("{}/api/cart", self.base_url)
  }

  pub fn add_item(&self) -> String {
    format!("{}/api/cart/add", self.base_url)
  }

  pub fn update_item(&self, item_id: ItemId) -> String {
    format!("{}/api/cart/update/{}", self.base_url, item_id)
  }

  pub fn remove_item(&self, item_id: ItemId) -> String {
    format!("{}/api/cart/remove/{}", self.base_url, item_id)
  }

  pub fn clear_cart(&self) -> String {
    format!("{}/api/cart/clear", self.base_url)
  }

  pub fn initiate_payment(&self) -> String {
    format!("{}/iniciar-pago", self.base_url)
  }

  /// Resolves a site-relative path such as the login page.
  pub fn page(&self, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
      return path.to_string();
    }
    format!("{}/{}", self.base_url, path.trim_start_matches('/'))
  }
}
