// demos/cart_console/src/services/http_api.rs

//! `CartApi` over the shop's JSON endpoints.

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use cartflow::{
  AddItemRequest, ApiError, CartApi, CartItem, Endpoints, ErrorBody, ItemId, PaymentSessionResponse, UpdateItemRequest,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct HttpCartApi {
  endpoints: Endpoints,
  http: Client,
}

impl HttpCartApi {
  pub fn new(config: &AppConfig) -> Result<Self> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(cookie) = &config.session_cookie {
      let value = HeaderValue::from_str(cookie)
        .map_err(|e| AppError::Config(format!("Invalid CART_SESSION_COOKIE: {}", e)))?;
      headers.insert(COOKIE, value);
    }

    let http = Client::builder().default_headers(headers).build()?;
    Ok(Self {
      endpoints: Endpoints::new(config.api_base_url.as_str()),
      http,
    })
  }

  pub fn endpoints(&self) -> &Endpoints {
    &self.endpoints
  }

  async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request
      .send()
      .await
      .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    debug!(%status, body = %text, "Cart API answered with an error status.");
    Err(status_error(status.as_u16(), &text))
  }

  async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
    let response = self.send(request).await?;
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
  }
}

/// Non-success answer to `ApiError::Status`, keeping the `{"error": ...}`
/// message when the body has one.
fn status_error(status: u16, body: &str) -> ApiError {
  let message = serde_json::from_str::<ErrorBody>(body).ok().and_then(|body| body.error);
  ApiError::Status { status, message }
}

#[async_trait]
impl CartApi for HttpCartApi {
  #[instrument(name = "HttpCartApi::fetch_cart", skip(self))]
  async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError> {
    self.send_json(self.http.get(self.endpoints.cart())).await
  }

  #[instrument(name = "HttpCartApi::add_item", skip(self))]
  async fn add_item(&self, request: &AddItemRequest) -> Result<CartItem, ApiError> {
    self
      .send_json(self.http.post(self.endpoints.add_item()).json(request))
      .await
  }

  #[instrument(name = "HttpCartApi::update_item", skip(self))]
  async fn update_item(&self, item_id: ItemId, request: &UpdateItemRequest) -> Result<(), ApiError> {
    self
      .send(self.http.put(self.endpoints.update_item(item_id)).json(request))
      .await
      .map(drop)
  }

  #[instrument(name = "HttpCartApi::remove_item", skip(self))]
  async fn remove_item(&self, item_id: ItemId) -> Result<(), ApiError> {
    self
      .send(self.http.delete(self.endpoints.remove_item(item_id)))
      .await
      .map(drop)
  }

  #[instrument(name = "HttpCartApi::clear_cart", skip(self))]
  async fn clear_cart(&self) -> Result<(), ApiError> {
    self.send(self.http.delete(self.endpoints.clear_cart())).await.map(drop)
  }

  #[instrument(name = "HttpCartApi::initiate_payment", skip(self))]
  async fn initiate_payment(&self) -> Result<PaymentSessionResponse, ApiError> {
    self.send_json(self.http.post(self.endpoints.initiate_payment())).await
  }
}
