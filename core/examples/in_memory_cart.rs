// core/examples/in_memory_cart.rs

use async_trait::async_trait;
use cartflow::{
  AddItemRequest, ApiError, BadgeView, CartApi, CartError, CartItem, CartRenderer, CartSettings, CartSummary, CartView,
  CartViewModel, ControlState, ItemId, Notification, PaymentSessionResponse, Product, Quantity, Redirect,
  UpdateItemRequest,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

// 1. An in-memory backend standing in for the shop API
#[derive(Default)]
struct InMemoryApi {
  items: Mutex<Vec<CartItem>>,
}

fn catalog(product_id: i64) -> Option<Product> {
  let (name, price, promotion_price) = match product_id {
    1 => ("Coffee mug", 4990, None),
    2 => ("French press", 24990, Some(19990)),
    _ => return None,
  };
  Some(Product {
    id: product_id,
    name: name.to_string(),
    price,
    is_promotion: promotion_price.is_some(),
    promotion_price,
    image: None,
  })
}

#[async_trait]
impl CartApi for InMemoryApi {
  async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError> {
    Ok(self.items.lock().clone())
  }

  async fn add_item(&self, request: &AddItemRequest) -> Result<CartItem, ApiError> {
    let product = catalog(request.product_id).ok_or(ApiError::Status {
      status: 404,
      message: Some("Product not found".to_string()),
    })?;
    let mut items = self.items.lock();
    if let Some(existing) = items.iter_mut().find(|item| item.product.id == product.id) {
      existing.quantity += request.quantity.get();
      return Ok(existing.clone());
    }
    let item = CartItem {
      id: items.len() as ItemId + 1,
      product,
      quantity: request.quantity.get(),
    };
    items.push(item.clone());
    Ok(item)
  }

  async fn update_item(&self, item_id: ItemId, request: &UpdateItemRequest) -> Result<(), ApiError> {
    let mut items = self.items.lock();
    let item = items.iter_mut().find(|item| item.id == item_id).ok_or(ApiError::Status {
      status: 404,
      message: None,
    })?;
    item.quantity = request.quantity.get();
    Ok(())
  }

  async fn remove_item(&self, item_id: ItemId) -> Result<(), ApiError> {
    self.items.lock().retain(|item| item.id != item_id);
    Ok(())
  }

  async fn clear_cart(&self) -> Result<(), ApiError> {
    self.items.lock().clear();
    Ok(())
  }

  async fn initiate_payment(&self) -> Result<PaymentSessionResponse, ApiError> {
    Ok(PaymentSessionResponse {
      token: Some("demo-token".to_string()),
      url: Some("https://gateway.example.com/init".to_string()),
    })
  }
}

// 2. A renderer that only logs what the page would show
struct LogRenderer;

#[async_trait]
impl CartRenderer for LogRenderer {
  fn is_cart_view(&self) -> bool {
    true
  }

  fn is_authenticated(&self) -> bool {
    true
  }

  fn show_cart(&self, view: &CartView) {
    for row in &view.rows {
      info!(item = row.item_id, name = %row.product_name, quantity = row.quantity, line_total = row.line_total, "Row");
    }
    self.show_summary(&view.summary);
  }

  fn show_summary(&self, summary: &CartSummary) {
    info!(
      subtotal = %summary.subtotal_label(),
      tax = %summary.tax_label(),
      total = %summary.total_label(),
      checkout = summary.checkout_enabled(),
      "Summary"
    );
  }

  fn show_badge(&self, badge: &BadgeView) {
    info!(badge = ?badge.label(), "Badge");
  }

  fn notify(&self, notification: &Notification) {
    info!(message = %notification.message, "Notification");
  }

  fn alert(&self, message: &str) {
    info!(%message, "Alert");
  }

  fn set_remove_control(&self, item_id: ItemId, state: ControlState) {
    info!(item_id, ?state, "Remove control");
  }

  async fn fade_out_row(&self, item_id: ItemId, duration: Duration) {
    info!(item_id, ?duration, "Row faded out");
  }

  fn set_loading_overlay(&self, visible: bool) {
    info!(visible, "Loading overlay");
  }

  fn redirect(&self, redirect: &Redirect) {
    info!(?redirect, "Redirect");
  }

  async fn confirm(&self, prompt: &str) -> bool {
    info!(%prompt, "Confirmed");
    true
  }
}

#[tokio::main]
async fn main() -> Result<(), CartError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- In-Memory Cart Example ---");

  // 3. Wire the view model to both ports
  let view_model = CartViewModel::new(
    Arc::new(InMemoryApi::default()),
    Arc::new(LogRenderer),
    CartSettings::default(),
  )?;

  // 4. Drive it like the page would
  view_model.add_to_cart(1, "Coffee mug", Quantity::clamp(2)).await?;
  view_model.add_to_cart(2, "French press", Quantity::MIN).await?;
  view_model.load_cart().await;
  view_model.update_quantity(1, 150).await?;
  view_model.remove_item(2).await?;
  let redirect = view_model.initiate_payment().await?;

  info!(url = %redirect.url, "Payment handshake ready.");
  Ok(())
}
