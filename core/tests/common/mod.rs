// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper.

use async_trait::async_trait;
use cartflow::{
  AddItemRequest, ApiError, BadgeView, CartApi, CartItem, CartRenderer, CartSettings, CartSummary, CartView,
  CartViewModel, ControlState, ItemId, Notification, PaymentSessionResponse, Product, ProductId, Redirect,
  UpdateItemRequest,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::Level;

// --- Fixtures ---

pub fn product(id: ProductId, price: i64) -> Product {
  Product {
    id,
    name: format!("Product {id}"),
    price,
    is_promotion: false,
    promotion_price: None,
    image: Some(format!("product-{id}.jpg")),
  }
}

pub fn promo_product(id: ProductId, price: i64, promotion_price: i64) -> Product {
  Product {
    is_promotion: true,
    promotion_price: Some(promotion_price),
    ..product(id, price)
  }
}

pub fn item(id: ItemId, product: Product, quantity: u32) -> CartItem {
  CartItem { id, product, quantity }
}

pub fn unauthorized() -> ApiError {
  ApiError::Status {
    status: 401,
    message: Some("User not authenticated".to_string()),
  }
}

pub fn payment_session(token: &str, url: &str) -> PaymentSessionResponse {
  PaymentSessionResponse {
    token: Some(token.to_string()),
    url: Some(url.to_string()),
  }
}

// --- Mock CartApi ---

#[derive(Debug, Default)]
pub struct MockState {
  pub items: Vec<CartItem>,
  pub catalog: Vec<Product>,
  pub next_item_id: ItemId,
  pub fetch_error: Option<ApiError>,
  pub add_error: Option<ApiError>,
  pub update_error: Option<ApiError>,
  pub remove_error: Option<ApiError>,
  pub clear_error: Option<ApiError>,
  pub payment: Option<Result<PaymentSessionResponse, ApiError>>,
  /// Each fetch takes the next gate and answers only once it opens, with
  /// the items it saw when called.
  pub fetch_gates: VecDeque<oneshot::Receiver<()>>,
  pub calls: Vec<String>,
}

/// In-memory backend behaving like the real one: adds accumulate onto an
/// existing line and every fetch returns the live list.
#[derive(Debug, Default)]
pub struct MockApi {
  pub state: Mutex<MockState>,
}

impl MockApi {
  pub fn with_items(items: Vec<CartItem>) -> Arc<Self> {
    let next_item_id = items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
    let catalog = items.iter().map(|item| item.product.clone()).collect();
    Arc::new(Self {
      state: Mutex::new(MockState {
        items,
        catalog,
        next_item_id,
        ..MockState::default()
      }),
    })
  }

  pub fn empty() -> Arc<Self> {
    Self::with_items(Vec::new())
  }

  pub fn stock(&self, product: Product) {
    self.state.lock().catalog.push(product);
  }

  pub fn calls(&self) -> Vec<String> {
    self.state.lock().calls.clone()
  }

  pub fn call_count(&self, prefix: &str) -> usize {
    self.state.lock().calls.iter().filter(|call| call.starts_with(prefix)).count()
  }

  pub fn items(&self) -> Vec<CartItem> {
    self.state.lock().items.clone()
  }

  /// Holds back the next fetch until the returned sender fires.
  pub fn gate_next_fetch(&self) -> oneshot::Sender<()> {
    let (open, gate) = oneshot::channel();
    self.state.lock().fetch_gates.push_back(gate);
    open
  }
}

#[async_trait]
impl CartApi for MockApi {
  async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError> {
    let (result, gate) = {
      let mut state = self.state.lock();
      state.calls.push("fetch".to_string());
      let result = match &state.fetch_error {
        Some(err) => Err(err.clone()),
        None => Ok(state.items.clone()),
      };
      (result, state.fetch_gates.pop_front())
    };
    if let Some(gate) = gate {
      let _ = gate.await;
    }
    result
  }

  async fn add_item(&self, request: &AddItemRequest) -> Result<CartItem, ApiError> {
    let mut state = self.state.lock();
    state.calls.push(format!("add:{}:{}", request.product_id, request.quantity));
    if let Some(err) = &state.add_error {
      return Err(err.clone());
    }
    let quantity = request.quantity.get();
    if let Some(existing) = state.items.iter_mut().find(|item| item.product.id == request.product_id) {
      existing.quantity += quantity;
      return Ok(existing.clone());
    }
    let product = state
      .catalog
      .iter()
      .find(|product| product.id == request.product_id)
      .cloned()
      .ok_or_else(|| ApiError::Status {
        status: 404,
        message: Some("Product not found".to_string()),
      })?;
    let id = state.next_item_id;
    state.next_item_id += 1;
    let created = CartItem { id, product, quantity };
    state.items.push(created.clone());
    Ok(created)
  }

  async fn update_item(&self, item_id: ItemId, request: &UpdateItemRequest) -> Result<(), ApiError> {
    let mut state = self.state.lock();
    state.calls.push(format!("update:{}:{}", item_id, request.quantity));
    if let Some(err) = &state.update_error {
      return Err(err.clone());
    }
    match state.items.iter_mut().find(|item| item.id == item_id) {
      Some(existing) => {
        existing.quantity = request.quantity.get();
        Ok(())
      }
      None => Err(ApiError::Status {
        status: 404,
        message: Some("Item not found in cart".to_string()),
      }),
    }
  }

  async fn remove_item(&self, item_id: ItemId) -> Result<(), ApiError> {
    let mut state = self.state.lock();
    state.calls.push(format!("remove:{item_id}"));
    if let Some(err) = &state.remove_error {
      return Err(err.clone());
    }
    let before = state.items.len();
    state.items.retain(|item| item.id != item_id);
    if state.items.len() == before {
      return Err(ApiError::Status {
        status: 404,
        message: Some("Item not found in cart".to_string()),
      });
    }
    Ok(())
  }

  async fn clear_cart(&self) -> Result<(), ApiError> {
    let mut state = self.state.lock();
    state.calls.push("clear".to_string());
    if let Some(err) = &state.clear_error {
      return Err(err.clone());
    }
    state.items.clear();
    Ok(())
  }

  async fn initiate_payment(&self) -> Result<PaymentSessionResponse, ApiError> {
    let mut state = self.state.lock();
    state.calls.push("pay".to_string());
    state.payment.clone().unwrap_or_else(|| {
      Err(ApiError::Status {
        status: 400,
        message: Some("Empty cart".to_string()),
      })
    })
  }
}

// --- Recording CartRenderer ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
  Cart(CartView),
  Summary(CartSummary),
  Badge(BadgeView),
  Notify(Notification),
  Alert(String),
  RemoveControl(ItemId, ControlState),
  FadeOut(ItemId, Duration),
  Overlay(bool),
  Redirect(Redirect),
  Confirm(String),
}

#[derive(Debug)]
pub struct RecordingRenderer {
  pub cart_view: bool,
  pub authenticated: bool,
  pub confirm_answer: bool,
  pub events: Mutex<Vec<UiEvent>>,
}

impl RecordingRenderer {
  pub fn build(cart_view: bool, authenticated: bool, confirm_answer: bool) -> Arc<Self> {
    Arc::new(Self {
      cart_view,
      authenticated,
      confirm_answer,
      events: Mutex::new(Vec::new()),
    })
  }

  /// Logged-in user on the cart page who accepts every prompt.
  pub fn cart_page() -> Arc<Self> {
    Self::build(true, true, true)
  }

  /// Logged-in user on a product or listing page.
  pub fn other_page() -> Arc<Self> {
    Self::build(false, true, true)
  }

  pub fn anonymous() -> Arc<Self> {
    Self::build(false, false, true)
  }

  pub fn declining() -> Arc<Self> {
    Self::build(true, true, false)
  }

  pub fn events(&self) -> Vec<UiEvent> {
    self.events.lock().clone()
  }

  pub fn carts(&self) -> Vec<CartView> {
    self
      .events()
      .into_iter()
      .filter_map(|event| match event {
        UiEvent::Cart(view) => Some(view),
        _ => None,
      })
      .collect()
  }

  pub fn badges(&self) -> Vec<BadgeView> {
    self
      .events()
      .into_iter()
      .filter_map(|event| match event {
        UiEvent::Badge(badge) => Some(badge),
        _ => None,
      })
      .collect()
  }

  pub fn last_cart(&self) -> Option<CartView> {
    self.events().into_iter().rev().find_map(|event| match event {
      UiEvent::Cart(view) => Some(view),
      _ => None,
    })
  }

  pub fn last_summary(&self) -> Option<CartSummary> {
    self.events().into_iter().rev().find_map(|event| match event {
      UiEvent::Summary(summary) => Some(summary),
      _ => None,
    })
  }

  pub fn last_badge(&self) -> Option<BadgeView> {
    self.events().into_iter().rev().find_map(|event| match event {
      UiEvent::Badge(badge) => Some(badge),
      _ => None,
    })
  }

  pub fn alerts(&self) -> Vec<String> {
    self
      .events()
      .into_iter()
      .filter_map(|event| match event {
        UiEvent::Alert(message) => Some(message),
        _ => None,
      })
      .collect()
  }

  pub fn redirects(&self) -> Vec<Redirect> {
    self
      .events()
      .into_iter()
      .filter_map(|event| match event {
        UiEvent::Redirect(redirect) => Some(redirect),
        _ => None,
      })
      .collect()
  }

  fn record(&self, event: UiEvent) {
    self.events.lock().push(event);
  }
}

#[async_trait]
impl CartRenderer for RecordingRenderer {
  fn is_cart_view(&self) -> bool {
    self.cart_view
  }

  fn is_authenticated(&self) -> bool {
    self.authenticated
  }

  fn show_cart(&self, view: &CartView) {
    self.record(UiEvent::Cart(view.clone()));
  }

  fn show_summary(&self, summary: &CartSummary) {
    self.record(UiEvent::Summary(*summary));
  }

  fn show_badge(&self, badge: &BadgeView) {
    self.record(UiEvent::Badge(*badge));
  }

  fn notify(&self, notification: &Notification) {
    self.record(UiEvent::Notify(notification.clone()));
  }

  fn alert(&self, message: &str) {
    self.record(UiEvent::Alert(message.to_string()));
  }

  fn set_remove_control(&self, item_id: ItemId, state: ControlState) {
    self.record(UiEvent::RemoveControl(item_id, state));
  }

  async fn fade_out_row(&self, item_id: ItemId, duration: Duration) {
    self.record(UiEvent::FadeOut(item_id, duration));
  }

  fn set_loading_overlay(&self, visible: bool) {
    self.record(UiEvent::Overlay(visible));
  }

  fn redirect(&self, redirect: &Redirect) {
    self.record(UiEvent::Redirect(redirect.clone()));
  }

  async fn confirm(&self, prompt: &str) -> bool {
    self.record(UiEvent::Confirm(prompt.to_string()));
    self.confirm_answer
  }
}

pub fn view_model(api: &Arc<MockApi>, renderer: &Arc<RecordingRenderer>) -> CartViewModel {
  CartViewModel::new(api.clone(), renderer.clone(), CartSettings::default()).expect("default settings are valid")
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
