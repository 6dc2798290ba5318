// core/src/view_model.rs

//! `CartViewModel`: the cart page controller.
//!
//! Reads (`load_cart`, `update_cart_count`) go straight to the ports.
//! Mutations run their flow and move through `Idle → Pending → Applied |
//! Failed`; every failure path has already restored the page by the time
//! the error is returned.

use crate::api::{CartApi, PaymentRedirect};
use crate::error::{CartError, CartResult, FlowError};
use crate::flow::{Flow, FlowOutcome, OperationState, Shared};
use crate::flows::contexts::{AddToCartCtx, ClearCartCtx, PaymentCtx, RemoveItemCtx, UpdateQuantityCtx};
use crate::flows::CartFlows;
use crate::models::{CartItem, ItemId, ProductId};
use crate::ports::CartPorts;
use crate::quantity::Quantity;
use crate::render::CartRenderer;
use crate::settings::CartSettings;
use crate::view::{BadgeView, CartView};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
  AddToCart,
  UpdateQuantity,
  RemoveItem,
  ClearCart,
  InitiatePayment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
  Added(CartItem),
  /// No session: the page was sent to the login entry point instead.
  LoginRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
  Removed,
  /// The user declined the confirmation prompt.
  Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
  Cleared,
  Cancelled,
}

/// State after the page bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReady {
  /// Present only on the cart view.
  pub items: Option<Vec<CartItem>>,
  pub badge: BadgeView,
}

/// Every user action on the cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
  PageReady,
  LoadCart,
  RefreshCount,
  AddToCart {
    product_id: ProductId,
    product_name: String,
    quantity: Quantity,
  },
  UpdateQuantity {
    item_id: ItemId,
    quantity: i64,
  },
  RemoveItem {
    item_id: ItemId,
  },
  ClearCart,
  Checkout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
  PageReady(PageReady),
  Loaded(Vec<CartItem>),
  Count(BadgeView),
  Added(AddOutcome),
  QuantityUpdated(Quantity),
  Removed(RemoveOutcome),
  Cleared(ClearOutcome),
  PaymentRedirected(PaymentRedirect),
}

pub struct CartViewModel {
  ports: CartPorts,
  flows: CartFlows,
  states: Mutex<HashMap<OperationKind, OperationState>>,
}

impl std::fmt::Debug for CartViewModel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartViewModel")
      .field("settings", &self.ports.settings)
      .field("flows", &self.flows)
      .finish()
  }
}

impl CartViewModel {
  /// Wires the view model to its collaborators. Fails on invalid settings.
  pub fn new(api: Arc<dyn CartApi>, renderer: Arc<dyn CartRenderer>, settings: CartSettings) -> CartResult<Self> {
    settings.validate()?;
    let flows = CartFlows::build()?;
    info!("Cart view model ready.");
    Ok(Self {
      ports: CartPorts::new(api, renderer, settings),
      flows,
      states: Mutex::new(HashMap::new()),
    })
  }

  pub fn ports(&self) -> &CartPorts {
    &self.ports
  }

  pub fn settings(&self) -> &CartSettings {
    &self.ports.settings
  }

  /// Last known state of a mutating operation; `Idle` if it never ran.
  pub fn state(&self, kind: OperationKind) -> OperationState {
    self.states.lock().get(&kind).copied().unwrap_or_default()
  }

  /// Pure: what the cart page shows for `items`.
  pub fn render(&self, items: &[CartItem]) -> CartView {
    self.ports.render(items)
  }

  pub async fn load_cart(&self) -> Vec<CartItem> {
    self.ports.load_cart().await
  }

  pub async fn update_cart_count(&self) -> BadgeView {
    self.ports.update_cart_count().await
  }

  /// Loads the cart when on the cart view, then refreshes the badge.
  #[instrument(name = "CartViewModel::on_page_ready", skip(self))]
  pub async fn on_page_ready(&self) -> PageReady {
    let items = if self.ports.renderer.is_cart_view() {
      Some(self.ports.load_cart().await)
    } else {
      None
    };
    let badge = self.ports.update_cart_count().await;
    PageReady { items, badge }
  }

  #[instrument(name = "CartViewModel::add_to_cart", skip(self, product_name))]
  pub async fn add_to_cart(
    &self,
    product_id: ProductId,
    product_name: impl Into<String>,
    quantity: Quantity,
  ) -> CartResult<AddOutcome> {
    let ctx = Shared::new(AddToCartCtx::new(
      self.ports.clone(),
      product_id,
      product_name.into(),
      quantity,
    ));
    self
      .drive(OperationKind::AddToCart, &self.flows.add_to_cart, ctx.clone())
      .await?;

    let mut guard = ctx.write();
    if guard.login_required {
      return Ok(AddOutcome::LoginRequired);
    }
    guard
      .added_item
      .take()
      .map(AddOutcome::Added)
      .ok_or_else(|| FlowError::Internal("add to cart completed without an item".to_string()).into())
  }

  /// Sends `new_quantity` clamped into `[1, 99]`; returns what was sent.
  #[instrument(name = "CartViewModel::update_quantity", skip(self))]
  pub async fn update_quantity(&self, item_id: ItemId, new_quantity: i64) -> CartResult<Quantity> {
    let ctx = Shared::new(UpdateQuantityCtx::new(self.ports.clone(), item_id, new_quantity));
    self
      .drive(OperationKind::UpdateQuantity, &self.flows.update_quantity, ctx.clone())
      .await?;

    let applied = ctx.read().applied;
    applied.ok_or_else(|| FlowError::Internal("quantity update completed without a quantity".to_string()).into())
  }

  #[instrument(name = "CartViewModel::remove_item", skip(self))]
  pub async fn remove_item(&self, item_id: ItemId) -> CartResult<RemoveOutcome> {
    let ctx = Shared::new(RemoveItemCtx::new(self.ports.clone(), item_id));
    let outcome = self
      .drive(OperationKind::RemoveItem, &self.flows.remove_item, ctx)
      .await?;
    Ok(match outcome {
      FlowOutcome::Completed => RemoveOutcome::Removed,
      FlowOutcome::Stopped => RemoveOutcome::Cancelled,
    })
  }

  #[instrument(name = "CartViewModel::clear_cart", skip(self))]
  pub async fn clear_cart(&self) -> CartResult<ClearOutcome> {
    let ctx = Shared::new(ClearCartCtx::new(self.ports.clone()));
    let outcome = self
      .drive(OperationKind::ClearCart, &self.flows.clear_cart, ctx)
      .await?;
    Ok(match outcome {
      FlowOutcome::Completed => ClearOutcome::Cleared,
      FlowOutcome::Stopped => ClearOutcome::Cancelled,
    })
  }

  /// Starts the payment handshake; on success the page has been handed the
  /// gateway form POST.
  #[instrument(name = "CartViewModel::initiate_payment", skip(self))]
  pub async fn initiate_payment(&self) -> CartResult<PaymentRedirect> {
    let ctx = Shared::new(PaymentCtx::new(self.ports.clone()));
    self
      .drive(OperationKind::InitiatePayment, &self.flows.payment, ctx.clone())
      .await?;

    let redirect = ctx.write().redirect.take();
    redirect.ok_or_else(|| FlowError::Internal("payment completed without a redirect".to_string()).into())
  }

  /// Command handler entry point for page events.
  pub async fn dispatch(&self, command: CartCommand) -> CartResult<CommandOutcome> {
    match command {
      CartCommand::PageReady => Ok(CommandOutcome::PageReady(self.on_page_ready().await)),
      CartCommand::LoadCart => Ok(CommandOutcome::Loaded(self.load_cart().await)),
      CartCommand::RefreshCount => Ok(CommandOutcome::Count(self.update_cart_count().await)),
      CartCommand::AddToCart {
        product_id,
        product_name,
        quantity,
      } => self
        .add_to_cart(product_id, product_name, quantity)
        .await
        .map(CommandOutcome::Added),
      CartCommand::UpdateQuantity { item_id, quantity } => self
        .update_quantity(item_id, quantity)
        .await
        .map(CommandOutcome::QuantityUpdated),
      CartCommand::RemoveItem { item_id } => self.remove_item(item_id).await.map(CommandOutcome::Removed),
      CartCommand::ClearCart => self.clear_cart().await.map(CommandOutcome::Cleared),
      CartCommand::Checkout => self
        .initiate_payment()
        .await
        .map(CommandOutcome::PaymentRedirected),
    }
  }

  async fn drive<T>(&self, kind: OperationKind, flow: &Flow<T, CartError>, ctx: Shared<T>) -> CartResult<FlowOutcome>
  where
    T: Send + Sync + 'static,
  {
    self.set_state(kind, OperationState::Pending);
    let result = flow.run(ctx).await;
    let settled = OperationState::settled(&result);
    if let Err(err) = &result {
      warn!(operation = ?kind, error = %err, kind = ?err.kind(), "Cart operation failed.");
    }
    self.set_state(kind, settled);
    result
  }

  fn set_state(&self, kind: OperationKind, state: OperationState) {
    self.states.lock().insert(kind, state);
  }
}
