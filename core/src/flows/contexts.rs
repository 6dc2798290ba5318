// core/src/flows/contexts.rs

//! Context data of each cart flow. Handlers receive these wrapped in
//! [`Shared`](crate::flow::Shared).

use crate::api::PaymentRedirect;
use crate::models::{CartItem, ItemId, ProductId};
use crate::ports::CartPorts;
use crate::quantity::Quantity;
use crate::view::{BadgeView, CartSummary};

/// Access to the collaborators, for steps shared between flows.
pub trait HasPorts: Send + Sync + 'static {
  fn ports(&self) -> &CartPorts;

  /// Where shared steps leave the refreshed badge.
  fn set_badge(&mut self, badge: BadgeView);
}

macro_rules! impl_has_ports {
  ($($ctx:ty),+ $(,)?) => {
    $(
      impl HasPorts for $ctx {
        fn ports(&self) -> &CartPorts {
          &self.ports
        }

        fn set_badge(&mut self, badge: BadgeView) {
          self.badge = Some(badge);
        }
      }
    )+
  };
}

impl_has_ports!(AddToCartCtx, UpdateQuantityCtx, RemoveItemCtx, ClearCartCtx);

#[derive(Clone)]
pub struct AddToCartCtx {
  pub ports: CartPorts,
  pub product_id: ProductId,
  pub product_name: String,
  pub quantity: Quantity,
  pub login_required: bool,
  pub added_item: Option<CartItem>,
  pub badge: Option<BadgeView>,
}

impl AddToCartCtx {
  pub fn new(ports: CartPorts, product_id: ProductId, product_name: String, quantity: Quantity) -> Self {
    Self {
      ports,
      product_id,
      product_name,
      quantity,
      login_required: false,
      added_item: None,
      badge: None,
    }
  }
}

#[derive(Clone)]
pub struct UpdateQuantityCtx {
  pub ports: CartPorts,
  pub item_id: ItemId,
  /// Quantity as requested by the page, before clamping.
  pub requested: i64,
  pub applied: Option<Quantity>,
  pub reloaded: Option<Vec<CartItem>>,
  pub badge: Option<BadgeView>,
}

impl UpdateQuantityCtx {
  pub fn new(ports: CartPorts, item_id: ItemId, requested: i64) -> Self {
    Self {
      ports,
      item_id,
      requested,
      applied: None,
      reloaded: None,
      badge: None,
    }
  }
}

#[derive(Clone)]
pub struct RemoveItemCtx {
  pub ports: CartPorts,
  pub item_id: ItemId,
  pub confirmed: bool,
  pub removed: bool,
  pub remaining: Option<CartSummary>,
  pub badge: Option<BadgeView>,
}

impl RemoveItemCtx {
  pub fn new(ports: CartPorts, item_id: ItemId) -> Self {
    Self {
      ports,
      item_id,
      confirmed: false,
      removed: false,
      remaining: None,
      badge: None,
    }
  }
}

#[derive(Clone)]
pub struct ClearCartCtx {
  pub ports: CartPorts,
  pub confirmed: bool,
  pub reloaded: Option<Vec<CartItem>>,
  pub badge: Option<BadgeView>,
}

impl ClearCartCtx {
  pub fn new(ports: CartPorts) -> Self {
    Self {
      ports,
      confirmed: false,
      reloaded: None,
      badge: None,
    }
  }
}

#[derive(Clone)]
pub struct PaymentCtx {
  pub ports: CartPorts,
  pub redirect: Option<PaymentRedirect>,
}

impl PaymentCtx {
  pub fn new(ports: CartPorts) -> Self {
    Self { ports, redirect: None }
  }
}
