// core/src/flows/mod.rs

//! Defines the flows behind every cart-mutating operation.

use crate::error::{CartError, FlowError};
use crate::flow::Flow;

pub mod common_steps;
pub mod contexts;

pub mod add_to_cart;
pub mod clear_cart;
pub mod payment;
pub mod remove_item;
pub mod update_quantity;

use contexts::{AddToCartCtx, ClearCartCtx, PaymentCtx, RemoveItemCtx, UpdateQuantityCtx};

/// Every cart flow, built once when the view model is set up.
#[derive(Debug)]
pub struct CartFlows {
  pub add_to_cart: Flow<AddToCartCtx, CartError>,
  pub update_quantity: Flow<UpdateQuantityCtx, CartError>,
  pub remove_item: Flow<RemoveItemCtx, CartError>,
  pub clear_cart: Flow<ClearCartCtx, CartError>,
  pub payment: Flow<PaymentCtx, CartError>,
}

impl CartFlows {
  pub fn build() -> Result<Self, FlowError> {
    tracing::debug!("Building cart flows...");
    Ok(Self {
      add_to_cart: add_to_cart::build_add_to_cart_flow()?,
      update_quantity: update_quantity::build_update_quantity_flow()?,
      remove_item: remove_item::build_remove_item_flow()?,
      clear_cart: clear_cart::build_clear_cart_flow()?,
      payment: payment::build_payment_flow()?,
    })
  }
}
