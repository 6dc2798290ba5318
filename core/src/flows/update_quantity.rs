// core/src/flows/update_quantity.rs

use crate::api::UpdateItemRequest;
use crate::error::{CartError, CartResult, FlowError};
use crate::flow::{Flow, Shared, StepControl};
use crate::flows::common_steps::{off_cart_view, refresh_badge};
use crate::flows::contexts::UpdateQuantityCtx;
use crate::quantity::Quantity;
use tracing::{debug, error, info, instrument};

pub const FLOW_NAME: &str = "update_quantity";

pub fn build_update_quantity_flow() -> Result<Flow<UpdateQuantityCtx, CartError>, FlowError> {
  let mut flow = Flow::<UpdateQuantityCtx, CartError>::new(
    FLOW_NAME,
    &[
      ("clamp_quantity", false),
      ("send_update", false),
      ("reload_cart", false),
      ("refresh_badge", false),
    ],
  )?;

  flow.on("clamp_quantity", clamp_quantity)?;
  flow.on("send_update", send_update)?;
  flow.on("reload_cart", reload_cart)?;
  flow.skip_if("reload_cart", off_cart_view::<UpdateQuantityCtx>)?;
  // Runs on every page, cart view or not.
  flow.on("refresh_badge", refresh_badge::<UpdateQuantityCtx>)?;

  flow.on_failure(|ctx: Shared<UpdateQuantityCtx>, message: String| async move {
    let item_id = ctx.read().item_id;
    error!(item_id, %message, "Quantity update failed.");
  });

  Ok(flow)
}

async fn clamp_quantity(ctx: Shared<UpdateQuantityCtx>) -> CartResult<StepControl> {
  let mut guard = ctx.write();
  let quantity = Quantity::clamp(guard.requested);
  if i64::from(quantity.get()) != guard.requested {
    debug!(requested = guard.requested, clamped = %quantity, "Requested quantity clamped.");
  }
  guard.applied = Some(quantity);
  Ok(StepControl::Continue)
}

#[instrument(name = "update_quantity::send_update", skip(ctx))]
async fn send_update(ctx: Shared<UpdateQuantityCtx>) -> CartResult<StepControl> {
  let (api, item_id, quantity) = {
    let guard = ctx.read();
    let quantity = guard
      .applied
      .ok_or_else(|| FlowError::Internal("quantity not clamped before update".to_string()))?;
    (guard.ports.api.clone(), guard.item_id, quantity)
  };

  api.update_item(item_id, &UpdateItemRequest { quantity }).await?;
  info!(item_id, quantity = %quantity, "Cart item quantity updated.");
  Ok(StepControl::Continue)
}

/// Full re-fetch and re-render so totals stay authoritative.
async fn reload_cart(ctx: Shared<UpdateQuantityCtx>) -> CartResult<StepControl> {
  let ports = { ctx.read().ports.clone() };
  let items = ports.load_cart().await;
  ctx.write().reloaded = Some(items);
  Ok(StepControl::Continue)
}
