// core/src/flows/remove_item.rs

use crate::error::{CartError, CartResult, FlowError};
use crate::flow::{Flow, Shared, StepControl};
use crate::flows::common_steps::{off_cart_view, refresh_badge};
use crate::flows::contexts::RemoveItemCtx;
use crate::render::ControlState;
use tracing::{error, info, instrument};

pub const FLOW_NAME: &str = "remove_item";

pub const CONFIRM_PROMPT: &str = "Are you sure you want to remove this product from the cart?";

pub fn build_remove_item_flow() -> Result<Flow<RemoveItemCtx, CartError>, FlowError> {
  let mut flow = Flow::<RemoveItemCtx, CartError>::new(
    FLOW_NAME,
    &[
      ("confirm_removal", false),
      ("mark_busy", false),
      ("send_delete", false),
      ("fade_out_row", false),
      ("recompute_totals", false),
      ("refresh_badge", false),
    ],
  )?;

  flow.on("confirm_removal", confirm_removal)?;
  flow.on("mark_busy", mark_busy)?;
  flow.on("send_delete", send_delete)?;
  flow.on("fade_out_row", fade_out_row)?;
  flow.skip_if("fade_out_row", off_cart_view::<RemoveItemCtx>)?;
  flow.on("recompute_totals", recompute_totals)?;
  flow.skip_if("recompute_totals", off_cart_view::<RemoveItemCtx>)?;
  flow.on("refresh_badge", refresh_badge::<RemoveItemCtx>)?;

  // Put the delete control back so the user can try again; nothing else is shown.
  flow.on_failure(|ctx: Shared<RemoveItemCtx>, message: String| async move {
    let (renderer, item_id) = {
      let guard = ctx.read();
      (guard.ports.renderer.clone(), guard.item_id)
    };
    error!(item_id, %message, "Cart item removal failed.");
    renderer.set_remove_control(item_id, ControlState::Idle);
  });

  Ok(flow)
}

async fn confirm_removal(ctx: Shared<RemoveItemCtx>) -> CartResult<StepControl> {
  let (renderer, item_id) = {
    let guard = ctx.read();
    (guard.ports.renderer.clone(), guard.item_id)
  };

  if !renderer.confirm(CONFIRM_PROMPT).await {
    info!(item_id, "Removal cancelled by the user.");
    return Ok(StepControl::Stop);
  }
  ctx.write().confirmed = true;
  Ok(StepControl::Continue)
}

async fn mark_busy(ctx: Shared<RemoveItemCtx>) -> CartResult<StepControl> {
  let guard = ctx.read();
  guard.ports.renderer.set_remove_control(guard.item_id, ControlState::Busy);
  Ok(StepControl::Continue)
}

#[instrument(name = "remove_item::send_delete", skip(ctx))]
async fn send_delete(ctx: Shared<RemoveItemCtx>) -> CartResult<StepControl> {
  let (api, item_id) = {
    let guard = ctx.read();
    (guard.ports.api.clone(), guard.item_id)
  };

  api.remove_item(item_id).await?;
  info!(item_id, "Cart item removed.");
  ctx.write().removed = true;
  Ok(StepControl::Continue)
}

async fn fade_out_row(ctx: Shared<RemoveItemCtx>) -> CartResult<StepControl> {
  let (renderer, item_id, duration) = {
    let guard = ctx.read();
    (guard.ports.renderer.clone(), guard.item_id, guard.ports.settings.row_fade)
  };
  renderer.fade_out_row(item_id, duration).await;
  Ok(StepControl::Continue)
}

/// Totals come from a fresh fetch of what remains, never from subtracting
/// the removed row.
async fn recompute_totals(ctx: Shared<RemoveItemCtx>) -> CartResult<StepControl> {
  let ports = { ctx.read().ports.clone() };
  let remaining = ports.refresh_summary().await;
  ctx.write().remaining = remaining;
  Ok(StepControl::Continue)
}
