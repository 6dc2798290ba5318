// core/src/flows/clear_cart.rs

use crate::error::{CartError, CartResult, FlowError};
use crate::flow::{Flow, Shared, StepControl};
use crate::flows::common_steps::{off_cart_view, refresh_badge};
use crate::flows::contexts::ClearCartCtx;
use tracing::{error, info, instrument};

pub const FLOW_NAME: &str = "clear_cart";

pub const CONFIRM_PROMPT: &str = "Remove every product from the cart?";

pub fn build_clear_cart_flow() -> Result<Flow<ClearCartCtx, CartError>, FlowError> {
  let mut flow = Flow::<ClearCartCtx, CartError>::new(
    FLOW_NAME,
    &[
      ("confirm_clear", false),
      ("send_clear", false),
      ("reload_cart", false),
      ("refresh_badge", false),
    ],
  )?;

  flow.on("confirm_clear", confirm_clear)?;
  flow.on("send_clear", send_clear)?;
  flow.on("reload_cart", reload_cart)?;
  flow.skip_if("reload_cart", off_cart_view::<ClearCartCtx>)?;
  flow.on("refresh_badge", refresh_badge::<ClearCartCtx>)?;

  flow.on_failure(|_ctx: Shared<ClearCartCtx>, message: String| async move {
    error!(%message, "Clearing the cart failed.");
  });

  Ok(flow)
}

async fn confirm_clear(ctx: Shared<ClearCartCtx>) -> CartResult<StepControl> {
  let renderer = { ctx.read().ports.renderer.clone() };
  if !renderer.confirm(CONFIRM_PROMPT).await {
    info!("Clearing the cart cancelled by the user.");
    return Ok(StepControl::Stop);
  }
  ctx.write().confirmed = true;
  Ok(StepControl::Continue)
}

#[instrument(name = "clear_cart::send_clear", skip(ctx))]
async fn send_clear(ctx: Shared<ClearCartCtx>) -> CartResult<StepControl> {
  let api = { ctx.read().ports.api.clone() };
  api.clear_cart().await?;
  info!("Cart cleared.");
  Ok(StepControl::Continue)
}

async fn reload_cart(ctx: Shared<ClearCartCtx>) -> CartResult<StepControl> {
  let ports = { ctx.read().ports.clone() };
  let items = ports.load_cart().await;
  ctx.write().reloaded = Some(items);
  Ok(StepControl::Continue)
}
