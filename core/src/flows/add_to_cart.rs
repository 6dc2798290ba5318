// core/src/flows/add_to_cart.rs

use crate::api::AddItemRequest;
use crate::error::{CartError, CartResult, FlowError};
use crate::flow::{Flow, Shared, StepControl};
use crate::flows::common_steps::refresh_badge;
use crate::flows::contexts::AddToCartCtx;
use crate::render::{Notification, Redirect};
use tracing::{error, info, instrument, warn};

pub const FLOW_NAME: &str = "add_to_cart";

const FALLBACK_MESSAGE: &str = "Could not add the product to the cart";

pub fn build_add_to_cart_flow() -> Result<Flow<AddToCartCtx, CartError>, FlowError> {
  let mut flow = Flow::<AddToCartCtx, CartError>::new(
    FLOW_NAME,
    &[
      ("require_session", false),
      ("create_item", false),
      ("notify_added", false),
      ("refresh_badge", false),
    ],
  )?;

  flow.on("require_session", require_session)?;
  flow.on("create_item", create_item)?;
  flow.on("notify_added", notify_added)?;
  flow.on("refresh_badge", refresh_badge::<AddToCartCtx>)?;

  flow.on_failure(|ctx: Shared<AddToCartCtx>, message: String| async move {
    let renderer = { ctx.read().ports.renderer.clone() };
    error!(%message, "Add to cart failed.");
    renderer.alert(&format!("Error adding the product to the cart: {message}"));
  });

  Ok(flow)
}

/// Anonymous users are sent to the login page instead of calling the API.
#[instrument(name = "add_to_cart::require_session", skip(ctx))]
async fn require_session(ctx: Shared<AddToCartCtx>) -> CartResult<StepControl> {
  let (renderer, login_path) = {
    let guard = ctx.read();
    (guard.ports.renderer.clone(), guard.ports.settings.login_path.clone())
  };

  if renderer.is_authenticated() {
    return Ok(StepControl::Continue);
  }

  info!(%login_path, "No authenticated session, redirecting to login.");
  renderer.redirect(&Redirect::Login { path: login_path });
  ctx.write().login_required = true;
  Ok(StepControl::Stop)
}

#[instrument(name = "add_to_cart::create_item", skip(ctx))]
async fn create_item(ctx: Shared<AddToCartCtx>) -> CartResult<StepControl> {
  let (api, request) = {
    let guard = ctx.read();
    let request = AddItemRequest {
      product_id: guard.product_id,
      quantity: guard.quantity,
    };
    (guard.ports.api.clone(), request)
  };

  info!(product_id = request.product_id, quantity = %request.quantity, "Sending add to cart request.");
  match api.add_item(&request).await {
    Ok(item) => {
      info!(item_id = item.id, quantity = item.quantity, "Cart item created.");
      ctx.write().added_item = Some(item);
      Ok(StepControl::Continue)
    }
    Err(err) => {
      warn!(product_id = request.product_id, error = %err, "Backend refused the add to cart request.");
      Err(CartError::rejected(&err, FALLBACK_MESSAGE))
    }
  }
}

async fn notify_added(ctx: Shared<AddToCartCtx>) -> CartResult<StepControl> {
  let (renderer, notification) = {
    let guard = ctx.read();
    let notification = Notification {
      message: format!("{} added to the cart", guard.product_name),
      dismiss_after: guard.ports.settings.notification_ttl,
    };
    (guard.ports.renderer.clone(), notification)
  };
  renderer.notify(&notification);
  Ok(StepControl::Continue)
}
