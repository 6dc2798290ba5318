// core/src/flows/common_steps.rs

//! Steps shared by several cart flows.

use crate::error::CartResult;
use crate::flow::{Shared, StepControl};
use crate::flows::contexts::HasPorts;

/// Re-fetches the cart count and redraws the badge. Never fails: a failed
/// fetch hides the badge.
pub async fn refresh_badge<T: HasPorts>(ctx: Shared<T>) -> CartResult<StepControl> {
  let ports = { ctx.read().ports().clone() };
  let badge = ports.update_cart_count().await;
  ctx.write().set_badge(badge);
  Ok(StepControl::Continue)
}

/// Skip condition for steps that only make sense on the cart page.
pub fn off_cart_view<T: HasPorts>(ctx: &T) -> bool {
  !ctx.ports().renderer.is_cart_view()
}
