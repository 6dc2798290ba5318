// core/src/ports.rs

//! The collaborators every cart operation works against, and the read-only
//! operations built directly on them (cart load, badge refresh).

use crate::api::CartApi;
use crate::models::CartItem;
use crate::render::CartRenderer;
use crate::settings::CartSettings;
use crate::view::{self, BadgeView, CartSummary, CartView};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Tickets guarding renders against out-of-order responses. Only the most
/// recently issued request of each kind may draw; older responses are still
/// returned to their caller.
#[derive(Debug, Default)]
struct RenderFences {
  cart: AtomicU64,
  badge: AtomicU64,
}

impl RenderFences {
  fn issue(counter: &AtomicU64) -> u64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
  }

  fn is_current(counter: &AtomicU64, ticket: u64) -> bool {
    counter.load(Ordering::SeqCst) == ticket
  }
}

/// API client, rendering port and settings, shared by the view model and
/// every flow context.
#[derive(Clone)]
pub struct CartPorts {
  pub api: Arc<dyn CartApi>,
  pub renderer: Arc<dyn CartRenderer>,
  pub settings: Arc<CartSettings>,
  fences: Arc<RenderFences>,
}

impl CartPorts {
  pub fn new(api: Arc<dyn CartApi>, renderer: Arc<dyn CartRenderer>, settings: CartSettings) -> Self {
    Self {
      api,
      renderer,
      settings: Arc::new(settings),
      fences: Arc::new(RenderFences::default()),
    }
  }

  pub fn render(&self, items: &[CartItem]) -> CartView {
    view::render(items, &self.settings)
  }

  /// Fetches the authoritative cart and, on the cart view, draws it.
  ///
  /// A non-success answer (no session) or a transport failure is the defined
  /// empty state: empty list, checkout disabled, zero totals.
  #[instrument(name = "CartPorts::load_cart", skip(self))]
  pub async fn load_cart(&self) -> Vec<CartItem> {
    let ticket = RenderFences::issue(&self.fences.cart);

    let (items, cart_view) = match self.api.fetch_cart().await {
      Ok(items) => {
        let cart_view = self.render(&items);
        (items, cart_view)
      }
      Err(err) if err.is_unauthenticated() => {
        info!("No authenticated session, showing an empty cart.");
        (Vec::new(), CartView::empty())
      }
      Err(err) => {
        warn!(error = %err, "Cart fetch failed, showing an empty cart.");
        (Vec::new(), CartView::empty())
      }
    };

    if !self.renderer.is_cart_view() {
      return items;
    }
    if RenderFences::is_current(&self.fences.cart, ticket) {
      self.renderer.show_cart(&cart_view);
    } else {
      debug!(ticket, "Discarding stale cart render.");
    }
    items
  }

  /// Refreshes the header badge from the authoritative cart.
  #[instrument(name = "CartPorts::update_cart_count", skip(self))]
  pub async fn update_cart_count(&self) -> BadgeView {
    let ticket = RenderFences::issue(&self.fences.badge);

    let badge = match self.api.fetch_cart().await {
      Ok(items) => BadgeView::from_items(&items, self.settings.badge_cap),
      Err(err) => {
        if err.is_unauthenticated() {
          debug!("No authenticated session, hiding the cart badge.");
        } else {
          warn!(error = %err, "Cart count refresh failed, hiding the cart badge.");
        }
        BadgeView::Hidden
      }
    };

    if RenderFences::is_current(&self.fences.badge, ticket) {
      self.renderer.show_badge(&badge);
    } else {
      debug!(ticket, "Discarding stale badge render.");
    }
    badge
  }

  /// Re-fetches the cart after a row was removed in place and redraws the
  /// totals block. On failure the current summary is left as is.
  #[instrument(name = "CartPorts::refresh_summary", skip(self))]
  pub async fn refresh_summary(&self) -> Option<CartSummary> {
    let ticket = RenderFences::issue(&self.fences.cart);

    match self.api.fetch_cart().await {
      Ok(items) => {
        let summary = CartSummary::from_items(&items, &self.settings);
        if RenderFences::is_current(&self.fences.cart, ticket) {
          self.renderer.show_summary(&summary);
        } else {
          debug!(ticket, "Discarding stale summary render.");
        }
        Some(summary)
      }
      Err(err) => {
        warn!(error = %err, "Could not recompute cart totals after removal.");
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::RenderFences;

  #[test]
  fn only_the_latest_ticket_is_current() {
    let fences = RenderFences::default();
    let first = RenderFences::issue(&fences.cart);
    let second = RenderFences::issue(&fences.cart);

    assert!(!RenderFences::is_current(&fences.cart, first));
    assert!(RenderFences::is_current(&fences.cart, second));
    // Cart and badge tickets are independent.
    let badge = RenderFences::issue(&fences.badge);
    assert!(RenderFences::is_current(&fences.badge, badge));
    assert!(RenderFences::is_current(&fences.cart, second));
  }
}
