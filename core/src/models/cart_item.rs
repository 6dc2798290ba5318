// core/src/models/cart_item.rs

use super::product::Product;
use serde::{Deserialize, Serialize};

pub type ItemId = i64;

/// A product-quantity pairing held by the user's session on the server.
///
/// `quantity` is whatever the server holds. Quantities sent by the client go
/// through [`Quantity`](crate::quantity::Quantity) and are always in `[1, 99]`,
/// but repeated adds can accumulate past that on the server side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
  pub id: ItemId,
  pub product: Product,
  pub quantity: u32,
}

impl CartItem {
  /// Saturates instead of overflowing on absurd server amounts.
  pub fn line_total(&self) -> i64 {
    i64::from(self.quantity).saturating_mul(self.product.effective_price())
  }
}
