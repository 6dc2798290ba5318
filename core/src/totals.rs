// core/src/totals.rs

//! Cart totals derived from the authoritative item list.
//!
//! Prices already include VAT, so the total is summed first and the net
//! subtotal is backed out of it: `subtotal = round(total / 1.19)` and
//! `tax = total - subtotal`. Totals are recomputed from scratch after every
//! fetch and never adjusted incrementally.

use crate::models::CartItem;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CartTotals {
  pub subtotal: i64,
  pub tax: i64,
  pub total: i64,
}

impl CartTotals {
  pub const ZERO: CartTotals = CartTotals { subtotal: 0, tax: 0, total: 0 };

  pub fn from_items(items: &[CartItem], vat_percent: u32) -> Self {
    let total = items
      .iter()
      .map(CartItem::line_total)
      .fold(0i64, i64::saturating_add);
    Self::from_total(total, vat_percent)
  }

  pub fn from_total(total: i64, vat_percent: u32) -> Self {
    let subtotal = net_of_vat(total, vat_percent);
    Self {
      subtotal,
      tax: total - subtotal,
      total,
    }
  }
}

/// `round(total * 100 / (100 + vat_percent))`, halves rounded up.
///
/// Integer arithmetic keeps the result exact: floor((200·t + d) / 2d) is
/// floor(t·100/d + ½) for the positive divisor d.
fn net_of_vat(total: i64, vat_percent: u32) -> i64 {
  let divisor = 100 + i128::from(vat_percent);
  let net = (200 * i128::from(total) + divisor).div_euclid(2 * divisor);
  // |net| <= |total|, so it always fits back into i64.
  net as i64
}
