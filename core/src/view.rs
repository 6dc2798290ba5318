// core/src/view.rs

//! Pure description of what the cart page should show.
//!
//! [`render`] turns the authoritative item list into a [`CartView`]; the
//! [`CartRenderer`](crate::render::CartRenderer) decides how to draw it.

use crate::models::{CartItem, ItemId};
use crate::quantity::Quantity;
use crate::settings::CartSettings;
use crate::totals::CartTotals;
use serde::Serialize;

/// Price column of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriceTag {
  Regular(i64),
  /// List price struck through next to the promotion price.
  Promotion { list: i64, promotion: i64 },
}

impl PriceTag {
  pub fn charged(&self) -> i64 {
    match self {
      PriceTag::Regular(price) => *price,
      PriceTag::Promotion { promotion, .. } => *promotion,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRow {
  pub item_id: ItemId,
  pub product_name: String,
  pub image_src: String,
  pub price: PriceTag,
  pub quantity: u32,
  pub line_total: i64,
  /// Quantity requested by the row's `-` button.
  pub decrease_to: Quantity,
  /// Quantity requested by the row's `+` button.
  pub increase_to: Quantity,
}

/// Totals block plus the empty-state flag. Checkout is enabled iff the cart
/// has items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
  pub totals: CartTotals,
  pub empty: bool,
}

impl CartSummary {
  pub fn empty() -> Self {
    Self {
      totals: CartTotals::ZERO,
      empty: true,
    }
  }

  pub fn from_items(items: &[CartItem], settings: &CartSettings) -> Self {
    if items.is_empty() {
      return Self::empty();
    }
    Self {
      totals: CartTotals::from_items(items, settings.vat_percent),
      empty: false,
    }
  }

  pub fn checkout_enabled(&self) -> bool {
    !self.empty
  }

  pub fn subtotal_label(&self) -> String {
    format_total(self.totals.subtotal)
  }

  pub fn tax_label(&self) -> String {
    format_total(self.totals.tax)
  }

  pub fn total_label(&self) -> String {
    format_total(self.totals.total)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
  pub rows: Vec<CartRow>,
  pub summary: CartSummary,
}

impl CartView {
  pub fn empty() -> Self {
    Self {
      rows: Vec::new(),
      summary: CartSummary::empty(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.summary.empty
  }
}

/// The cart badge in the page header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BadgeView {
  Hidden,
  Count(u64),
  /// More items than the cap; shown as `"{cap}+"`.
  Capped(u32),
}

impl BadgeView {
  pub fn from_count(count: u64, cap: u32) -> Self {
    if count == 0 {
      BadgeView::Hidden
    } else if count > u64::from(cap) {
      BadgeView::Capped(cap)
    } else {
      BadgeView::Count(count)
    }
  }

  /// Sums quantities across items.
  pub fn from_items(items: &[CartItem], cap: u32) -> Self {
    let count = items.iter().map(|item| u64::from(item.quantity)).sum();
    Self::from_count(count, cap)
  }

  pub fn is_visible(&self) -> bool {
    !matches!(self, BadgeView::Hidden)
  }

  pub fn label(&self) -> Option<String> {
    match self {
      BadgeView::Hidden => None,
      BadgeView::Count(count) => Some(count.to_string()),
      BadgeView::Capped(cap) => Some(format!("{cap}+")),
    }
  }
}

/// Builds the cart view from the authoritative item list.
pub fn render(items: &[CartItem], settings: &CartSettings) -> CartView {
  let rows = items.iter().map(|item| render_row(item, settings)).collect();
  CartView {
    rows,
    summary: CartSummary::from_items(items, settings),
  }
}

fn render_row(item: &CartItem, settings: &CartSettings) -> CartRow {
  let product = &item.product;
  let price = match product.promotion_price {
    Some(promotion) if product.is_promotion => PriceTag::Promotion {
      list: product.price,
      promotion,
    },
    _ => PriceTag::Regular(product.price),
  };
  let current = i64::from(item.quantity);

  CartRow {
    item_id: item.id,
    product_name: product.name.clone(),
    image_src: image_src(product.image.as_deref(), settings),
    price,
    quantity: item.quantity,
    line_total: item.line_total(),
    decrease_to: Quantity::clamp(current - 1),
    increase_to: Quantity::clamp(current + 1),
  }
}

/// Resolves a product image: absolute URLs and `/static/` paths are kept,
/// bare file names go under the product image directory.
pub fn image_src(image: Option<&str>, settings: &CartSettings) -> String {
  match image.map(str::trim) {
    None | Some("") => settings.placeholder_image_src(),
    Some(path) if path.starts_with("http") || path.starts_with("/static/") => path.to_string(),
    Some(file) => format!("{}{}", settings.product_image_dir, file),
  }
}

/// Row amount with Chilean digit grouping: `1681` → `"$1.681"`.
pub fn format_amount(amount: i64) -> String {
  let digits = amount.unsigned_abs().to_string();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (idx, digit) in digits.chars().enumerate() {
    if idx > 0 && (digits.len() - idx) % 3 == 0 {
      grouped.push('.');
    }
    grouped.push(digit);
  }
  let sign = if amount < 0 { "-" } else { "" };
  format!("{sign}${grouped}")
}

/// Summary amount with two decimals: `1681` → `"$1681.00"`.
pub fn format_total(amount: i64) -> String {
  format!("${amount}.00")
}
