// core/src/models/product.rs

use super::amount;
use serde::{Deserialize, Deserializer, Serialize};

pub type ProductId = i64;

/// Product embedded in a cart item. Prices are tax-inclusive whole amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  #[serde(deserialize_with = "amount::deserialize")]
  pub price: i64,
  #[serde(default, deserialize_with = "null_as_false")]
  pub is_promotion: bool,
  #[serde(default, deserialize_with = "amount::deserialize_opt")]
  pub promotion_price: Option<i64>,
  #[serde(default)]
  pub image: Option<String>,
}

impl Product {
  /// A promotion only applies when it is flagged *and* priced.
  pub fn promotion_active(&self) -> bool {
    self.is_promotion && self.promotion_price.is_some()
  }

  /// Price actually charged: the promotion price when active, else the list price.
  pub fn effective_price(&self) -> i64 {
    match self.promotion_price {
      Some(promotion_price) if self.is_promotion => promotion_price,
      _ => self.price,
    }
  }
}

// A NULL promotion flag column is serialized as `null`.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
  D: Deserializer<'de>,
{
  Option::<bool>::deserialize(deserializer).map(Option::unwrap_or_default)
}
