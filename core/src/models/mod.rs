// core/src/models/mod.rs

//! Cart data as served by the backend.

pub(crate) mod amount;
pub mod cart_item;
pub mod product;

pub use cart_item::{CartItem, ItemId};
pub use product::{Product, ProductId};
