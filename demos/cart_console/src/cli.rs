// demos/cart_console/src/cli.rs

use cartflow::{CartCommand, ItemId, ProductId, QuantityStepper};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cart_console", about = "Drive a shop cart from the terminal", long_about = None)]
pub struct Cli {
  /// Answer "yes" to every confirmation prompt.
  #[arg(short, long, global = true, env = "CART_ASSUME_YES")]
  pub yes: bool,

  /// Emit logs as JSON lines.
  #[arg(long, global = true, env = "CART_LOG_JSON")]
  pub log_json: bool,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// Load the cart page and refresh the badge.
  Init,
  /// Show the cart with its totals.
  Show,
  /// Show the cart badge.
  Count,
  /// Add a product, as from its product page.
  Add {
    product_id: ProductId,
    /// Quantity as typed in the stepper; clamped into 1..=99.
    #[arg(short, long, default_value = "1")]
    quantity: String,
    /// Product name used in the confirmation notice.
    #[arg(short, long, default_value = "Product")]
    name: String,
  },
  /// Set the quantity of a cart line.
  Update {
    item_id: ItemId,
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
  },
  /// Remove a cart line.
  Remove { item_id: ItemId },
  /// Remove every cart line.
  Clear,
  /// Start the payment handshake.
  Pay,
}

impl Commands {
  /// Every command except `add` runs on the cart page.
  pub fn on_cart_view(&self) -> bool {
    !matches!(self, Commands::Add { .. })
  }

  pub fn into_cart_command(self) -> CartCommand {
    match self {
      Commands::Init => CartCommand::PageReady,
      Commands::Show => CartCommand::LoadCart,
      Commands::Count => CartCommand::RefreshCount,
      Commands::Add {
        product_id,
        quantity,
        name,
      } => {
        let mut stepper = QuantityStepper::default();
        CartCommand::AddToCart {
          product_id,
          product_name: name,
          quantity: stepper.on_input_changed(&quantity),
        }
      }
      Commands::Update { item_id, quantity } => CartCommand::UpdateQuantity { item_id, quantity },
      Commands::Remove { item_id } => CartCommand::RemoveItem { item_id },
      Commands::Clear => CartCommand::ClearCart,
      Commands::Pay => CartCommand::Checkout,
    }
  }
}
