// demos/cart_console/src/ui/terminal.rs

//! `CartRenderer` that draws the cart page as plain text on stdout.

use async_trait::async_trait;
use cartflow::view::{format_amount, format_total};
use cartflow::{
  BadgeView, CartRenderer, CartSummary, CartView, ControlState, Endpoints, ItemId, Notification, PriceTag, Redirect,
};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone)]
pub struct TerminalRenderer {
  endpoints: Endpoints,
  cart_view: bool,
  authenticated: bool,
  assume_yes: bool,
}

impl TerminalRenderer {
  pub fn new(endpoints: Endpoints, cart_view: bool, authenticated: bool, assume_yes: bool) -> Self {
    Self {
      endpoints,
      cart_view,
      authenticated,
      assume_yes,
    }
  }
}

pub fn cart_lines(view: &CartView) -> Vec<String> {
  if view.is_empty() {
    let mut lines = vec!["Your cart is empty.".to_string()];
    lines.extend(summary_lines(&view.summary));
    return lines;
  }

  let mut lines: Vec<String> = view
    .rows
    .iter()
    .map(|row| {
      let price = match row.price {
        PriceTag::Regular(price) => format_amount(price),
        PriceTag::Promotion { list, promotion } => {
          format!("{} (was {})", format_amount(promotion), format_amount(list))
        }
      };
      format!(
        "#{:<5} {:<30} {:>14} x {:<3} = {:>12}   [{}]",
        row.item_id,
        row.product_name,
        price,
        row.quantity,
        format_amount(row.line_total),
        row.image_src
      )
    })
    .collect();
  lines.extend(summary_lines(&view.summary));
  lines
}

pub fn summary_lines(summary: &CartSummary) -> Vec<String> {
  let checkout = if summary.checkout_enabled() { "enabled" } else { "disabled" };
  vec![
    format!("Subtotal: {}", summary.subtotal_label()),
    format!("VAT:      {}", summary.tax_label()),
    format!("Total:    {}", summary.total_label()),
    format!("Checkout {checkout}"),
  ]
}

/// Self-submitting form that hands the payment token to the gateway.
pub fn form_post_html(action: &str, fields: &[(String, String)]) -> String {
  let inputs: String = fields
    .iter()
    .map(|(name, value)| {
      format!(
        "  <input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
        escape_html(name),
        escape_html(value)
      )
    })
    .collect();
  format!(
    "<form method=\"POST\" action=\"{}\">\n{inputs}</form>\n<script>document.forms[0].submit();</script>",
    escape_html(action)
  )
}

fn escape_html(raw: &str) -> String {
  let mut escaped = String::with_capacity(raw.len());
  for ch in raw.chars() {
    match ch {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#39;"),
      _ => escaped.push(ch),
    }
  }
  escaped
}

#[async_trait]
impl CartRenderer for TerminalRenderer {
  fn is_cart_view(&self) -> bool {
    self.cart_view
  }

  fn is_authenticated(&self) -> bool {
    self.authenticated
  }

  fn show_cart(&self, view: &CartView) {
    for line in cart_lines(view) {
      println!("{line}");
    }
  }

  fn show_summary(&self, summary: &CartSummary) {
    if summary.empty {
      println!("Your cart is empty.");
    }
    for line in summary_lines(summary) {
      println!("{line}");
    }
  }

  fn show_badge(&self, badge: &BadgeView) {
    match badge.label() {
      Some(label) => println!("Cart: {label}"),
      None => println!("Cart: (hidden)"),
    }
  }

  fn notify(&self, notification: &Notification) {
    // No timer on a terminal; the message simply scrolls away.
    println!("✔ {}", notification.message);
  }

  fn alert(&self, message: &str) {
    eprintln!("! {message}");
  }

  fn set_remove_control(&self, item_id: ItemId, state: ControlState) {
    if state == ControlState::Busy {
      println!("Removing item #{item_id}...");
    }
  }

  async fn fade_out_row(&self, item_id: ItemId, duration: Duration) {
    tokio::time::sleep(duration).await;
    println!("Item #{item_id} removed.");
  }

  fn set_loading_overlay(&self, visible: bool) {
    if visible {
      println!("Processing payment...");
    }
  }

  fn redirect(&self, redirect: &Redirect) {
    match redirect {
      Redirect::Login { path } => println!("Please sign in: {}", self.endpoints.page(path)),
      Redirect::FormPost { action, fields } => println!("{}", form_post_html(action, fields)),
    }
  }

  async fn confirm(&self, prompt: &str) -> bool {
    if self.assume_yes {
      return true;
    }
    print!("{prompt} [y/N] ");
    if std::io::stdout().flush().is_err() {
      return false;
    }

    let mut answer = String::new();
    let mut stdin = BufReader::new(tokio::io::stdin());
    match stdin.read_line(&mut answer).await {
      Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
      Err(err) => {
        tracing::warn!(error = %err, "Could not read confirmation, treating it as declined.");
        false
      }
    }
  }
}
