// demos/cart_console/src/main.rs

mod cli;
mod config;
mod errors;
mod services;
mod ui;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::services::http_api::HttpCartApi;
use crate::ui::terminal::TerminalRenderer;

use anyhow::Context;
use cartflow::{AddOutcome, CartViewModel, ClearOutcome, CommandOutcome, ErrorKind, RemoveOutcome};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
  let builder = tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .with_writer(std::io::stderr);
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
  dotenvy::dotenv().ok(); // So .env values reach clap's `env` fallbacks
  let cli = Cli::parse();
  init_tracing(cli.log_json);

  let config = AppConfig::from_env().context("Failed to load application configuration")?;
  let api = Arc::new(HttpCartApi::new(&config).context("Failed to build the HTTP client")?);
  let renderer = Arc::new(TerminalRenderer::new(
    api.endpoints().clone(),
    cli.command.on_cart_view(),
    config.authenticated,
    cli.yes,
  ));
  let view_model = CartViewModel::new(api, renderer, config.settings.clone())?;

  match view_model.dispatch(cli.command.into_cart_command()).await {
    Ok(outcome) => {
      report(&outcome);
      Ok(ExitCode::SUCCESS)
    }
    Err(err) => {
      // User-facing errors were already shown through the renderer.
      if err.kind() == ErrorKind::Silent {
        eprintln!("Cart operation failed: {err}");
      }
      tracing::error!(error = %err, kind = ?err.kind(), "Cart command failed.");
      Ok(ExitCode::FAILURE)
    }
  }
}

fn report(outcome: &CommandOutcome) {
  match outcome {
    CommandOutcome::Added(AddOutcome::Added(item)) => {
      println!("Cart line #{} now holds {} unit(s).", item.id, item.quantity)
    }
    CommandOutcome::Added(AddOutcome::LoginRequired) => println!("Sign in to add products to the cart."),
    CommandOutcome::QuantityUpdated(quantity) => println!("Quantity set to {quantity}."),
    CommandOutcome::Removed(RemoveOutcome::Cancelled) | CommandOutcome::Cleared(ClearOutcome::Cancelled) => {
      println!("Cancelled.")
    }
    CommandOutcome::Cleared(ClearOutcome::Cleared) => println!("Cart cleared."),
    CommandOutcome::PaymentRedirected(redirect) => println!("Continue the payment at {}", redirect.url),
    CommandOutcome::PageReady(_)
    | CommandOutcome::Loaded(_)
    | CommandOutcome::Count(_)
    | CommandOutcome::Removed(RemoveOutcome::Removed) => {}
  }
}
