// core/src/flows/payment.rs

//! One-shot payment handshake: ask the backend for a gateway session, then
//! hand its token to the gateway with a form POST. No retry; a failure ends
//! the attempt and the user starts over.

use crate::error::{CartError, CartResult, FlowError};
use crate::flow::{Flow, Shared, StepControl};
use crate::flows::contexts::PaymentCtx;
use crate::render::Redirect;
use tracing::{error, info, instrument, warn};

pub const FLOW_NAME: &str = "initiate_payment";

pub const FAILURE_ALERT: &str = "An error occurred while processing the payment. Please try again.";

const FALLBACK_MESSAGE: &str = "Could not start the payment";

pub fn build_payment_flow() -> Result<Flow<PaymentCtx, CartError>, FlowError> {
  let mut flow = Flow::<PaymentCtx, CartError>::new(
    FLOW_NAME,
    &[
      ("show_overlay", false),
      ("request_session", false),
      ("submit_redirect", false),
    ],
  )?;

  flow.on("show_overlay", show_overlay)?;
  flow.on("request_session", request_session)?;
  flow.on("submit_redirect", submit_redirect)?;

  flow.on_failure(|ctx: Shared<PaymentCtx>, message: String| async move {
    let renderer = { ctx.read().ports.renderer.clone() };
    error!(%message, "Payment handshake failed.");
    renderer.alert(FAILURE_ALERT);
    renderer.set_loading_overlay(false);
  });

  Ok(flow)
}

async fn show_overlay(ctx: Shared<PaymentCtx>) -> CartResult<StepControl> {
  ctx.read().ports.renderer.set_loading_overlay(true);
  Ok(StepControl::Continue)
}

#[instrument(name = "payment::request_session", skip(ctx))]
async fn request_session(ctx: Shared<PaymentCtx>) -> CartResult<StepControl> {
  let api = { ctx.read().ports.api.clone() };

  info!("Requesting a payment session.");
  let response = api.initiate_payment().await.map_err(|err| {
    warn!(error = %err, "Backend refused to start the payment.");
    CartError::rejected(&err, FALLBACK_MESSAGE)
  })?;

  let redirect = response.into_redirect()?;
  ctx.write().redirect = Some(redirect);
  Ok(StepControl::Continue)
}

async fn submit_redirect(ctx: Shared<PaymentCtx>) -> CartResult<StepControl> {
  let (renderer, redirect, token_field) = {
    let guard = ctx.read();
    let redirect = guard
      .redirect
      .clone()
      .ok_or_else(|| FlowError::Internal("payment session missing before redirect".to_string()))?;
    (
      guard.ports.renderer.clone(),
      redirect,
      guard.ports.settings.payment_token_field.clone(),
    )
  };

  info!(url = %redirect.url, "Redirecting to the payment gateway.");
  renderer.redirect(&Redirect::FormPost {
    action: redirect.url,
    fields: vec![(token_field, redirect.token)],
  });
  Ok(StepControl::Continue)
}
