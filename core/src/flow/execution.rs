// core/src/flow/execution.rs

//! `Flow::run()`: walks the steps in order against one shared context.

use crate::error::FlowError;
use crate::flow::control::{FlowOutcome, StepControl};
use crate::flow::definition::Flow;
use crate::flow::shared::Shared;
use crate::flow::step::StepDef;
use tracing::{event, instrument, span, Instrument, Level};

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step against `ctx`.
  ///
  /// A handler returning `StepControl::Stop` ends the run with
  /// `FlowOutcome::Stopped`. A handler error, or a non-optional step with no
  /// handlers, ends it with that error after the failure hooks have run.
  #[instrument(
        name = "Flow::run",
        skip_all,
        fields(flow = %self.name, num_steps = self.steps.len()),
        err(Display)
    )]
  pub async fn run(&self, ctx: Shared<TData>) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, "Flow execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "flow_step",
        step_name = step_def.name.as_str(),
        step_index = step_idx
      );

      match self.run_step(step_def, ctx.clone()).instrument(step_span).await {
        Ok(StepControl::Continue) => {}
        Ok(StepControl::Stop) => {
          event!(Level::INFO, step_name = %step_def.name, "Flow stopped by a handler.");
          return Ok(FlowOutcome::Stopped);
        }
        Err(err) => {
          event!(Level::ERROR, step_name = %step_def.name, error = %err, "Step failed.");
          self.run_failure_hooks(ctx, err.to_string()).await;
          return Err(err);
        }
      }
    }

    event!(Level::DEBUG, "Flow execution completed.");
    Ok(FlowOutcome::Completed)
  }

  async fn run_step(&self, step_def: &StepDef<TData>, ctx: Shared<TData>) -> Result<StepControl, Err> {
    if let Some(skip_cond) = &step_def.skip_if {
      let skip = skip_cond(&*ctx.read());
      if skip {
        event!(Level::DEBUG, "Step skipped by its condition.");
        return Ok(StepControl::Continue);
      }
    }

    let handlers = match self.handlers.get(&step_def.name) {
      Some(handlers) if !handlers.is_empty() => handlers,
      _ if step_def.optional => {
        event!(Level::DEBUG, "Optional step has no handlers, skipping.");
        return Ok(StepControl::Continue);
      }
      _ => {
        return Err(Err::from(FlowError::HandlerMissing {
          flow: self.name.clone(),
          step: step_def.name.clone(),
        }));
      }
    };

    for (handler_idx, handler_fn) in handlers.iter().enumerate() {
      event!(Level::TRACE, handler_index = handler_idx, "Executing handler.");
      if handler_fn(ctx.clone()).await? == StepControl::Stop {
        return Ok(StepControl::Stop);
      }
    }
    Ok(StepControl::Continue)
  }

  async fn run_failure_hooks(&self, ctx: Shared<TData>, message: String) {
    for hook in &self.failure_hooks {
      hook(ctx.clone(), message.clone()).await;
    }
  }
}
