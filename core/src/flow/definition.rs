// core/src/flow/definition.rs

//! `Flow<TData, Err>`: step list, handler registration and failure hooks.

use crate::error::FlowError;
use crate::flow::control::StepControl;
use crate::flow::shared::Shared;
use crate::flow::step::{SkipCondition, StepDef};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A step handler: takes the shared context and resolves to a
/// [`StepControl`] or the flow's error.
pub type Handler<TData, Err> = Box<
  dyn Fn(Shared<TData>) -> Pin<Box<dyn Future<Output = Result<StepControl, Err>> + Send>> + Send + Sync,
>;

/// Runs after a failed step with the rendered error message.
pub type FailureHook<TData> =
  Box<dyn Fn(Shared<TData>, String) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// An ordered list of named steps over context data `TData`.
///
/// `Err` is the error handlers return; it must absorb [`FlowError`] so that
/// engine failures (a step left without handlers) surface through the same
/// channel.
pub struct Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef<TData>>,
  pub(crate) handlers: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) failure_hooks: Vec<FailureHook<TData>>,
}

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Declares the flow's steps as `(name, optional)` pairs, in run order.
  pub fn new(name: impl Into<String>, step_defs: &[(&str, bool)]) -> Result<Self, FlowError> {
    let mut flow = Self {
      name: name.into(),
      steps: Vec::with_capacity(step_defs.len()),
      handlers: HashMap::new(),
      failure_hooks: Vec::new(),
    };
    for (step_name, optional) in step_defs {
      flow.push_step(step_name, *optional)?;
    }
    Ok(flow)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|step| step.name.as_str()).collect()
  }

  /// Appends a step after the declared ones.
  pub fn push_step(&mut self, step_name: &str, optional: bool) -> Result<(), FlowError> {
    if self.steps.iter().any(|step| step.name == step_name) {
      return Err(FlowError::DuplicateStep {
        flow: self.name.clone(),
        step: step_name.to_string(),
      });
    }
    self.steps.push(StepDef {
      name: step_name.to_string(),
      optional,
      skip_if: None,
    });
    Ok(())
  }

  /// Skips `step_name` whenever `condition` holds for the context at the time
  /// the step is reached.
  pub fn skip_if(
    &mut self,
    step_name: &str,
    condition: impl Fn(&TData) -> bool + Send + Sync + 'static,
  ) -> Result<(), FlowError> {
    let flow_name = self.name.clone();
    let step = self
      .steps
      .iter_mut()
      .find(|step| step.name == step_name)
      .ok_or_else(|| FlowError::StepNotFound {
        flow: flow_name,
        step: step_name.to_string(),
      })?;
    let condition: SkipCondition<TData> = Arc::new(condition);
    step.skip_if = Some(condition);
    Ok(())
  }

  /// Registers a handler for `step_name`. Handlers of one step run in
  /// registration order.
  pub fn on<F, HandlerErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(Shared<TData>) -> F + Send + Sync + 'static,
  ) -> Result<(), FlowError>
  where
    F: Future<Output = Result<StepControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name)?;
    let handler: Handler<TData, Err> = Box::new(move |ctx| {
      let fut = handler_fn(ctx);
      Box::pin(async move { fut.await.map_err(Into::into) })
    });
    self.handlers.entry(step_name.to_string()).or_default().push(handler);
    Ok(())
  }

  /// Registers a hook that runs when any step fails, in registration order.
  pub fn on_failure<F>(&mut self, hook_fn: impl Fn(Shared<TData>, String) -> F + Send + Sync + 'static)
  where
    F: Future<Output = ()> + Send + 'static,
  {
    let hook: FailureHook<TData> = Box::new(move |ctx, message| Box::pin(hook_fn(ctx, message)));
    self.failure_hooks.push(hook);
  }

  fn ensure_step_exists(&self, step_name: &str) -> Result<(), FlowError> {
    if self.steps.iter().any(|step| step.name == step_name) {
      Ok(())
    } else {
      Err(FlowError::StepNotFound {
        flow: self.name.clone(),
        step: step_name.to_string(),
      })
    }
  }
}

impl<TData, Err> std::fmt::Debug for Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Flow")
      .field("name", &self.name)
      .field("steps", &self.steps)
      .field("failure_hooks", &self.failure_hooks.len())
      .finish()
  }
}
