// core/src/flow/control.rs

//! Signals between steps and the engine, and the observable state of an
//! operation.

/// Returned by a step handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
  Continue,
  /// Halt the flow without error (user cancelled, redirect issued).
  Stop,
}

/// Outcome of a flow run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  Completed,
  Stopped,
}

/// Lifecycle of a cart-mutating operation:
/// `Idle → Pending → Applied | Failed`.
///
/// A flow that stops early (cancelled confirmation, login redirect) returns
/// to `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OperationState {
  #[default]
  Idle,
  Pending,
  Applied,
  Failed,
}

impl OperationState {
  /// State reached once a run settles.
  pub fn settled<E>(result: &Result<FlowOutcome, E>) -> Self {
    match result {
      Ok(FlowOutcome::Completed) => OperationState::Applied,
      Ok(FlowOutcome::Stopped) => OperationState::Idle,
      Err(_) => OperationState::Failed,
    }
  }
}
