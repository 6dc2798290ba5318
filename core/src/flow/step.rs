// core/src/flow/step.rs

use std::sync::Arc;

/// Evaluated against the context before a step runs; `true` skips the step.
pub type SkipCondition<TData> = Arc<dyn Fn(&TData) -> bool + Send + Sync + 'static>;

#[derive(Clone)]
pub struct StepDef<TData: 'static + Send + Sync> {
  pub name: String,
  /// Optional steps without handlers are skipped instead of failing the run.
  pub optional: bool,
  pub skip_if: Option<SkipCondition<TData>>,
}

// SkipCondition has no Debug, so report its presence only.
impl<TData: 'static + Send + Sync> std::fmt::Debug for StepDef<TData> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
