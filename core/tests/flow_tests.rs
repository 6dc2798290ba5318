// tests/flow_tests.rs
mod common;

use cartflow::{Flow, FlowError, FlowOutcome, OperationState, Shared, StepControl};
use common::setup_tracing;
use serial_test::serial;

#[derive(Debug, Clone, Default)]
struct TraceCtx {
  visited: Vec<String>,
  skip_second: bool,
  stop_at: Option<String>,
  fail_at: Option<String>,
  failure_messages: Vec<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
enum TestError {
  #[error("flow: {0}")]
  Flow(#[from] FlowError),
  #[error("step {0} blew up")]
  Boom(String),
}

fn visit(step: &'static str) -> impl Fn(Shared<TraceCtx>) -> std::future::Ready<Result<StepControl, TestError>> {
  move |ctx: Shared<TraceCtx>| {
    let mut guard = ctx.write();
    guard.visited.push(step.to_string());
    let result = if guard.fail_at.as_deref() == Some(step) {
      Err(TestError::Boom(step.to_string()))
    } else if guard.stop_at.as_deref() == Some(step) {
      Ok(StepControl::Stop)
    } else {
      Ok(StepControl::Continue)
    };
    std::future::ready(result)
  }
}

fn three_step_flow() -> Flow<TraceCtx, TestError> {
  let mut flow = Flow::<TraceCtx, TestError>::new("trace", &[("first", false), ("second", false), ("third", false)])
    .expect("distinct step names");
  flow.on("first", visit("first")).unwrap();
  flow.on("second", visit("second")).unwrap();
  flow.on("third", visit("third")).unwrap();
  flow.on_failure(|ctx: Shared<TraceCtx>, message: String| async move {
    ctx.write().failure_messages.push(message);
  });
  flow
}

#[tokio::test]
#[serial]
async fn test_flow_runs_steps_in_order() {
  setup_tracing();
  let flow = three_step_flow();
  let ctx = Shared::new(TraceCtx::default());

  let result = flow.run(ctx.clone()).await;

  assert_eq!(result, Ok(FlowOutcome::Completed));
  assert_eq!(OperationState::settled(&result), OperationState::Applied);
  let guard = ctx.read();
  assert_eq!(guard.visited, vec!["first", "second", "third"]);
  assert!(guard.failure_messages.is_empty());
}

#[tokio::test]
#[serial]
async fn test_flow_stops_when_a_step_says_so() {
  setup_tracing();
  let flow = three_step_flow();
  let ctx = Shared::new(TraceCtx {
    stop_at: Some("second".to_string()),
    ..TraceCtx::default()
  });

  let result = flow.run(ctx.clone()).await;

  assert_eq!(result, Ok(FlowOutcome::Stopped));
  assert_eq!(OperationState::settled(&result), OperationState::Idle);
  assert_eq!(ctx.read().visited, vec!["first", "second"]);
}

#[tokio::test]
#[serial]
async fn test_skip_condition_reads_current_context() {
  setup_tracing();
  let mut flow = three_step_flow();
  flow.skip_if("second", |ctx: &TraceCtx| ctx.skip_second).unwrap();
  let ctx = Shared::new(TraceCtx {
    skip_second: true,
    ..TraceCtx::default()
  });

  assert_eq!(flow.run(ctx.clone()).await, Ok(FlowOutcome::Completed));
  assert_eq!(ctx.read().visited, vec!["first", "third"]);

  // A handler earlier in the run can flip the condition.
  let mut flow = three_step_flow();
  flow.skip_if("third", |ctx: &TraceCtx| ctx.skip_second).unwrap();
  flow
    .on("first", |ctx: Shared<TraceCtx>| async move {
      ctx.write().skip_second = true;
      Ok::<_, TestError>(StepControl::Continue)
    })
    .unwrap();
  let ctx = Shared::new(TraceCtx::default());

  flow.run(ctx.clone()).await.unwrap();
  assert_eq!(ctx.read().visited, vec!["first", "second"]);
}

#[tokio::test]
#[serial]
async fn test_handler_error_runs_failure_hooks_and_aborts() {
  setup_tracing();
  let flow = three_step_flow();
  let ctx = Shared::new(TraceCtx {
    fail_at: Some("second".to_string()),
    ..TraceCtx::default()
  });

  let result = flow.run(ctx.clone()).await;

  assert_eq!(result, Err(TestError::Boom("second".to_string())));
  assert_eq!(OperationState::settled(&result), OperationState::Failed);
  let guard = ctx.read();
  assert_eq!(guard.visited, vec!["first", "second"]);
  assert_eq!(guard.failure_messages, vec!["step second blew up"]);
}

#[tokio::test]
#[serial]
async fn test_missing_handler_fails_unless_optional() {
  setup_tracing();
  let mut flow = Flow::<TraceCtx, TestError>::new("gaps", &[("present", false), ("absent", false)]).unwrap();
  flow.on("present", visit("present")).unwrap();

  let err = flow.run(Shared::new(TraceCtx::default())).await.unwrap_err();
  assert_eq!(
    err,
    TestError::Flow(FlowError::HandlerMissing {
      flow: "gaps".to_string(),
      step: "absent".to_string()
    })
  );

  let mut flow = Flow::<TraceCtx, TestError>::new("gaps", &[("present", false), ("absent", true)]).unwrap();
  flow.on("present", visit("present")).unwrap();
  let result = flow.run(Shared::new(TraceCtx::default())).await;
  assert_eq!(result, Ok(FlowOutcome::Completed));
}

#[tokio::test]
#[serial]
async fn test_handlers_of_one_step_run_in_registration_order() {
  setup_tracing();
  let mut flow = Flow::<TraceCtx, TestError>::new("multi", &[("only", false)]).unwrap();
  flow.on("only", visit("a")).unwrap();
  flow.on("only", visit("b")).unwrap();
  let ctx = Shared::new(TraceCtx::default());

  flow.run(ctx.clone()).await.unwrap();
  assert_eq!(ctx.read().visited, vec!["a", "b"]);
}

#[test]
fn test_registration_errors_are_reported() {
  let err = Flow::<TraceCtx, TestError>::new("dup", &[("a", false), ("a", true)]).unwrap_err();
  assert_eq!(
    err,
    FlowError::DuplicateStep {
      flow: "dup".to_string(),
      step: "a".to_string()
    }
  );

  let mut flow = Flow::<TraceCtx, TestError>::new("reg", &[("a", false)]).unwrap();
  let err = flow.on("missing", visit("missing")).unwrap_err();
  assert!(matches!(err, FlowError::StepNotFound { ref step, .. } if step == "missing"));
  assert!(flow.skip_if("missing", |_: &TraceCtx| true).is_err());

  flow.push_step("b", true).unwrap();
  assert_eq!(flow.step_names(), vec!["a", "b"]);
  assert!(flow.push_step("b", false).is_err());
  assert_eq!(flow.name(), "reg");
}
