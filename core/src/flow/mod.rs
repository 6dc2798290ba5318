// core/src/flow/mod.rs

//! A small step engine: every cart mutation is a [`Flow`] of named async
//! steps over [`Shared`] context data, with failure hooks that put the page
//! back into a usable state.

pub mod control;
pub mod definition;
pub mod execution;
pub mod shared;
pub mod step;

pub use control::{FlowOutcome, OperationState, StepControl};
pub use definition::{FailureHook, Flow, Handler};
pub use shared::Shared;
pub use step::{SkipCondition, StepDef};
