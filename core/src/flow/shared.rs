// core/src/flow/shared.rs

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Context data shared by the steps of a flow run, with interior mutability
/// through `parking_lot::RwLock`.
///
/// IMPORTANT: guards are blocking and MUST be dropped before any `.await`.
/// Copy what a step needs out of the guard in a block, then await.
#[derive(Debug)]
pub struct Shared<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> Shared<T> {
  pub fn new(data: T) -> Self {
    Shared(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }
}

impl<T: Send + Sync + 'static> Clone for Shared<T> {
  fn clone(&self) -> Self {
    Shared(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for Shared<T> {
  fn default() -> Self {
    Self::new(T::default())
  }
}
