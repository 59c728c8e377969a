//! Termination conditions of a run.

use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

/// Terminates the algorithm as soon as a certain number of generations have
/// passed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GenerationTerminator(pub usize);

impl GenerationTerminator {
  /// If returns `true`, the algorithm is terminated.
  pub fn terminate(&self, generation: usize) -> bool {
    generation >= self.0
  }
}

/// A cloneable flag that asks a running algorithm to stop.
///
/// The flag is polled between generations only, so the generation in
/// progress always completes.
///
/// # Examples
/// ```
/// use forklift_ga::termination::StopHandle;
///
/// let handle = StopHandle::default();
/// let remote = handle.clone();
/// remote.stop();
/// assert!(handle.is_stopped());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
  /// Raises the flag. Every clone of this handle observes it.
  pub fn stop(&self) {
    self.0.store(true, Ordering::Relaxed);
  }

  /// Returns `true` once [`StopHandle::stop`] was called on any clone.
  pub fn is_stopped(&self) -> bool {
    self.0.load(Ordering::Relaxed)
  }
}
