//! Execution strategies of fitness evaluation.

use serde::Deserialize;

/// Decides how a population is evaluated.
///
/// Only fitness evaluation may run in parallel: selection, recombination and
/// mutation all draw from one sequential random stream.
#[derive(
  Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
  /// Evaluates individuals one after another.
  #[default]
  Sequential,
  /// Evaluates **each** individual on the [rayon] thread pool. Results land
  /// in the slots of their individuals, so population order is preserved.
  ///
  /// **For cheap fitness functions, parallelization may only decrease
  /// performance because of additional overhead introduced. Benchmark if in
  /// doubt.**
  Parallel,
}
