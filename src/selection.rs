//! Selection operators.

use std::fmt;

use rand::Rng;
use serde::Deserialize;

use crate::{individual::Individual, population::Population};

/// Chooses the parents of the next generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
  /// Fills the new population by repeatedly drawing `k` individuals uniformly
  /// with replacement and keeping a clone of the best one.
  Tournament(usize),
}

impl Selection {
  /// Builds a new population of the same size as `population`.
  /// `population` itself is left untouched.
  pub fn run<R: Rng + ?Sized>(
    &self,
    population: &Population,
    rng: &mut R,
  ) -> Population {
    match *self {
      Selection::Tournament(size) => Population::from_individuals(
        (0..population.len())
          .map(|_| tournament(population.individuals(), size, rng).clone())
          .collect(),
      ),
    }
  }
}

impl fmt::Display for Selection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Selection::Tournament(size) => write!(f, "Tournament({size})"),
    }
  }
}

/// Draws `size` contestants and returns the best of them. Among equally fit
/// contestants the first drawn one wins. A size of zero behaves like one.
fn tournament<'a, R: Rng + ?Sized>(
  individuals: &'a [Individual],
  size: usize,
  rng: &mut R,
) -> &'a Individual {
  let mut winner = &individuals[rng.gen_range(0..individuals.len())];
  for _ in 1..size {
    let contestant = &individuals[rng.gen_range(0..individuals.len())];
    if contestant.better_than(winner) {
      winner = contestant;
    }
  }
  winner
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;

  fn population(fitnesses: &[f64]) -> Population {
    let n = fitnesses.len();
    Population::from_individuals(
      fitnesses
        .iter()
        .enumerate()
        .map(|(i, &fitness)| {
          let mut genome: Vec<usize> = (0..n).collect();
          genome.rotate_left(i);
          let mut ind = Individual::new(genome).unwrap();
          ind.set_fitness(fitness);
          ind
        })
        .collect(),
    )
  }

  #[test]
  fn test_tournament_keeps_population_size() {
    let population = population(&[5.0, 3.0, 8.0, 1.0, 2.0]);
    let selected =
      Selection::Tournament(2).run(&population, &mut StdRng::seed_from_u64(1));
    assert_eq!(selected.len(), population.len());
  }

  #[test]
  fn test_tournament_winner_is_best_of_its_sample() {
    let population = population(&[5.0, 3.0, 8.0, 1.0, 2.0, 9.0, 4.0]);
    let individuals = population.individuals();
    let mut rng = StdRng::seed_from_u64(42);
    for size in 1..6 {
      for _ in 0..50 {
        let mut replay = rng.clone();
        let sample: Vec<_> = (0..size)
          .map(|_| &individuals[replay.gen_range(0..individuals.len())])
          .collect();
        let winner = tournament(individuals, size, &mut rng);
        assert!(sample.iter().all(|ind| !ind.better_than(winner)));
        assert!(sample.contains(&winner));
      }
    }
  }

  #[test]
  fn test_selection_does_not_touch_input() {
    let population = population(&[5.0, 3.0, 8.0]);
    let before = population.clone();
    Selection::Tournament(3).run(&population, &mut StdRng::seed_from_u64(7));
    assert_eq!(population, before);
  }

  #[test]
  fn test_full_size_tournament_prefers_best() {
    let population = population(&[5.0, 3.0, 8.0, 1.0]);
    let selected = Selection::Tournament(64)
      .run(&population, &mut StdRng::seed_from_u64(5));
    assert!(selected.individuals().iter().all(|ind| ind.fitness() == 1.0));
  }
}
