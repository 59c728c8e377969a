//! Populations of individuals.

use rand::Rng;
use rayon::prelude::*;

use crate::{
  execution::Execution,
  individual::{Fitness, Individual, Problem},
};

/// A fixed-size, ordered collection of individuals with cached statistics.
///
/// Statistics are only meaningful after [`Population::evaluate`]. Mutable
/// access to the individuals invalidates them until the next evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Population {
  individuals: Vec<Individual>,
  best: usize,
  average_fitness: Fitness,
}

impl Population {
  /// Creates a population of `size` fresh individuals of `problem`.
  ///
  /// # Panics
  ///
  /// Panics if `size` is zero.
  pub fn generate<P, R>(size: usize, problem: &P, rng: &mut R) -> Self
  where
    P: Problem,
    R: Rng + ?Sized,
  {
    Self::from_individuals(
      (0..size).map(|_| problem.generate_individual(rng)).collect(),
    )
  }

  /// Creates a population from already existing individuals.
  ///
  /// # Panics
  ///
  /// Panics if `individuals` is empty.
  pub fn from_individuals(individuals: Vec<Individual>) -> Self {
    assert!(!individuals.is_empty(), "population cannot be empty");
    Self {
      individuals,
      best: 0,
      average_fitness: Fitness::INFINITY,
    }
  }

  /// Computes fitness of every individual, then refreshes the best
  /// individual and the mean fitness. Returns the best individual.
  pub fn evaluate<P: Problem>(
    &mut self,
    problem: &P,
    execution: Execution,
  ) -> &Individual {
    match execution {
      Execution::Sequential => self
        .individuals
        .iter_mut()
        .for_each(|ind| ind.set_fitness(problem.fitness(ind.genome()))),
      Execution::Parallel => self
        .individuals
        .par_iter_mut()
        .for_each(|ind| ind.set_fitness(problem.fitness(ind.genome()))),
    }

    self.best = 0;
    for (idx, ind) in self.individuals.iter().enumerate().skip(1) {
      if ind.better_than(&self.individuals[self.best]) {
        self.best = idx;
      }
    }
    self.average_fitness = self
      .individuals
      .iter()
      .map(Individual::fitness)
      .sum::<Fitness>()
      / self.individuals.len() as Fitness;

    &self.individuals[self.best]
  }

  /// Returns the best individual found by the last evaluation. The first
  /// one wins a tie.
  pub fn best(&self) -> &Individual {
    &self.individuals[self.best]
  }

  /// Returns the mean fitness computed by the last evaluation.
  pub fn average_fitness(&self) -> Fitness {
    self.average_fitness
  }

  /// Returns the individuals.
  pub fn individuals(&self) -> &[Individual] {
    &self.individuals
  }

  /// Returns the number of individuals.
  pub fn len(&self) -> usize {
    self.individuals.len()
  }

  /// Returns `true` if there are no individuals.
  pub fn is_empty(&self) -> bool {
    self.individuals.is_empty()
  }

  pub(crate) fn individuals_mut(&mut self) -> &mut [Individual] {
    self.best = 0;
    self.average_fitness = Fitness::INFINITY;
    &mut self.individuals
  }
}
