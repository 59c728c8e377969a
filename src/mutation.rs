//! Mutation operators.
//!
//! Like recombination, every mutation keeps a genome a permutation.

use std::fmt;

use rand::Rng;
use serde::Deserialize;

use crate::{
  error::ConfigError,
  individual::Individual,
  population::Population,
  recombination::cut_points,
};

/// Available mutation algorithms.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationMethod {
  /// Moves one gene to the position right after another one.
  Insert,
  /// Partial shuffle: each gene may swap with a random other position.
  Psm,
  /// Reverses a random segment.
  Rsm,
}

impl fmt::Display for MutationMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      MutationMethod::Insert => "Insert",
      MutationMethod::Psm => "PSM",
      MutationMethod::Rsm => "RSM",
    })
  }
}

/// Mutates individuals of a population in place.
///
/// [`MutationMethod::Psm`] draws its probability once per gene, the other
/// methods once per individual.
#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
pub struct Mutation {
  /// Algorithm applied to an individual.
  pub method: MutationMethod,
  /// Probability of a mutation.
  pub probability: f64,
}

impl Mutation {
  /// Creates a mutation operator.
  pub fn new(
    method: MutationMethod,
    probability: f64,
  ) -> Result<Self, ConfigError> {
    if !(0.0..=1.0).contains(&probability) {
      return Err(ConfigError::Probability(probability));
    }
    Ok(Self {
      method,
      probability,
    })
  }

  /// Mutates every individual of `population`, in population order.
  pub fn run<R: Rng + ?Sized>(&self, population: &mut Population, rng: &mut R) {
    for individual in population.individuals_mut() {
      match self.method {
        MutationMethod::Psm => self.mutate(individual, rng),
        MutationMethod::Insert | MutationMethod::Rsm => {
          if rng.gen::<f64>() < self.probability {
            self.mutate(individual, rng);
          }
        }
      }
    }
  }

  /// Mutates a single individual. Genomes shorter than two genes are left
  /// unchanged.
  pub fn mutate<R: Rng + ?Sized>(
    &self,
    individual: &mut Individual,
    rng: &mut R,
  ) {
    let len = individual.num_genes();
    if len < 2 {
      return;
    }
    match self.method {
      MutationMethod::Psm => {
        for idx in 0..len {
          if rng.gen::<f64>() >= self.probability {
            continue;
          }
          let mut other = idx;
          while other == idx {
            other = rng.gen_range(0..len);
          }
          individual.permute(idx, other);
        }
      }
      MutationMethod::Rsm => {
        let (mut left, mut right) = cut_points(len, rng);
        while left < right {
          individual.permute(left, right);
          left += 1;
          right -= 1;
        }
      }
      MutationMethod::Insert => {
        let (at, from) = cut_points(len, rng);
        let genome = individual.genome_mut();
        let gene = genome.remove(from);
        genome.insert(at + 1, gene);
      }
    }
  }
}

impl fmt::Display for Mutation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.method, self.probability)
  }
}
