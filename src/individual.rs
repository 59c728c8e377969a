//! Permutation-encoded candidate solutions.

use std::fmt;

use rand::{seq::SliceRandom, Rng};

use crate::error::GenomeError;

/// A single slot of a genome.
pub type Gene = usize;

/// A fitness value. The lower - the better.
pub type Fitness = f64;

/// A candidate solution: a permutation of `0..num_genes` and its fitness.
///
/// Every `Individual` owns its genome. Copies made for a new generation or for
/// the best-so-far record are plain clones, they never share state.
#[derive(Clone, Debug, PartialEq)]
pub struct Individual {
  genome: Vec<Gene>,
  fitness: Fitness,
}

impl Individual {
  /// Creates an unevaluated individual from `genome`.
  ///
  /// Fails if `genome` is not a permutation of `0..genome.len()`.
  pub fn new(genome: Vec<Gene>) -> Result<Self, GenomeError> {
    validate(&genome)?;
    Ok(Self {
      genome,
      fitness: Fitness::INFINITY,
    })
  }

  /// Creates an unevaluated individual with a uniformly random genome of
  /// `num_genes` genes.
  pub fn random<R: Rng + ?Sized>(num_genes: usize, rng: &mut R) -> Self {
    let mut genome: Vec<Gene> = (0..num_genes).collect();
    genome.shuffle(rng);
    Self {
      genome,
      fitness: Fitness::INFINITY,
    }
  }

  /// Returns the genome.
  pub fn genome(&self) -> &[Gene] {
    &self.genome
  }

  /// Returns the number of genes.
  pub fn num_genes(&self) -> usize {
    self.genome.len()
  }

  /// Returns the last computed fitness. An individual that was never
  /// evaluated has infinite fitness.
  pub fn fitness(&self) -> Fitness {
    self.fitness
  }

  /// Returns `true` if `self` has strictly lower fitness than `other`.
  pub fn better_than(&self, other: &Self) -> bool {
    self.fitness < other.fitness
  }

  /// Exchanges genes at positions `a` and `b`.
  ///
  /// # Panics
  ///
  /// Panics if either position is out of bounds.
  pub fn permute(&mut self, a: usize, b: usize) {
    self.genome.swap(a, b);
  }

  pub(crate) fn set_fitness(&mut self, fitness: Fitness) {
    self.fitness = fitness;
  }

  /// Replaces the genome. Operators only hand permutations in here.
  pub(crate) fn set_genome(&mut self, genome: Vec<Gene>) {
    debug_assert_eq!(validate(&genome), Ok(()), "operator broke a genome");
    self.genome = genome;
  }

  pub(crate) fn genome_mut(&mut self) -> &mut Vec<Gene> {
    &mut self.genome
  }
}

impl fmt::Display for Individual {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?} ({})", self.genome, self.fitness)
  }
}

/// Checks that `genome` is a permutation of `0..genome.len()`.
pub fn validate(genome: &[Gene]) -> Result<(), GenomeError> {
  let len = genome.len();
  let mut seen = vec![false; len];
  for (position, &gene) in genome.iter().enumerate() {
    if gene >= len {
      return Err(GenomeError::OutOfRange {
        gene,
        position,
        len,
      });
    }
    if std::mem::replace(&mut seen[gene], true) {
      return Err(GenomeError::Duplicate { gene, position });
    }
  }
  Ok(())
}

/// A problem that the genetic algorithm can optimize.
///
/// Fitness computation must only read `self`, so that a population can be
/// evaluated on a worker pool.
pub trait Problem: Sync {
  /// Length of every genome of this problem.
  fn num_genes(&self) -> usize;

  /// Computes the fitness of `genome`. The lower - the better.
  fn fitness(&self, genome: &[Gene]) -> Fitness;

  /// Creates a fresh individual for the initial population.
  fn generate_individual<R: Rng + ?Sized>(&self, rng: &mut R) -> Individual {
    Individual::random(self.num_genes(), rng)
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;

  #[test]
  fn test_new_accepts_permutation() {
    let individual = Individual::new(vec![2, 0, 1]).unwrap();
    assert_eq!(individual.genome(), &[2, 0, 1]);
    assert_eq!(individual.fitness(), Fitness::INFINITY);
  }

  #[test]
  fn test_new_accepts_empty_genome() {
    let individual = Individual::new(vec![]).unwrap();
    assert_eq!(individual.num_genes(), 0);
  }

  #[test]
  fn test_new_rejects_duplicate() {
    assert_eq!(
      Individual::new(vec![0, 1, 1]),
      Err(GenomeError::Duplicate {
        gene: 1,
        position: 2
      })
    );
  }

  #[test]
  fn test_new_rejects_out_of_range() {
    assert_eq!(
      Individual::new(vec![0, 3, 1]),
      Err(GenomeError::OutOfRange {
        gene: 3,
        position: 1,
        len: 3
      })
    );
  }

  #[test]
  fn test_random_is_permutation() {
    let mut rng = StdRng::seed_from_u64(3);
    for n in 0..20 {
      let individual = Individual::random(n, &mut rng);
      assert_eq!(validate(individual.genome()), Ok(()));
    }
  }

  #[test]
  fn test_random_is_reproducible() {
    let a = Individual::random(30, &mut StdRng::seed_from_u64(11));
    let b = Individual::random(30, &mut StdRng::seed_from_u64(11));
    assert_eq!(a, b);
  }

  #[test]
  fn test_better_than_is_strict() {
    let mut a = Individual::new(vec![0, 1]).unwrap();
    let mut b = a.clone();
    a.set_fitness(3.0);
    b.set_fitness(3.0);
    assert!(!a.better_than(&b));
    b.set_fitness(4.0);
    assert!(a.better_than(&b));
  }

  #[test]
  fn test_permute_swaps_genes() {
    let mut individual = Individual::new(vec![0, 1, 2, 3]).unwrap();
    individual.permute(0, 3);
    assert_eq!(individual.genome(), &[3, 1, 2, 0]);
  }
}
