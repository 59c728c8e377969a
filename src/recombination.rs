//! Recombination operators.
//!
//! All operators here work on permutations and yield permutations: every
//! child contains each gene of its parents exactly once.

use std::fmt;

use rand::Rng;
use serde::Deserialize;

use crate::{
  error::ConfigError,
  individual::{Gene, Individual},
  population::Population,
};

/// Available recombination algorithms.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecombinationMethod {
  /// Partially mapped crossover.
  Pmx,
  /// Order crossover.
  Ox1,
  /// Cycle crossover.
  Cx,
}

impl fmt::Display for RecombinationMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      RecombinationMethod::Pmx => "PMX",
      RecombinationMethod::Ox1 => "OX1",
      RecombinationMethod::Cx => "CX",
    })
  }
}

/// Recombines successive pairs of a population, each pair with a fixed
/// probability.
#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
pub struct Recombination {
  /// Algorithm applied to a pair.
  pub method: RecombinationMethod,
  /// Probability that a pair is recombined at all.
  pub probability: f64,
}

impl Recombination {
  /// Creates a recombination operator.
  pub fn new(
    method: RecombinationMethod,
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

  /// Recombines individuals `0` and `1`, `2` and `3` and so on in place. An
  /// odd last individual is left as it is.
  pub fn run<R: Rng + ?Sized>(&self, population: &mut Population, rng: &mut R) {
    for pair in population.individuals_mut().chunks_exact_mut(2) {
      if rng.gen::<f64>() < self.probability {
        if let [a, b] = pair {
          self.recombine(a, b, rng);
        }
      }
    }
  }

  /// Replaces the genomes of `a` and `b` with their children's.
  ///
  /// Genomes shorter than two genes are left unchanged.
  pub fn recombine<R: Rng + ?Sized>(
    &self,
    a: &mut Individual,
    b: &mut Individual,
    rng: &mut R,
  ) {
    let len = a.num_genes();
    debug_assert_eq!(len, b.num_genes(), "parents differ in length");
    if len < 2 {
      return;
    }
    let (first, second) = match self.method {
      RecombinationMethod::Pmx => {
        let (cut1, cut2) = cut_points(len, rng);
        (
          pmx(a.genome(), b.genome(), cut1, cut2),
          pmx(b.genome(), a.genome(), cut1, cut2),
        )
      }
      RecombinationMethod::Ox1 => {
        let (cut1, cut2) = cut_points(len, rng);
        (
          ox1(a.genome(), b.genome(), cut1, cut2),
          ox1(b.genome(), a.genome(), cut1, cut2),
        )
      }
      RecombinationMethod::Cx => {
        if rng.gen::<bool>() {
          cx(a.genome(), b.genome())
        } else {
          cx(b.genome(), a.genome())
        }
      }
    };
    a.set_genome(first);
    b.set_genome(second);
  }
}

impl fmt::Display for Recombination {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.method, self.probability)
  }
}

/// Draws two distinct indices below `len` and returns them in order.
pub(crate) fn cut_points<R: Rng + ?Sized>(
  len: usize,
  rng: &mut R,
) -> (usize, usize) {
  let cut1 = rng.gen_range(0..len);
  let mut cut2 = cut1;
  while cut2 == cut1 {
    cut2 = rng.gen_range(0..len);
  }
  (cut1.min(cut2), cut1.max(cut2))
}

/// Order crossover. The child keeps `segment[cut1..=cut2]`; the other
/// positions, starting right after `cut2` and wrapping around, are filled with
/// the genes of `filler` that are not in the segment, read from right after
/// `cut2` as well.
fn ox1(
  segment: &[Gene],
  filler: &[Gene],
  cut1: usize,
  cut2: usize,
) -> Vec<Gene> {
  let len = segment.len();
  let mut child = segment.to_vec();
  let mut placed = vec![false; len];
  for &gene in &segment[cut1..=cut2] {
    placed[gene] = true;
  }

  let mut position = (cut2 + 1) % len;
  for offset in 1..=len {
    let gene = filler[(cut2 + offset) % len];
    if placed[gene] {
      continue;
    }
    placed[gene] = true;
    child[position] = gene;
    position = (position + 1) % len;
  }
  child
}

/// Cycle crossover. Starting at position `0`, the first child takes `main`'s
/// gene and the second child takes `other`'s gene, then the chain continues at
/// the position of that gene in `main` until it closes. The next open
/// position starts a new cycle with the same roles.
fn cx(main: &[Gene], other: &[Gene]) -> (Vec<Gene>, Vec<Gene>) {
  let len = main.len();
  let mut position_in_main = vec![0; len];
  for (idx, &gene) in main.iter().enumerate() {
    position_in_main[gene] = idx;
  }

  let mut first: Vec<Option<Gene>> = vec![None; len];
  let mut second: Vec<Option<Gene>> = vec![None; len];
  let mut target = 0;
  while target < len {
    if first[target].is_some() {
      target += 1;
      continue;
    }
    first[target] = Some(main[target]);
    second[target] = Some(other[target]);
    target = position_in_main[other[target]];
  }

  (
    first.into_iter().flatten().collect(),
    second.into_iter().flatten().collect(),
  )
}

/// Partially mapped crossover. The child keeps `segment[cut1..=cut2]` and
/// takes every other position from `other`; a gene of `other` that already
/// sits in the segment is replaced by following the segment mapping
/// `segment[i] -> other[i]` until a free gene is found.
fn pmx(
  segment: &[Gene],
  other: &[Gene],
  cut1: usize,
  cut2: usize,
) -> Vec<Gene> {
  let len = segment.len();
  let mut in_segment: Vec<Option<usize>> = vec![None; len];
  for idx in cut1..=cut2 {
    in_segment[segment[idx]] = Some(idx);
  }

  let mut child = other.to_vec();
  child[cut1..=cut2].copy_from_slice(&segment[cut1..=cut2]);
  for idx in (0..cut1).chain(cut2 + 1..len) {
    let mut gene = other[idx];
    while let Some(mapped) = in_segment[gene] {
      gene = other[mapped];
    }
    child[idx] = gene;
  }
  child
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::individual::validate;

  fn individual(genome: &[Gene]) -> Individual {
    Individual::new(genome.to_vec()).unwrap()
  }

  #[test]
  fn test_ox1_known_children() {
    let p1 = [0, 1, 2, 3, 4, 5, 6, 7, 8];
    let p2 = [8, 2, 6, 7, 1, 5, 4, 0, 3];
    assert_eq!(ox1(&p1, &p2, 3, 5), vec![6, 7, 1, 3, 4, 5, 0, 8, 2]);
    assert_eq!(ox1(&p2, &p1, 3, 5), vec![2, 3, 4, 7, 1, 5, 6, 8, 0]);
  }

  #[test]
  fn test_ox1_segment_up_to_last_gene() {
    let p1 = [3, 0, 1, 2];
    let p2 = [0, 1, 2, 3];
    assert_eq!(ox1(&p1, &p2, 2, 3), vec![0, 3, 1, 2]);
  }

  #[test]
  fn test_cx_keeps_roles_across_cycles() {
    let main = [0, 1, 2, 3, 4, 5];
    let other = [1, 0, 3, 2, 5, 4];
    let (first, second) = cx(&main, &other);
    assert_eq!(first, main.to_vec());
    assert_eq!(second, other.to_vec());
  }

  #[test]
  fn test_cx_single_cycle() {
    let main = [1, 2, 3, 0];
    let other = [2, 3, 0, 1];
    let (first, second) = cx(&main, &other);
    assert_eq!(first, main.to_vec());
    assert_eq!(second, other.to_vec());
  }

  #[test]
  fn test_pmx_known_children() {
    let p1 = [0, 1, 2, 3, 4, 5, 6, 7, 8];
    let p2 = [4, 5, 2, 1, 8, 7, 6, 3, 0];
    assert_eq!(pmx(&p1, &p2, 3, 6), vec![8, 7, 2, 3, 4, 5, 6, 1, 0]);
    assert_eq!(pmx(&p2, &p1, 3, 6), vec![0, 3, 2, 1, 8, 7, 6, 5, 4]);
  }

  #[test]
  fn test_cut_points_are_distinct_and_ordered() {
    let mut rng = StdRng::seed_from_u64(0);
    for len in 2..12 {
      for _ in 0..100 {
        let (cut1, cut2) = cut_points(len, &mut rng);
        assert!(cut1 < cut2 && cut2 < len);
      }
    }
  }

  #[test]
  fn test_every_method_yields_permutations() {
    let mut rng = StdRng::seed_from_u64(2024);
    for method in [
      RecombinationMethod::Pmx,
      RecombinationMethod::Ox1,
      RecombinationMethod::Cx,
    ] {
      let recombination = Recombination::new(method, 1.0).unwrap();
      for len in 2..16 {
        for _ in 0..50 {
          let mut a = Individual::random(len, &mut rng);
          let mut b = Individual::random(len, &mut rng);
          recombination.recombine(&mut a, &mut b, &mut rng);
          assert_eq!(validate(a.genome()), Ok(()), "{method}");
          assert_eq!(validate(b.genome()), Ok(()), "{method}");
        }
      }
    }
  }

  #[test]
  fn test_single_gene_parents_are_unchanged() {
    let mut rng = StdRng::seed_from_u64(1);
    for method in [
      RecombinationMethod::Pmx,
      RecombinationMethod::Ox1,
      RecombinationMethod::Cx,
    ] {
      let mut a = individual(&[0]);
      let mut b = individual(&[0]);
      Recombination::new(method, 1.0)
        .unwrap()
        .recombine(&mut a, &mut b, &mut rng);
      assert_eq!(a.genome(), &[0]);
      assert_eq!(b.genome(), &[0]);
    }
  }

  #[test]
  fn test_zero_probability_leaves_population() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut population = Population::from_individuals(
      (0..10).map(|_| Individual::random(6, &mut rng)).collect(),
    );
    let before = population.clone();
    Recombination::new(RecombinationMethod::Ox1, 0.0)
      .unwrap()
      .run(&mut population, &mut rng);
    assert_eq!(population.individuals(), before.individuals());
  }

  #[test]
  fn test_cx_children_are_the_parents() {
    let mut rng = StdRng::seed_from_u64(4);
    let recombination =
      Recombination::new(RecombinationMethod::Cx, 1.0).unwrap();
    for _ in 0..20 {
      let a = Individual::random(7, &mut rng);
      let b = Individual::random(7, &mut rng);
      let (mut c, mut d) = (a.clone(), b.clone());
      recombination.recombine(&mut c, &mut d, &mut rng);
      let children = [c.genome(), d.genome()];
      assert!(children.contains(&a.genome()));
      assert!(children.contains(&b.genome()));
    }
  }

  #[test]
  fn test_invalid_probability_is_rejected() {
    assert_eq!(
      Recombination::new(RecombinationMethod::Pmx, 1.5),
      Err(ConfigError::Probability(1.5))
    );
  }
}
