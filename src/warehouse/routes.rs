//! Decoding genomes into per-forklift routes.

use std::fmt;

use itertools::Itertools;

use crate::individual::Gene;

/// Products assigned to each forklift, in visiting order.
///
/// A gene below the number of products is a product index. Any other gene
/// `g` hands the following products to forklift `g - products + 1`; the
/// first forklift collects the products before the first such marker.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Routes(pub Vec<Vec<usize>>);

impl Routes {
  /// Decodes `genome` for a warehouse with `products` products and
  /// `forklifts` forklifts.
  pub fn decode(genome: &[Gene], products: usize, forklifts: usize) -> Self {
    let mut routes = vec![vec![]; forklifts];
    let mut forklift = 0;
    for &gene in genome {
      if gene < products {
        routes[forklift].push(gene);
      } else {
        forklift = gene - products + 1;
      }
    }
    Self(routes)
  }

  /// Route of `forklift`.
  pub fn of(&self, forklift: usize) -> &[usize] {
    &self.0[forklift]
  }

  /// Number of forklifts.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns `true` if there are no forklifts.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Forklifts are lettered `A` to `Z`, later ones numbered; products are
/// numbered from one.
impl fmt::Display for Routes {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (forklift, route) in self.0.iter().enumerate() {
      if forklift > 0 {
        writeln!(f)?;
      }
      match u8::try_from(forklift) {
        Ok(idx) if idx < 26 => write!(f, "{}", char::from(b'A' + idx))?,
        _ => write!(f, "F{}", forklift + 1)?,
      }
      write!(f, "->{}", route.iter().map(|product| product + 1).join(","))?;
    }
    Ok(())
  }
}
