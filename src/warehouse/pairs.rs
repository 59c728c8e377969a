//! Precomputed shortest paths between the cells a route can visit.

use std::{borrow::Cow, collections::HashMap, fmt};

use itertools::{iproduct, Itertools};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::{
  search::Cost,
  warehouse::{
    action::Action,
    grid::{Cell, Floor, Layout},
    planner::plan,
    state::WarehouseState,
  },
};

/// A shortest path between two cells of interest.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Pair {
  /// Cell the path leaves from.
  pub from: Cell,
  /// Cell the path leads to.
  pub to: Cell,
  /// Cell where `actions` start, the standing cell of `from`.
  pub origin: Cell,
  /// Cell where `actions` end, the standing cell of `to`.
  pub end: Cell,
  /// Moves from `origin` to `end`.
  pub actions: Vec<Action>,
  /// Cost of `actions`.
  pub cost: Cost,
}

impl Pair {
  /// The same path walked backwards.
  pub fn reversed(&self) -> Self {
    Self {
      from: self.to,
      to: self.from,
      origin: self.end,
      end: self.origin,
      actions: self.actions.iter().rev().map(|a| a.inverse()).collect(),
      cost: self.cost,
    }
  }
}

impl fmt::Display for Pair {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} / {}: {}->{}",
      self.from,
      self.to,
      self.cost,
      self.actions.iter().join(",")
    )
  }
}

/// Shortest paths between every forklift start, product and the exit.
///
/// Every cell of interest has a single standing cell a forklift occupies
/// there: the cell itself unless it is a shelf, else a free neighbour. Paths
/// run between standing cells, so a route's legs join end to start. They are
/// searched once with collisions allowed, since other forklifts move anyway.
/// Each unordered pair is stored in one direction only.
#[derive(Clone, Debug)]
pub struct PairCache {
  pairs: HashMap<(Cell, Cell), Pair>,
  fallback: Cost,
}

impl PairCache {
  /// Searches the paths of `layout` on the [rayon] thread pool.
  pub fn build(layout: &Layout) -> Self {
    let exit = layout.exit();
    let forklifts = layout.forklifts();
    let products = layout.products();
    let keys: Vec<(Cell, Cell)> = iproduct!(forklifts, products)
      .map(|(&from, &to)| (from, to))
      .chain(products.iter().copied().tuple_combinations())
      .chain(products.iter().map(|&from| (from, exit)))
      .chain(forklifts.iter().map(|&from| (from, exit)))
      .collect();

    let floor = layout.floor();
    let found: Vec<((Cell, Cell), Option<Pair>)> = keys
      .into_par_iter()
      .map(|(from, to)| ((from, to), search(floor, from, to)))
      .collect();

    let mut pairs = HashMap::with_capacity(found.len());
    for ((from, to), pair) in found {
      match pair {
        Some(pair) => {
          pairs.insert((from, to), pair);
        }
        None => warn!(%from, %to, "no path between cells"),
      }
    }
    info!(pairs = pairs.len(), "computed pair distances");

    Self {
      pairs,
      fallback: (floor.rows() + floor.columns() + 1) as Cost,
    }
  }

  /// Returns the path from `from` to `to`, reversing the stored one if it
  /// was searched the other way round.
  pub fn get(&self, from: Cell, to: Cell) -> Option<Cow<'_, Pair>> {
    if let Some(pair) = self.pairs.get(&(from, to)) {
      return Some(Cow::Borrowed(pair));
    }
    self
      .pairs
      .get(&(to, from))
      .map(|pair| Cow::Owned(pair.reversed()))
  }

  /// Cost of the path from `from` to `to`, or `rows + columns + 1` when no
  /// path was found.
  pub fn distance(&self, from: Cell, to: Cell) -> Cost {
    self
      .pairs
      .get(&(from, to))
      .or_else(|| self.pairs.get(&(to, from)))
      .map_or(self.fallback, |pair| pair.cost)
  }

  /// Number of stored pairs.
  pub fn len(&self) -> usize {
    self.pairs.len()
  }

  /// Returns `true` if no pair is stored.
  pub fn is_empty(&self) -> bool {
    self.pairs.is_empty()
  }

  /// Iterates over the stored pairs in no particular order.
  pub fn iter(&self) -> impl Iterator<Item = &Pair> {
    self.pairs.values()
  }
}

/// The cell a forklift stands on to reach `cell`: the cell itself if it can
/// be entered, else its left, right, upper or lower neighbour, in this order.
/// An enclosed shelf stands for itself.
pub fn standing_cell(floor: &Floor, cell: Cell) -> Cell {
  let Cell { row, column } = cell;
  let left = column.checked_sub(1).map(|c| Cell::new(row, c));
  let right = Some(Cell::new(row, column + 1));
  let up = row.checked_sub(1).map(|r| Cell::new(r, column));
  let down = Some(Cell::new(row + 1, column));
  [Some(cell), left, right, up, down]
    .into_iter()
    .flatten()
    .find(|&candidate| floor.is_movable(candidate, true))
    .unwrap_or(cell)
}

fn search(floor: &Floor, from: Cell, to: Cell) -> Option<Pair> {
  let origin = standing_cell(floor, from);
  let goal = standing_cell(floor, to);
  let solution = plan(WarehouseState::new(floor, origin, true), goal)?;
  let end = solution
    .actions
    .iter()
    .fold(origin, |cell, action| action.apply(cell, floor).unwrap_or(cell));
  Some(Pair {
    from,
    to,
    origin,
    end,
    actions: solution.actions,
    cost: solution.cost,
  })
}
