//! The warehouse as a genetic algorithm problem.

use std::iter;

use crate::{
  individual::{Fitness, Gene, Problem},
  search::Cost,
  warehouse::{
    action::Action,
    grid::{Cell, Layout},
    pairs::PairCache,
    routes::Routes,
    simulation::{simulate, Simulation},
  },
};

/// Cells visited by every forklift, one entry per executed action.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Paths {
  /// Starting cell of each forklift followed by the cell after each action.
  pub forklifts: Vec<Vec<Cell>>,
  /// Length of the longest trace.
  pub steps: usize,
}

/// Assigns products to forklifts and orders them.
///
/// With collisions allowed, the fitness of a genome is the sum of the cached
/// path costs along every route. Otherwise the routes are simulated on a
/// shared floor, see [`simulate`](crate::warehouse::simulate).
#[derive(Clone, Debug)]
pub struct WarehouseProblem {
  layout: Layout,
  pairs: PairCache,
  allow_collisions: bool,
}

impl WarehouseProblem {
  /// Creates a problem, searching every pair distance of `layout`.
  pub fn new(layout: Layout, allow_collisions: bool) -> Self {
    let pairs = PairCache::build(&layout);
    Self {
      layout,
      pairs,
      allow_collisions,
    }
  }

  /// The warehouse.
  pub fn layout(&self) -> &Layout {
    &self.layout
  }

  /// The pair distances.
  pub fn pairs(&self) -> &PairCache {
    &self.pairs
  }

  /// Whether forklifts may share cells.
  pub fn allow_collisions(&self) -> bool {
    self.allow_collisions
  }

  /// Decodes `genome` into routes.
  pub fn routes(&self, genome: &[Gene]) -> Routes {
    Routes::decode(
      genome,
      self.layout.products().len(),
      self.layout.forklifts().len(),
    )
  }

  /// Sum of the cached distances along every route, forklifts ignoring
  /// each other.
  pub fn route_cost(&self, genome: &[Gene]) -> Cost {
    self
      .routes(genome)
      .0
      .iter()
      .zip(self.layout.forklifts())
      .flat_map(|(route, &start)| self.hops(start, route))
      .map(|(from, to)| self.pairs.distance(from, to))
      .sum()
  }

  /// Cached moves of every forklift along its route, forklifts ignoring
  /// each other. Hops without a known path add no moves.
  pub fn planned_actions(&self, genome: &[Gene]) -> Vec<Vec<Action>> {
    self
      .routes(genome)
      .0
      .iter()
      .zip(self.layout.forklifts())
      .map(|(route, &start)| {
        self
          .hops(start, route)
          .into_iter()
          .filter_map(|(from, to)| self.pairs.get(from, to))
          .flat_map(|pair| pair.into_owned().actions)
          .collect()
      })
      .collect()
  }

  /// Simulates `genome` with forklifts blocking each other.
  pub fn simulate(&self, genome: &[Gene]) -> Simulation {
    simulate(&self.layout, &self.pairs, &self.routes(genome), false)
  }

  /// Returns the cells every forklift passes through.
  ///
  /// With collisions allowed these follow the cached paths priced by
  /// [`route_cost`](Self::route_cost), otherwise the simulated actions.
  pub fn paths(&self, genome: &[Gene]) -> Paths {
    let floor = self.layout.floor();
    let actions = if self.allow_collisions {
      self.planned_actions(genome)
    } else {
      self.simulate(genome).actions
    };
    let forklifts: Vec<Vec<Cell>> = actions
      .iter()
      .zip(self.layout.forklifts())
      .map(|(actions, &start)| {
        iter::once(start)
          .chain(actions.iter().scan(start, |cell, action| {
            *cell = action.apply(*cell, floor).unwrap_or(*cell);
            Some(*cell)
          }))
          .collect()
      })
      .collect();
    let steps = forklifts.iter().map(Vec::len).max().unwrap_or(0);
    Paths { forklifts, steps }
  }

  /// Consecutive stops of the route leaving `start`: its products, then
  /// the exit.
  fn hops(&self, start: Cell, route: &[usize]) -> Vec<(Cell, Cell)> {
    let products = self.layout.products();
    let stops = route
      .iter()
      .map(|&product| products[product])
      .chain(iter::once(self.layout.exit()));
    iter::once(start).chain(stops.clone()).zip(stops).collect()
  }
}

impl Problem for WarehouseProblem {
  /// One gene per product plus a marker per additional forklift.
  fn num_genes(&self) -> usize {
    self.layout.products().len() + self.layout.forklifts().len() - 1
  }

  fn fitness(&self, genome: &[Gene]) -> Fitness {
    let cost = if self.allow_collisions {
      self.route_cost(genome)
    } else {
      self.simulate(genome).fitness
    };
    Fitness::from(cost)
  }
}
