//! Shortest forklift paths.

use crate::{
  search::{informed_search, Cost, SearchProblem, Solution},
  warehouse::{action::Action, grid::Cell, state::WarehouseState},
};

/// Moving one forklift to a goal cell.
///
/// A shelf is reached by standing right next to it. Any other goal, the exit
/// included, is reached by standing on it.
#[derive(Clone, Copy, Debug)]
pub struct PathProblem<'a> {
  start: WarehouseState<'a>,
  goal: Cell,
}

impl<'a> PathProblem<'a> {
  /// Creates a problem starting from `start`.
  pub fn new(start: WarehouseState<'a>, goal: Cell) -> Self {
    Self { start, goal }
  }

  fn goal_is_shelf(&self) -> bool {
    let floor = self.start.floor;
    floor.contains(self.goal) && floor.tile(self.goal).is_shelf()
  }
}

impl SearchProblem for PathProblem<'_> {
  type State = Cell;
  type Action = Action;

  fn initial_state(&self) -> Cell {
    self.start.forklift
  }

  fn actions(&self, state: &Cell) -> Vec<Action> {
    let state = self.start.at(*state);
    Action::ALL
      .into_iter()
      .filter(|action| action.is_valid(&state))
      .collect()
  }

  fn successor(&self, state: &Cell, action: Action) -> Cell {
    action.apply(*state, self.start.floor).unwrap_or(*state)
  }

  fn cost(&self, action: Action) -> Cost {
    action.cost()
  }

  fn is_goal(&self, state: &Cell) -> bool {
    *state == self.goal
      || (self.goal_is_shelf() && state.is_adjacent(self.goal))
  }

  fn heuristic(&self, state: &Cell) -> Cost {
    let distance = state.manhattan(self.goal) as Cost;
    if self.goal_is_shelf() {
      distance.saturating_sub(1)
    } else {
      distance
    }
  }
}

/// Finds a cheapest action sequence that takes the forklift of `start` to
/// `goal`, or `None` if there is none.
pub fn plan(start: WarehouseState<'_>, goal: Cell) -> Option<Solution<Action>> {
  informed_search(&PathProblem::new(start, goal))
}
