//! Per-forklift bookkeeping of the collision-aware simulation.

use crate::warehouse::{action::Action, grid::Cell};

/// One stretch of a route: the moves that bring a forklift to `target`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Leg {
  /// Cell the leg must reach: the standing cell of its product or the exit.
  pub target: Cell,
  /// Cell `actions` start from, `None` if no path is known yet.
  pub origin: Option<Cell>,
  /// Planned moves.
  pub actions: Vec<Action>,
}

/// What a forklift wants to do next.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
  /// Take this action.
  Act(Action),
  /// The current leg does not start where the forklift stands, a new path
  /// is needed first.
  Replan,
  /// Every leg is done.
  Done,
}

/// A forklift working through its legs during one simulation.
#[derive(Clone, Debug)]
pub struct DynamicForklift {
  position: Cell,
  legs: Vec<Leg>,
  leg: usize,
  cursor: usize,
  retries: u32,
  exited: bool,
}

impl DynamicForklift {
  /// Creates a forklift standing at `position`.
  pub fn new(position: Cell, legs: Vec<Leg>) -> Self {
    Self {
      position,
      legs,
      leg: 0,
      cursor: 0,
      retries: 0,
      exited: false,
    }
  }

  /// Current position.
  pub fn position(&self) -> Cell {
    self.position
  }

  /// Index of the current leg.
  pub fn leg(&self) -> usize {
    self.leg
  }

  /// Target of the current leg.
  pub fn target(&self) -> Option<Cell> {
    self.legs.get(self.leg).map(|leg| leg.target)
  }

  /// Consecutive failed replans.
  pub fn retries(&self) -> u32 {
    self.retries
  }

  /// Returns `true` once the forklift left the floor.
  pub fn exited(&self) -> bool {
    self.exited
  }

  /// Returns the next step, moving past legs that are already done.
  pub fn step(&mut self) -> Step {
    while let Some(leg) = self.legs.get(self.leg) {
      if self.cursor == 0 && leg.origin != Some(self.position) {
        return Step::Replan;
      }
      if let Some(&action) = leg.actions.get(self.cursor) {
        return Step::Act(action);
      }
      self.leg += 1;
      self.cursor = 0;
    }
    Step::Done
  }

  /// Replaces the rest of the current leg with `actions`, starting from the
  /// current position.
  pub fn splice(&mut self, actions: Vec<Action>) {
    if let Some(leg) = self.legs.get_mut(self.leg) {
      leg.origin = Some(self.position);
      leg.actions = actions;
      self.cursor = 0;
    }
    self.retries = 0;
  }

  /// Records that the current action moved the forklift to `position`.
  pub fn advance(&mut self, position: Cell) {
    self.position = position;
    self.cursor += 1;
    self.retries = 0;
  }

  /// Records a failed replan and returns the number of consecutive failures.
  pub fn fail(&mut self) -> u32 {
    self.retries += 1;
    self.retries
  }

  /// Takes the forklift off the floor for good.
  pub fn exit(&mut self) {
    self.exited = true;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn leg(target: Cell, origin: Cell, actions: &[Action]) -> Leg {
    Leg {
      target,
      origin: Some(origin),
      actions: actions.to_vec(),
    }
  }

  #[test]
  fn test_walks_through_legs() {
    let start = Cell::new(0, 0);
    let mut forklift = DynamicForklift::new(
      start,
      vec![
        leg(Cell::new(0, 2), start, &[Action::Right]),
        leg(Cell::new(1, 1), Cell::new(0, 1), &[]),
        leg(Cell::new(1, 1), Cell::new(0, 1), &[Action::Down]),
      ],
    );
    assert_eq!(forklift.step(), Step::Act(Action::Right));
    forklift.advance(Cell::new(0, 1));
    assert_eq!(forklift.step(), Step::Act(Action::Down));
    assert_eq!(forklift.target(), Some(Cell::new(1, 1)));
    forklift.advance(Cell::new(1, 1));
    assert_eq!(forklift.step(), Step::Done);
    assert_eq!(forklift.target(), None);
  }

  #[test]
  fn test_replans_when_leg_starts_elsewhere() {
    let mut forklift = DynamicForklift::new(
      Cell::new(0, 0),
      vec![leg(Cell::new(0, 3), Cell::new(0, 1), &[Action::Right])],
    );
    assert_eq!(forklift.step(), Step::Replan);
    forklift.splice(vec![Action::Right, Action::Right]);
    assert_eq!(forklift.step(), Step::Act(Action::Right));
    forklift.advance(Cell::new(0, 1));
    assert_eq!(forklift.step(), Step::Act(Action::Right));
  }

  #[test]
  fn test_unknown_path_needs_replan() {
    let mut forklift = DynamicForklift::new(
      Cell::new(0, 0),
      vec![Leg {
        target: Cell::new(2, 2),
        origin: None,
        actions: vec![],
      }],
    );
    assert_eq!(forklift.step(), Step::Replan);
    forklift.splice(vec![]);
    assert_eq!(forklift.step(), Step::Done);
  }

  #[test]
  fn test_retries_reset_on_progress() {
    let start = Cell::new(0, 0);
    let mut forklift = DynamicForklift::new(
      start,
      vec![leg(Cell::new(0, 2), start, &[Action::Right])],
    );
    assert_eq!(forklift.fail(), 1);
    assert_eq!(forklift.fail(), 2);
    forklift.advance(Cell::new(0, 1));
    assert_eq!(forklift.retries(), 0);
    assert_eq!(forklift.fail(), 1);
    forklift.splice(vec![]);
    assert_eq!(forklift.retries(), 0);
  }
}
