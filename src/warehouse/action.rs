//! Forklift moves.

use std::fmt;

use crate::{
  search::Cost,
  warehouse::{
    grid::{Cell, Floor},
    state::WarehouseState,
  },
};

/// A single forklift move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Action {
  /// One row up.
  Up,
  /// One row down.
  Down,
  /// One column left.
  Left,
  /// One column right.
  Right,
  /// Stays in place.
  NoMove,
}

impl Action {
  /// Every action, in the order a search tries them.
  pub const ALL: [Action; 5] = [
    Action::Down,
    Action::Up,
    Action::Right,
    Action::Left,
    Action::NoMove,
  ];

  /// Cost of the action. Waiting costs as much as moving.
  pub fn cost(self) -> Cost {
    1
  }

  /// The action that undoes this one.
  pub fn inverse(self) -> Self {
    match self {
      Action::Up => Action::Down,
      Action::Down => Action::Up,
      Action::Left => Action::Right,
      Action::Right => Action::Left,
      Action::NoMove => Action::NoMove,
    }
  }

  /// Cell reached from `cell`, or `None` when the move leaves the floor.
  /// Occupancy is not checked.
  pub fn apply(self, cell: Cell, floor: &Floor) -> Option<Cell> {
    let next = match self {
      Action::Up => Cell::new(cell.row.checked_sub(1)?, cell.column),
      Action::Down => Cell::new(cell.row + 1, cell.column),
      Action::Left => Cell::new(cell.row, cell.column.checked_sub(1)?),
      Action::Right => Cell::new(cell.row, cell.column + 1),
      Action::NoMove => cell,
    };
    floor.contains(next).then_some(next)
  }

  /// Returns `true` if the forklift of `state` can take this action.
  pub fn is_valid(self, state: &WarehouseState<'_>) -> bool {
    match self {
      Action::NoMove => true,
      _ => self
        .apply(state.forklift, state.floor)
        .is_some_and(|next| state.is_movable(next)),
    }
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Action::Up => "Up",
      Action::Down => "Down",
      Action::Left => "Left",
      Action::Right => "Right",
      Action::NoMove => "NoMove",
    })
  }
}
