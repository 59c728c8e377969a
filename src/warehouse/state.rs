//! The view of the floor a single forklift plans against.

use crate::warehouse::grid::{Cell, Floor};

/// A floor together with the position of one forklift.
///
/// The floor is borrowed: search nodes only differ by the forklift position,
/// so a state is cheap to copy.
#[derive(Clone, Copy, Debug)]
pub struct WarehouseState<'a> {
  /// Floor the forklift moves on.
  pub floor: &'a Floor,
  /// Current position of the forklift.
  pub forklift: Cell,
  /// Whether the forklift may enter cells holding other forklifts.
  pub allow_collisions: bool,
}

impl<'a> WarehouseState<'a> {
  /// Creates a state.
  pub fn new(floor: &'a Floor, forklift: Cell, allow_collisions: bool) -> Self {
    Self {
      floor,
      forklift,
      allow_collisions,
    }
  }

  /// The same state with the forklift moved to `forklift`.
  pub fn at(&self, forklift: Cell) -> Self {
    Self { forklift, ..*self }
  }

  /// Returns `true` if the forklift may enter `cell`.
  pub fn is_movable(&self, cell: Cell) -> bool {
    self.floor.is_movable(cell, self.allow_collisions)
  }
}
