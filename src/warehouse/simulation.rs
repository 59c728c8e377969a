//! Round-robin simulation of forklifts sharing one floor.
//!
//! Forklifts take turns, one action per turn. A forklift whose next action
//! is blocked plans a new path on the live floor to the standing cell of its
//! next stop. When that fails too it waits, and after [`MAX_RETRIES`]
//! consecutive failures it is taken off the floor at the cost of
//! [`FORCED_EXIT_PENALTY`].

use std::iter;

use tracing::{trace, warn};

use crate::{
  search::Cost,
  warehouse::{
    action::Action,
    forklift::{DynamicForklift, Leg, Step},
    grid::{Cell, Floor, Layout},
    pairs::{standing_cell, PairCache},
    planner::plan,
    routes::Routes,
    state::WarehouseState,
  },
};

/// Failed replans a forklift tolerates in a row.
pub const MAX_RETRIES: u32 = 3;

/// Cost added for every forklift forced off the floor.
pub const FORCED_EXIT_PENALTY: Cost = 999;

/// Outcome of a simulation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Simulation {
  /// Cost of every executed action plus penalties.
  pub fitness: Cost,
  /// Number of forklifts forced off the floor.
  pub forced_exits: usize,
  /// Executed actions of each forklift, waits included.
  pub actions: Vec<Vec<Action>>,
}

/// Simulates `routes` on the floor of `layout`, starting from the paths
/// cached in `pairs`.
pub fn simulate(
  layout: &Layout,
  pairs: &PairCache,
  routes: &Routes,
  allow_collisions: bool,
) -> Simulation {
  let mut floor = layout.floor().clone();
  let mut forklifts: Vec<DynamicForklift> = layout
    .forklifts()
    .iter()
    .enumerate()
    .map(|(idx, &start)| {
      DynamicForklift::new(start, legs(layout, pairs, start, routes.of(idx)))
    })
    .collect();
  let mut report = Simulation {
    fitness: 0,
    forced_exits: 0,
    actions: vec![vec![]; forklifts.len()],
  };

  // Bounds livelocks, where forklifts keep replanning around each other.
  let cells = floor.rows() * floor.columns();
  let stops: usize = routes.0.iter().map(Vec::len).sum();
  let limit = 4 * cells * (stops + forklifts.len());
  let mut ticks = 0;

  let mut turn = 0;
  while forklifts.iter().any(|forklift| !forklift.exited()) {
    if ticks >= limit {
      let stuck = forklifts.iter().filter(|f| !f.exited()).count();
      warn!(ticks, stuck, "simulation did not settle, forcing forklifts out");
      for forklift in forklifts.iter_mut().filter(|f| !f.exited()) {
        force_exit(&mut floor, forklift, &mut report);
      }
      break;
    }

    let idx = turn % forklifts.len();
    turn += 1;
    let forklift = &mut forklifts[idx];
    if forklift.exited() {
      continue;
    }
    if let Some(action) =
      take_turn(idx, forklift, &mut floor, allow_collisions, &mut report)
    {
      report.actions[idx].push(action);
      ticks += 1;
    }
  }
  report
}

/// The legs of a forklift starting at `start`: its products, then the exit.
/// Each leg leads to the standing cell of its stop.
fn legs(
  layout: &Layout,
  pairs: &PairCache,
  start: Cell,
  route: &[usize],
) -> Vec<Leg> {
  let mut from = start;
  route
    .iter()
    .map(|&product| layout.products()[product])
    .chain(iter::once(layout.exit()))
    .map(|stop| {
      let leg = match pairs.get(from, stop) {
        Some(pair) => {
          let pair = pair.into_owned();
          Leg {
            target: pair.end,
            origin: Some(pair.origin),
            actions: pair.actions,
          }
        }
        None => Leg {
          target: standing_cell(layout.floor(), stop),
          origin: None,
          actions: vec![],
        },
      };
      from = stop;
      leg
    })
    .collect()
}

/// Executes one action of `forklift`, or none if it leaves the floor.
fn take_turn(
  idx: usize,
  forklift: &mut DynamicForklift,
  floor: &mut Floor,
  allow_collisions: bool,
  report: &mut Simulation,
) -> Option<Action> {
  let mut replanned_leg = None;
  loop {
    let position = forklift.position();
    match forklift.step() {
      Step::Done => {
        floor.remove_forklift(position);
        forklift.exit();
        return None;
      }
      Step::Act(action)
        if action.is_valid(&WarehouseState::new(
          floor,
          position,
          allow_collisions,
        )) =>
      {
        let next = action.apply(position, floor).unwrap_or(position);
        floor.move_forklift(position, next);
        forklift.advance(next);
        report.fitness += action.cost();
        return Some(action);
      }
      Step::Act(_) | Step::Replan => {
        if replanned_leg != Some(forklift.leg()) {
          replanned_leg = Some(forklift.leg());
          if let Some(actions) = replan(forklift, floor, allow_collisions) {
            trace!(forklift = idx, %position, moves = actions.len(), "replan");
            forklift.splice(actions);
            continue;
          }
        }
        let retries = forklift.fail();
        if retries > MAX_RETRIES {
          trace!(forklift = idx, %position, "forced exit");
          force_exit(floor, forklift, report);
          return None;
        }
        report.fitness += Action::NoMove.cost();
        return Some(Action::NoMove);
      }
    }
  }
}

/// Plans from the current position of `forklift` to its target, treating
/// its own cell as free.
fn replan(
  forklift: &DynamicForklift,
  floor: &mut Floor,
  allow_collisions: bool,
) -> Option<Vec<Action>> {
  let target = forklift.target()?;
  let position = forklift.position();
  floor.remove_forklift(position);
  let solution =
    plan(WarehouseState::new(floor, position, allow_collisions), target);
  floor.place_forklift(position);
  solution.map(|solution| solution.actions)
}

fn force_exit(
  floor: &mut Floor,
  forklift: &mut DynamicForklift,
  report: &mut Simulation,
) {
  floor.remove_forklift(forklift.position());
  forklift.exit();
  report.fitness += FORCED_EXIT_PENALTY;
  report.forced_exits += 1;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn run(text: &str, genome: &[usize], allow_collisions: bool) -> Simulation {
    let layout: Layout = text.parse().unwrap();
    let pairs = PairCache::build(&layout);
    let routes = Routes::decode(
      genome,
      layout.products().len(),
      layout.forklifts().len(),
    );
    simulate(&layout, &pairs, &routes, allow_collisions)
  }

  #[test]
  fn test_single_forklift_walks_to_exit() {
    let report = run("1 3\n3 0 4", &[], false);
    assert_eq!(report.fitness, 2);
    assert_eq!(report.forced_exits, 0);
    assert_eq!(report.actions, vec![vec![Action::Right, Action::Right]]);
  }

  #[test]
  fn test_stationary_blocker_forces_one_exit() {
    // Forklift B must reach the product behind forklift A, which must pass B
    // to reach the exit. Neither can make way in a one-row corridor.
    let report = run("1 5\n2 3 0 3 4", &[1, 0], false);
    assert_eq!(report.forced_exits, 1);
    assert_eq!(report.fitness, 3 + 6 + FORCED_EXIT_PENALTY);
    assert_eq!(
      report.actions[0],
      vec![
        Action::Right,
        Action::NoMove,
        Action::NoMove,
        Action::NoMove,
        Action::Right,
        Action::Right,
      ]
    );
    assert_eq!(report.actions[1], vec![Action::NoMove; 3]);
  }

  #[test]
  fn test_collisions_allowed_never_block() {
    let report = run("1 5\n2 3 0 3 4", &[1, 0], true);
    assert_eq!(report.forced_exits, 0);
    assert!(report.fitness < FORCED_EXIT_PENALTY);
  }

  #[test]
  fn test_detour_around_other_forklift() {
    let text = "
      3 4
      3 0 2 1
      3 0 2 1
      0 0 0 4
    ";
    let report = run(text, &[0, 2, 1], false);
    assert_eq!(report.forced_exits, 0);
    assert!(report.fitness >= 9);
    let layout: Layout = text.parse().unwrap();
    for (start, actions) in layout.forklifts().iter().zip(&report.actions) {
      let end = actions.iter().fold(*start, |cell, action| {
        action.apply(cell, layout.floor()).unwrap()
      });
      assert_eq!(end, layout.exit());
    }
  }

  #[test]
  fn test_walled_in_forklift_is_forced_out() {
    let report = run("2 3\n3 1 0\n1 0 4", &[], false);
    assert_eq!(report.forced_exits, 1);
    assert_eq!(report.fitness, 3 + FORCED_EXIT_PENALTY);
  }
}
