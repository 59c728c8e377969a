//! Warehouse picking: forklifts collecting products on a grid and leaving
//! through a single exit.
//!
//! A [`Layout`] is parsed from text, a [`PairCache`] holds the shortest paths
//! between every forklift start, product and the exit, and a
//! [`WarehouseProblem`] turns genomes into [`Routes`] and scores them, either
//! by summing cached distances or by simulating forklifts that block each
//! other.

pub mod action;
pub mod forklift;
pub mod grid;
pub mod pairs;
pub mod planner;
pub mod problem;
pub mod routes;
pub mod simulation;
pub mod state;

pub use action::Action;
pub use grid::{Cell, Floor, Layout, Tile};
pub use pairs::{standing_cell, Pair, PairCache};
pub use planner::{plan, PathProblem};
pub use problem::{Paths, WarehouseProblem};
pub use routes::Routes;
pub use simulation::{simulate, Simulation, FORCED_EXIT_PENALTY, MAX_RETRIES};
pub use state::WarehouseState;
