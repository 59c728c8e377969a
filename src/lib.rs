//! **forklift-ga** plans warehouse picking routes for several forklifts with
//! a genetic algorithm whose fitness function is backed by A* path search.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! The crate is split in two halves that meet at the [`Problem`] trait.
//! - The **genetic algorithm** evolves permutations. A [`GeneticAlgorithm`]
//!   runs the usual loop over a [`Population`]:
//!   1. **Select** parents with a [`Selection`]
//!   2. **Recombine** successive pairs with a [`Recombination`]
//!   3. **Mutate** each individual with a [`Mutation`]
//!   4. **Evaluate** every individual with the [`Problem`]
//!   5. **Terminate** once a [`GenerationTerminator`] says so or a
//!      [`StopHandle`] is raised
//! - The **warehouse** implements [`Problem`]. A genome lists product indices
//!   and forklift markers; [`WarehouseProblem`] decodes it into one route per
//!   forklift and prices the routes with paths found by [`informed_search`].
//!
//! # Operators
//!
//! Operators are closed sets of variants chosen at setup time, for instance
//! from a [`GaConfig`]. Every operator keeps genomes valid permutations.
//!
//! | Operator          | Variants                |
//! |:------------------|:------------------------|
//! | [`Selection`]     | tournament              |
//! | [`Recombination`] | PMX, OX1, CX            |
//! | [`Mutation`]      | Insert, PSM, RSM        |
//!
//! # Randomness
//!
//! All randomness of a run flows through the one [`StdRng`] owned by the
//! [`GeneticAlgorithm`], in a fixed order. The same seed always yields the same
//! run, whatever the [`Execution`] strategy.
//!
//! # Parallelization
//!
//! Fitness evaluation is the only step that may run on the [rayon] thread
//! pool, see [`Execution::Parallel`]. The [`PairCache`] is always built in
//! parallel since every pair is searched independently.
//!
//! # Logging
//!
//! The crate reports through [tracing] and never installs a subscriber:
//! runs and the pair cache log at `info`, generations at `debug`, unreachable
//! pairs at `warn` and simulation replans at `trace`.
//!
//! # Example
//!
//! ```no_run
//! use forklift_ga::{GaConfig, Layout, WarehouseProblem};
//!
//! let config = GaConfig::from_parameters(
//!   "Population_size: 100
//!    Max_generations: 50
//!    Selection: tournament
//!    Tournament_size: 4
//!    Recombination: pmx
//!    Recombination_probability: 0.7
//!    Mutation: insert
//!    Mutation_probability: 0.1
//!    Allow_Collisions: no",
//! )?;
//! let layout: Layout = "4 5
//!   3 0 2 1 0
//!   3 0 2 0 0
//!   0 0 1 2 0
//!   0 0 0 0 4"
//!   .parse()?;
//! let problem = WarehouseProblem::new(layout, config.allow_collisions);
//! let best = config.genetic_algorithm()?.run(&problem);
//! println!("{}", problem.routes(best.genome()));
//! # Ok::<(), forklift_ga::Error>(())
//! ```
//!
//! [`StdRng`]: rand::rngs::StdRng
//! [`PairCache`]: crate::warehouse::PairCache
//! [`informed_search`]: crate::search::informed_search

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod execution;
pub mod individual;
pub mod mutation;
pub mod optimizer;
pub mod population;
pub mod recombination;
pub mod search;
pub mod selection;
pub mod termination;
pub mod warehouse;

pub use config::GaConfig;
pub use error::{ConfigError, Error, GenomeError, GridError};
pub use execution::Execution;
pub use individual::{Fitness, Gene, Individual, Problem};
pub use mutation::{Mutation, MutationMethod};
pub use optimizer::{GaEvent, GeneticAlgorithm, Listener};
pub use population::Population;
pub use recombination::{Recombination, RecombinationMethod};
pub use selection::Selection;
pub use termination::{GenerationTerminator, StopHandle};
pub use warehouse::{Layout, WarehouseProblem};
