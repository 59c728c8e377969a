//! Genetic algorithm parameters.
//!
//! A [`GaConfig`] can be deserialized with any serde format or read from the
//! plain `Key: value` parameter files of the warehouse experiments:
//!
//! ```text
//! Population_size: 100
//! Max_generations: 50
//! Selection: tournament
//! Tournament_size: 4
//! Recombination: pmx
//! Recombination_probability: 0.7
//! Mutation: insert
//! Mutation_probability: 0.1
//! Allow_Collisions: no
//! ```

use std::collections::HashMap;

use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;
use typed_builder::TypedBuilder;

use crate::{
  error::ConfigError,
  execution::Execution,
  mutation::{Mutation, MutationMethod},
  optimizer::GeneticAlgorithm,
  recombination::{Recombination, RecombinationMethod},
  selection::Selection,
  termination::GenerationTerminator,
};

/// Everything needed to build a [`GeneticAlgorithm`] and its problem.
#[derive(Clone, Debug, PartialEq, Deserialize, TypedBuilder)]
pub struct GaConfig {
  /// Number of individuals per generation.
  pub population_size: usize,
  /// Number of generations after the initial one.
  pub max_generations: usize,
  /// Selection operator.
  pub selection: Selection,
  /// Recombination operator.
  pub recombination: Recombination,
  /// Mutation operator.
  pub mutation: Mutation,
  /// Whether forklifts may share a cell. Allowed unless stated otherwise.
  #[serde(default = "allow")]
  #[builder(default = true)]
  pub allow_collisions: bool,
  /// Seed of the random stream.
  #[serde(default)]
  #[builder(default)]
  pub seed: u64,
  /// How populations are evaluated.
  #[serde(default)]
  #[builder(default)]
  pub execution: Execution,
}

fn allow() -> bool {
  true
}

impl GaConfig {
  /// Parses `Key: value` lines. Keys and method names are case-insensitive,
  /// blank lines, `#` comments and unknown keys are ignored.
  pub fn from_parameters(text: &str) -> Result<Self, ConfigError> {
    let params: HashMap<String, &str> = text
      .lines()
      .map(str::trim)
      .filter(|line| !line.is_empty() && !line.starts_with('#'))
      .filter_map(|line| line.split_once(':'))
      .map(|(key, value)| (key.trim().to_lowercase(), value.trim()))
      .collect();
    let get = |key: &'static str| {
      params
        .get(&key.to_lowercase())
        .copied()
        .ok_or(ConfigError::Missing(key))
    };

    let selection = match get("Selection")?.to_lowercase().as_str() {
      "tournament" => Selection::Tournament(parse(
        get("Tournament_size")?,
        "Tournament_size",
      )?),
      other => return Err(ConfigError::Selection(other.to_string())),
    };
    let recombination = Recombination::new(
      match get("Recombination")?.to_lowercase().as_str() {
        "pmx" => RecombinationMethod::Pmx,
        "ox1" => RecombinationMethod::Ox1,
        "cx" => RecombinationMethod::Cx,
        other => return Err(ConfigError::Recombination(other.to_string())),
      },
      parse(get("Recombination_probability")?, "Recombination_probability")?,
    )?;
    let mutation = Mutation::new(
      match get("Mutation")?.to_lowercase().as_str() {
        "insert" => MutationMethod::Insert,
        "psm" => MutationMethod::Psm,
        "rsm" => MutationMethod::Rsm,
        other => return Err(ConfigError::Mutation(other.to_string())),
      },
      parse(get("Mutation_probability")?, "Mutation_probability")?,
    )?;

    let config = Self {
      population_size: parse(get("Population_size")?, "Population_size")?,
      max_generations: parse(get("Max_generations")?, "Max_generations")?,
      selection,
      recombination,
      mutation,
      allow_collisions: get("Allow_Collisions")
        .ok()
        .map(|value| flag(value, "Allow_Collisions"))
        .transpose()?
        .unwrap_or(true),
      seed: get("Seed")
        .ok()
        .map(|value| parse(value, "Seed"))
        .transpose()?
        .unwrap_or_default(),
      execution: match get("Parallel")
        .ok()
        .map(|value| flag(value, "Parallel"))
        .transpose()?
      {
        Some(true) => Execution::Parallel,
        _ => Execution::Sequential,
      },
    };
    config.validate()?;
    Ok(config)
  }

  /// Checks the values a deserializer cannot check.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.population_size == 0 {
      return Err(ConfigError::Zero("population_size"));
    }
    let Selection::Tournament(size) = self.selection;
    if size == 0 {
      return Err(ConfigError::Zero("tournament_size"));
    }
    let probabilities =
      [self.recombination.probability, self.mutation.probability];
    for probability in probabilities {
      if !(0.0..=1.0).contains(&probability) {
        return Err(ConfigError::Probability(probability));
      }
    }
    Ok(())
  }

  /// Builds a genetic algorithm seeded with [`GaConfig::seed`].
  pub fn genetic_algorithm(&self) -> Result<GeneticAlgorithm, ConfigError> {
    self.validate()?;
    Ok(
      GeneticAlgorithm::builder()
        .rng(StdRng::seed_from_u64(self.seed))
        .population_size(self.population_size)
        .terminator(GenerationTerminator(self.max_generations))
        .selection(self.selection)
        .recombination(self.recombination)
        .mutation(self.mutation)
        .execution(self.execution)
        .build(),
    )
  }
}

fn parse<T: std::str::FromStr>(
  value: &str,
  key: &'static str,
) -> Result<T, ConfigError> {
  value.parse().map_err(|_| ConfigError::Value {
    key,
    value: value.to_string(),
  })
}

fn flag(value: &str, key: &'static str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
    "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
    _ => Err(ConfigError::Value {
      key,
      value: value.to_string(),
    }),
  }
}
