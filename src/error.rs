//! Error types.
//!
//! Absence of a path is not an error anywhere in this crate: path searches
//! return `Option`. The types below cover inputs that are malformed before a
//! run starts.

use thiserror::Error;

/// A genome that is not a permutation of `0..len`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenomeError {
  /// A gene is outside of `0..len`.
  #[error("gene {gene} at position {position} is out of range 0..{len}")]
  OutOfRange {
    /// Offending gene value.
    gene: usize,
    /// Index of the offending gene.
    position: usize,
    /// Genome length.
    len: usize,
  },
  /// A gene occurs more than once.
  #[error("gene {gene} is duplicated at position {position}")]
  Duplicate {
    /// Offending gene value.
    gene: usize,
    /// Index of the second occurrence.
    position: usize,
  },
}

/// A grid description that cannot be turned into a warehouse layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
  /// The first line is not `rows columns`.
  #[error("invalid grid header: {0:?}")]
  Header(String),
  /// Number of rows differs from the header.
  #[error("expected {expected} rows, found {found}")]
  RowCount {
    /// Rows announced by the header.
    expected: usize,
    /// Rows actually present.
    found: usize,
  },
  /// Number of cells in a row differs from the header.
  #[error("row {row}: expected {expected} columns, found {found}")]
  ColumnCount {
    /// Row index.
    row: usize,
    /// Columns announced by the header.
    expected: usize,
    /// Columns actually present.
    found: usize,
  },
  /// A cell code is not a known tile.
  #[error("row {row}, column {column}: unknown cell code {code:?}")]
  CellCode {
    /// Row index.
    row: usize,
    /// Column index.
    column: usize,
    /// The text found in the cell.
    code: String,
  },
  /// The grid has no exit.
  #[error("grid has no exit")]
  MissingExit,
  /// The grid has more than one exit.
  #[error("grid has more than one exit")]
  MultipleExits,
  /// The grid has no forklift.
  #[error("grid has no forklift")]
  NoForklifts,
}

/// Invalid genetic algorithm parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
  /// A required parameter is absent.
  #[error("missing parameter {0:?}")]
  Missing(&'static str),
  /// A parameter value cannot be parsed.
  #[error("invalid value {value:?} for parameter {key:?}")]
  Value {
    /// Parameter name.
    key: &'static str,
    /// Raw value.
    value: String,
  },
  /// Unknown selection method name.
  #[error("unknown selection method {0:?}")]
  Selection(String),
  /// Unknown recombination method name.
  #[error("unknown recombination method {0:?}")]
  Recombination(String),
  /// Unknown mutation method name.
  #[error("unknown mutation method {0:?}")]
  Mutation(String),
  /// A probability outside of `[0, 1]`.
  #[error("probability {0} is outside of [0, 1]")]
  Probability(f64),
  /// A size parameter that must be positive is zero.
  #[error("parameter {0:?} must be greater than zero")]
  Zero(&'static str),
}

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  /// See [`GenomeError`].
  #[error(transparent)]
  Genome(#[from] GenomeError),
  /// See [`GridError`].
  #[error(transparent)]
  Grid(#[from] GridError),
  /// See [`ConfigError`].
  #[error(transparent)]
  Config(#[from] ConfigError),
}
