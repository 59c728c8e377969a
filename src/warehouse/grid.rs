//! Warehouse floor plans and their text format.

use std::{fmt, str::FromStr};

use crate::error::GridError;

/// A position on the floor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Cell {
  /// Row index, growing downwards.
  pub row: usize,
  /// Column index, growing to the right.
  pub column: usize,
}

impl Cell {
  /// Creates a cell.
  pub const fn new(row: usize, column: usize) -> Self {
    Self { row, column }
  }

  /// Manhattan distance to `other`.
  pub fn manhattan(&self, other: Cell) -> usize {
    self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
  }

  /// Returns `true` if `other` shares an edge with this cell.
  pub fn is_adjacent(&self, other: Cell) -> bool {
    self.manhattan(other) == 1
  }
}

impl fmt::Display for Cell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.row, self.column)
  }
}

/// Content of a cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Tile {
  /// Free floor, code `0`.
  Empty,
  /// A shelf, code `1`.
  Shelf,
  /// A shelf holding a product to collect, code `2`.
  Product,
  /// A forklift, code `3`.
  Forklift,
  /// The exit, code `4`.
  Exit,
  /// A shelf whose product was already collected, code `5`.
  Collected,
}

impl Tile {
  /// Returns the tile of a numeric cell code.
  pub fn from_code(code: u8) -> Option<Self> {
    Some(match code {
      0 => Tile::Empty,
      1 => Tile::Shelf,
      2 => Tile::Product,
      3 => Tile::Forklift,
      4 => Tile::Exit,
      5 => Tile::Collected,
      _ => return None,
    })
  }

  /// Returns `true` for shelves, with or without a product.
  pub fn is_shelf(self) -> bool {
    matches!(self, Tile::Shelf | Tile::Product | Tile::Collected)
  }

  /// Returns the numeric cell code.
  pub fn code(self) -> u8 {
    match self {
      Tile::Empty => 0,
      Tile::Shelf => 1,
      Tile::Product => 2,
      Tile::Forklift => 3,
      Tile::Exit => 4,
      Tile::Collected => 5,
    }
  }
}

/// The tiles of a warehouse. Forklift tiles follow the forklifts as they
/// move; the exit tile never changes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Floor {
  rows: usize,
  columns: usize,
  tiles: Vec<Tile>,
  exit: Cell,
}

impl Floor {
  /// Number of rows.
  pub fn rows(&self) -> usize {
    self.rows
  }

  /// Number of columns.
  pub fn columns(&self) -> usize {
    self.columns
  }

  /// The exit cell.
  pub fn exit(&self) -> Cell {
    self.exit
  }

  /// Returns `true` if `cell` lies on the floor.
  pub fn contains(&self, cell: Cell) -> bool {
    cell.row < self.rows && cell.column < self.columns
  }

  /// Returns the tile at `cell`.
  ///
  /// # Panics
  ///
  /// Panics if `cell` is not on the floor.
  pub fn tile(&self, cell: Cell) -> Tile {
    self.tiles[cell.row * self.columns + cell.column]
  }

  /// Returns `true` if a forklift may enter `cell`: it is empty, the exit,
  /// or holds another forklift while collisions are allowed.
  pub fn is_movable(&self, cell: Cell, allow_collisions: bool) -> bool {
    self.contains(cell)
      && match self.tile(cell) {
        Tile::Empty | Tile::Exit => true,
        Tile::Forklift => allow_collisions,
        Tile::Shelf | Tile::Product | Tile::Collected => false,
      }
  }

  pub(crate) fn move_forklift(&mut self, from: Cell, to: Cell) {
    self.remove_forklift(from);
    self.place_forklift(to);
  }

  pub(crate) fn remove_forklift(&mut self, at: Cell) {
    self.set(at, Tile::Empty);
  }

  pub(crate) fn place_forklift(&mut self, at: Cell) {
    self.set(at, Tile::Forklift);
  }

  fn set(&mut self, at: Cell, tile: Tile) {
    if at != self.exit {
      self.tiles[at.row * self.columns + at.column] = tile;
    }
  }
}

impl fmt::Display for Floor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{} {}", self.rows, self.columns)?;
    for row in self.tiles.chunks(self.columns) {
      let codes: Vec<String> =
        row.iter().map(|tile| tile.code().to_string()).collect();
      writeln!(f, "{}", codes.join(" "))?;
    }
    Ok(())
  }
}

/// A parsed warehouse: its floor plus the forklift starts and the products,
/// both in row-major order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Layout {
  floor: Floor,
  forklifts: Vec<Cell>,
  products: Vec<Cell>,
}

impl Layout {
  /// The floor in its initial configuration.
  pub fn floor(&self) -> &Floor {
    &self.floor
  }

  /// Starting cells of the forklifts.
  pub fn forklifts(&self) -> &[Cell] {
    &self.forklifts
  }

  /// Cells of the products to collect.
  pub fn products(&self) -> &[Cell] {
    &self.products
  }

  /// The exit cell.
  pub fn exit(&self) -> Cell {
    self.floor.exit
  }
}

impl FromStr for Layout {
  type Err = GridError;

  /// Parses a `rows columns` header followed by `rows` lines of
  /// whitespace-separated cell codes. Blank lines are skipped.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());
    let header = lines.next().unwrap_or_default();
    let (rows, columns) = match header
      .split_whitespace()
      .map(str::parse::<usize>)
      .collect::<Vec<_>>()
      .as_slice()
    {
      [Ok(rows), Ok(columns)] if *rows > 0 && *columns > 0 => (*rows, *columns),
      _ => return Err(GridError::Header(header.to_string())),
    };

    let mut tiles = Vec::with_capacity(rows * columns);
    let mut found = 0;
    for (row, line) in lines.enumerate() {
      found += 1;
      if row >= rows {
        continue;
      }
      let codes: Vec<&str> = line.split_whitespace().collect();
      if codes.len() != columns {
        return Err(GridError::ColumnCount {
          row,
          expected: columns,
          found: codes.len(),
        });
      }
      for (column, code) in codes.into_iter().enumerate() {
        let tile = code.parse().ok().and_then(Tile::from_code).ok_or_else(
          || GridError::CellCode {
            row,
            column,
            code: code.to_string(),
          },
        )?;
        tiles.push(tile);
      }
    }
    if found != rows {
      return Err(GridError::RowCount {
        expected: rows,
        found,
      });
    }

    let mut exit = None;
    let mut forklifts = vec![];
    let mut products = vec![];
    for (idx, tile) in tiles.iter().enumerate() {
      let cell = Cell::new(idx / columns, idx % columns);
      match tile {
        Tile::Exit if exit.is_some() => return Err(GridError::MultipleExits),
        Tile::Exit => exit = Some(cell),
        Tile::Forklift => forklifts.push(cell),
        Tile::Product => products.push(cell),
        Tile::Empty | Tile::Shelf | Tile::Collected => {}
      }
    }
    let exit = exit.ok_or(GridError::MissingExit)?;
    if forklifts.is_empty() {
      return Err(GridError::NoForklifts);
    }

    Ok(Self {
      floor: Floor {
        rows,
        columns,
        tiles,
        exit,
      },
      forklifts,
      products,
    })
  }
}
