//! Board model: reels of cells holding symbols

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RoundError, RoundResult};
use crate::rng::RandomSource;
use crate::symbols::Symbol;

/// Cell coordinate. `column` indexes reels left to right, `row` indexes
/// cells top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

impl Position {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

impl From<(usize, usize)> for Position {
    fn from((column, row): (usize, usize)) -> Self {
        Self { column, row }
    }
}

/// A single board cell. Its position is fixed; its symbol is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    position: Position,
    pub symbol: Symbol,
}

impl Cell {
    pub fn position(&self) -> Position {
        self.position
    }
}

/// One vertical reel. Index 0 is the top cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reel {
    cells: Vec<Cell>,
}

impl Reel {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Symbols top to bottom
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.cells.iter().map(|c| &c.symbol)
    }

    /// Number of cells on this reel holding `symbol`
    pub fn count(&self, symbol: &Symbol) -> usize {
        self.symbols().filter(|s| *s == symbol).count()
    }
}

/// Fixed-size grid of reels.
///
/// Dimensions are set at construction and never change. `Clone` is a deep
/// copy: the clone owns fresh reels and cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    width: usize,
    height: usize,
    reels: Vec<Reel>,
}

impl Board {
    /// Board filled with a single symbol
    pub fn filled(width: usize, height: usize, symbol: Symbol) -> Self {
        let reels = (0..width)
            .map(|column| Reel {
                cells: (0..height)
                    .map(|row| Cell {
                        position: Position::new(column, row),
                        symbol: symbol.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            width,
            height,
            reels,
        }
    }

    /// Board from reel columns (each column top to bottom).
    ///
    /// All columns must have the same length.
    pub fn from_columns(columns: Vec<Vec<Symbol>>) -> RoundResult<Self> {
        let width = columns.len();
        let height = columns.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = columns.iter().position(|c| c.len() != height) {
            return Err(RoundError::Config(format!(
                "reel {} has {} cells, expected {}",
                bad,
                columns[bad].len(),
                height
            )));
        }

        let reels = columns
            .into_iter()
            .enumerate()
            .map(|(column, symbols)| Reel {
                cells: symbols
                    .into_iter()
                    .enumerate()
                    .map(|(row, symbol)| Cell {
                        position: Position::new(column, row),
                        symbol,
                    })
                    .collect(),
            })
            .collect();

        Ok(Self {
            width,
            height,
            reels,
        })
    }

    /// Uniformly random board over `allowed`.
    ///
    /// Draws reel by reel, top to bottom, one draw per cell.
    pub fn random(
        width: usize,
        height: usize,
        rng: &mut dyn RandomSource,
        allowed: &[Symbol],
    ) -> Self {
        assert!(!allowed.is_empty(), "random board needs a non-empty draw set");
        let mut board = Self::filled(width, height, Symbol::EMPTY);
        for reel in &mut board.reels {
            for cell in &mut reel.cells {
                cell.symbol = allowed[rng.next(allowed.len())].clone();
            }
        }
        board
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    /// Reels for in-place collapse and refill. Shape and positions must be
    /// left as they are.
    pub(crate) fn reels_mut(&mut self) -> &mut [Reel] {
        &mut self.reels
    }

    fn check(&self, position: Position) -> RoundResult<()> {
        if position.column < self.width && position.row < self.height {
            Ok(())
        } else {
            Err(RoundError::OutOfRange {
                position,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Cell at `position`
    pub fn cell_at(&self, position: Position) -> RoundResult<&Cell> {
        self.check(position)?;
        Ok(&self.reels[position.column].cells[position.row])
    }

    /// Mutable symbol at `position`. The only way to change a board from
    /// outside the crate, so cells keep their positions.
    pub fn symbol_at_mut(&mut self, position: Position) -> RoundResult<&mut Symbol> {
        self.check(position)?;
        Ok(&mut self.reels[position.column].cells[position.row].symbol)
    }

    /// Symbol at `position`
    pub fn symbol_at(&self, position: Position) -> RoundResult<&Symbol> {
        self.cell_at(position).map(|c| &c.symbol)
    }

    /// Replace the symbol at `position`
    pub fn set_symbol(&mut self, position: Position, symbol: Symbol) -> RoundResult<()> {
        *self.symbol_at_mut(position)? = symbol;
        Ok(())
    }

    /// All cells, reel by reel, top to bottom
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.reels.iter().flat_map(|r| r.cells.iter())
    }

    /// Occurrences of `symbol` anywhere on the board
    pub fn count(&self, symbol: &Symbol) -> usize {
        self.reels.iter().map(|r| r.count(symbol)).sum()
    }

    /// Symbol codes per reel (for logging and snapshots)
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        self.reels
            .iter()
            .map(|r| r.symbols().map(|s| s.code().to_string()).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for (column, reel) in self.reels.iter().enumerate() {
                if column > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:<7}", reel.cells[row].symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
