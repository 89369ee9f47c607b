//! Pay table and ways win evaluation

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::symbols::Symbol;

/// Minimum reel run that pays; pay tiers start here.
pub const MIN_MATCH: usize = 3;

/// Symbol pay values indexed by match tier (index 0 = 3 of a kind).
///
/// Iteration order is insertion order, which fixes the order of evaluated
/// combinations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayTable {
    pays: IndexMap<Symbol, Vec<f64>>,
}

impl PayTable {
    /// Empty pay table
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard cascading pay table (3/4/5 of a kind)
    pub fn standard() -> Self {
        Self::new()
            .with(Symbol::WILD, &[0.5, 1.0, 2.5])
            .with(Symbol::HI1, &[0.5, 1.0, 2.5])
            .with(Symbol::HI2, &[0.3, 0.6, 1.5])
            .with(Symbol::HI3, &[0.2, 0.4, 1.0])
            .with(Symbol::HI4, &[0.2, 0.4, 1.0])
            .with(Symbol::LOW1, &[0.1, 0.2, 0.5])
            .with(Symbol::LOW2, &[0.1, 0.2, 0.5])
            .with(Symbol::LOW3, &[0.1, 0.2, 0.5])
            .with(Symbol::LOW4, &[0.1, 0.2, 0.5])
    }

    /// Builder: add or replace a symbol's pays
    pub fn with(mut self, symbol: Symbol, pays: &[f64]) -> Self {
        self.pays.insert(symbol, pays.to_vec());
        self
    }

    /// Pay value for `symbol` over a run of `match_count` reels.
    ///
    /// Runs longer than the table clamp to the top tier.
    pub fn pay(&self, symbol: &Symbol, match_count: usize) -> f64 {
        if match_count < MIN_MATCH {
            return 0.0;
        }
        let Some(tiers) = self.pays.get(symbol) else {
            return 0.0;
        };
        let idx = (match_count - MIN_MATCH).min(tiers.len().saturating_sub(1));
        tiers.get(idx).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.pays.contains_key(symbol)
    }

    /// Paying symbols in table order
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.pays.keys()
    }

    pub fn len(&self) -> usize {
        self.pays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pays.is_empty()
    }
}

/// A winning symbol group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellCombination {
    /// Winning symbol
    pub symbol: Symbol,
    /// Reels in the run
    pub match_count: usize,
    /// Number of ways (product of matching cells per reel)
    pub ways: usize,
    /// Payout before the cascade multiplier
    pub payout: f64,
    /// Cells that contributed to the win, reel by reel, top to bottom
    pub activated_cells: Vec<Position>,
}

/// Win evaluation over a board
pub trait WinEvaluator: Send + Sync {
    /// Winning combinations on `board`. `wild` substitutes for any paying
    /// symbol. Output order must be deterministic.
    fn evaluate(&self, board: &Board, pay_table: &PayTable, wild: Option<&Symbol>)
        -> Vec<CellCombination>;
}

/// Left-to-right ways evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct WaysEvaluator;

impl WaysEvaluator {
    fn evaluate_symbol(
        board: &Board,
        pay_table: &PayTable,
        symbol: &Symbol,
        wild: Option<&Symbol>,
    ) -> Option<CellCombination> {
        let is_wild_symbol = wild == Some(symbol);
        let matches = |s: &Symbol| s == symbol || (!is_wild_symbol && wild == Some(s));

        let mut activated = Vec::new();
        let mut ways = 1usize;
        let mut match_count = 0usize;
        let mut has_own_symbol = false;

        for reel in board.reels() {
            let hits: Vec<Position> = reel
                .cells()
                .iter()
                .filter(|c| matches(&c.symbol))
                .map(|c| c.position())
                .collect();
            if hits.is_empty() {
                break;
            }
            has_own_symbol |= reel.count(symbol) > 0;
            ways *= hits.len();
            match_count += 1;
            activated.extend(hits);
        }

        // A run of wilds alone pays as the wild, not as every symbol
        if match_count < MIN_MATCH || !has_own_symbol {
            return None;
        }

        let pay = pay_table.pay(symbol, match_count);
        if pay <= 0.0 {
            return None;
        }

        Some(CellCombination {
            symbol: symbol.clone(),
            match_count,
            ways,
            payout: pay * ways as f64,
            activated_cells: activated,
        })
    }
}

impl WinEvaluator for WaysEvaluator {
    fn evaluate(
        &self,
        board: &Board,
        pay_table: &PayTable,
        wild: Option<&Symbol>,
    ) -> Vec<CellCombination> {
        pay_table
            .symbols()
            .filter(|s| !s.is_empty())
            .filter_map(|s| Self::evaluate_symbol(board, pay_table, s, wild))
            .collect()
    }
}

/// Distinct activated positions across `combinations`, in first-seen order
pub fn activated_positions(combinations: &[CellCombination]) -> Vec<Position> {
    combinations
        .iter()
        .flat_map(|c| c.activated_cells.iter().copied())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
