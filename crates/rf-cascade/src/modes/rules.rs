//! Cascade mechanics shared by all spin modes

use std::sync::Arc;

use crate::board::{Board, Position, Reel};
use crate::error::RoundResult;
use crate::mode::StepType;
use crate::paytable::{CellCombination, PayTable, WaysEvaluator, WinEvaluator, activated_positions};
use crate::rng::RandomSource;
use crate::state::SpinState;
use crate::step::Step;
use crate::symbols::{STANDARD_DRAW_SET, Symbol};

/// Pay table, draw set and evaluator for a mode, plus the collapse and
/// refill algorithm every mode uses.
#[derive(Clone)]
pub struct CascadeRules {
    pay_table: PayTable,
    draw_set: Vec<Symbol>,
    wild: Symbol,
    evaluator: Arc<dyn WinEvaluator>,
}

impl std::fmt::Debug for CascadeRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadeRules")
            .field("pay_table", &self.pay_table)
            .field("draw_set", &self.draw_set)
            .field("wild", &self.wild)
            .finish_non_exhaustive()
    }
}

impl Default for CascadeRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl CascadeRules {
    /// Standard pay table, standard draw set, ways evaluation
    pub fn standard() -> Self {
        Self {
            pay_table: PayTable::standard(),
            draw_set: STANDARD_DRAW_SET.to_vec(),
            wild: Symbol::WILD,
            evaluator: Arc::new(WaysEvaluator),
        }
    }

    /// Builder: replace the pay table
    pub fn with_pay_table(mut self, pay_table: PayTable) -> Self {
        self.pay_table = pay_table;
        self
    }

    /// Builder: replace the draw set. Must hold at least one non-wild symbol.
    pub fn with_draw_set(mut self, draw_set: Vec<Symbol>) -> Self {
        assert!(
            draw_set.iter().any(|s| *s != self.wild),
            "draw set must hold a non-wild symbol"
        );
        self.draw_set = draw_set;
        self
    }

    /// Builder: replace the win evaluator
    pub fn with_evaluator(mut self, evaluator: Arc<dyn WinEvaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn pay_table(&self) -> &PayTable {
        &self.pay_table
    }

    pub fn draw_set(&self) -> &[Symbol] {
        &self.draw_set
    }

    pub fn wild(&self) -> &Symbol {
        &self.wild
    }

    fn draw(&self, rng: &mut dyn RandomSource) -> Symbol {
        self.draw_set[rng.next(self.draw_set.len())].clone()
    }

    /// Fully random board over the draw set
    pub fn random_board(&self, width: usize, height: usize, rng: &mut dyn RandomSource) -> Board {
        Board::random(width, height, rng, &self.draw_set)
    }

    /// Random opening board with every drawn wild redrawn once.
    ///
    /// The wild only ever reaches the board as a cascade seed.
    pub fn initial_board(&self, width: usize, height: usize, rng: &mut dyn RandomSource) -> Board {
        let mut board = self.random_board(width, height, rng);
        let non_wild: Vec<Symbol> = self
            .draw_set
            .iter()
            .filter(|s| **s != self.wild)
            .cloned()
            .collect();
        assert!(!non_wild.is_empty(), "draw set has no non-wild symbol");

        for reel in board.reels_mut() {
            for cell in reel.cells_mut() {
                if cell.symbol == self.wild {
                    cell.symbol = non_wild[rng.next(non_wild.len())].clone();
                }
            }
        }
        board
    }

    /// Winning combinations on `board`, wild substituting
    pub fn evaluate(&self, board: &Board) -> Vec<CellCombination> {
        self.evaluator.evaluate(board, &self.pay_table, Some(&self.wild))
    }

    /// Evaluate `board` into a step of a fixed type
    pub fn evaluate_step<S: SpinState>(
        &self,
        board: Board,
        state: &S,
        step_type: StepType,
    ) -> Step {
        self.evaluate_step_with(board, state, |_| step_type)
    }

    /// Evaluate `board` into a step whose type depends on whether it won.
    ///
    /// Payout is the sum of combination payouts times `2^cascade_count`.
    pub fn evaluate_step_with<S: SpinState>(
        &self,
        board: Board,
        state: &S,
        step_type: impl FnOnce(bool) -> StepType,
    ) -> Step {
        let wins = self.evaluate(&board);
        let step_type = step_type(!wins.is_empty());
        let base_win: f64 = wins.iter().map(|c| c.payout).sum();
        let step_win = base_win * state.multiplier();
        Step::new(board, wins, step_win, state.to_round_state(), step_type)
    }

    /// Collapse the winning cells of `last_step` and refill.
    ///
    /// Winning cells are cleared, one of them (uniform draw) becomes the
    /// wild, every reel falls under gravity, and the gaps left at the top
    /// are refilled reel by reel, top to bottom.
    pub fn cascade(&self, rng: &mut dyn RandomSource, last_step: &Step) -> RoundResult<Board> {
        let activated = activated_positions(last_step.won_combinations());
        assert!(
            !activated.is_empty(),
            "cascade requested for a step without activated cells"
        );

        let mut board = last_step.board().clone();
        let seed: Position = activated[rng.next(activated.len())];
        for pos in &activated {
            board.set_symbol(*pos, Symbol::EMPTY)?;
        }
        board.set_symbol(seed, self.wild.clone())?;
        log::trace!("cascade: cleared {} cells, wild seeded at {}", activated.len(), seed);

        for reel in board.reels_mut() {
            collapse(reel);
            for cell in reel.cells_mut() {
                if cell.symbol.is_empty() {
                    cell.symbol = self.draw(rng);
                }
            }
        }
        Ok(board)
    }
}

/// Drop every symbol on `reel` down past the empty cells below it.
///
/// Surviving symbols keep their relative order; all empties end on top.
pub fn collapse(reel: &mut Reel) {
    let cells = reel.cells_mut();
    for y in (0..cells.len()).rev() {
        if !cells[y].symbol.is_empty() {
            continue;
        }
        if let Some(above) = (0..y).rev().find(|&a| !cells[a].symbol.is_empty()) {
            let symbol = std::mem::replace(&mut cells[above].symbol, Symbol::EMPTY);
            cells[y].symbol = symbol;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::testing::ScriptedRng;
    use crate::state::BaseSpinState;

    use crate::symbols::Symbol as S;

    fn column_symbols(board: &Board, column: usize) -> Vec<Symbol> {
        board.reels()[column].symbols().cloned().collect()
    }

    #[test]
    fn test_collapse_keeps_order() {
        let mut board = Board::from_columns(vec![vec![
            S::HI1,
            S::EMPTY,
            S::LOW2,
            S::EMPTY,
            S::HI3,
            S::EMPTY,
        ]])
        .unwrap();
        collapse(&mut board.reels_mut()[0]);

        assert_eq!(
            column_symbols(&board, 0),
            vec![S::EMPTY, S::EMPTY, S::EMPTY, S::HI1, S::LOW2, S::HI3]
        );
    }

    #[test]
    fn test_collapse_full_and_empty_reels() {
        let mut board = Board::from_columns(vec![
            vec![S::HI1, S::HI2, S::HI3],
            vec![S::EMPTY, S::EMPTY, S::EMPTY],
        ])
        .unwrap();
        for reel in board.reels_mut() {
            collapse(reel);
        }
        assert_eq!(column_symbols(&board, 0), vec![S::HI1, S::HI2, S::HI3]);
        assert_eq!(column_symbols(&board, 1), vec![S::EMPTY, S::EMPTY, S::EMPTY]);
    }

    #[test]
    fn test_initial_board_redraws_wilds() {
        let rules = CascadeRules::standard().with_draw_set(vec![S::WILD, S::HI1, S::LOW1]);
        // 2x2 board: draws W, H, W, L then one redraw per wild
        let mut rng = ScriptedRng::new(vec![0, 1, 0, 2, 1, 0]);
        let board = rules.initial_board(2, 2, &mut rng);

        assert_eq!(board.count(&S::WILD), 0);
        assert_eq!(rng.calls(), 6);
        // redraws are over the non-wild symbols only
        assert_eq!(&rng.bounds[4..], &[2, 2]);
        assert_eq!(column_symbols(&board, 0), vec![S::LOW1, S::HI1]);
        assert_eq!(column_symbols(&board, 1), vec![S::HI1, S::LOW1]);
    }

    #[test]
    #[should_panic(expected = "non-wild")]
    fn test_wild_only_draw_set_rejected() {
        let _ = CascadeRules::standard().with_draw_set(vec![S::WILD]);
    }

    #[test]
    #[should_panic(expected = "non-wild")]
    fn test_empty_draw_set_rejected() {
        let _ = CascadeRules::standard().with_draw_set(Vec::new());
    }

    #[test]
    fn test_evaluate_step_applies_multiplier() {
        let rules = CascadeRules::standard();
        let board = Board::from_columns(vec![
            vec![S::HI1, S::LOW1, S::LOW2],
            vec![S::HI1, S::LOW3, S::LOW4],
            vec![S::HI1, S::HI2, S::HI3],
            vec![S::LOW2, S::HI4, S::SCATTER],
            vec![S::LOW3, S::LOW4, S::HI2],
        ])
        .unwrap();
        let state = BaseSpinState { cascade_count: 1 };
        let step = rules.evaluate_step(board, &state, StepType::Cascade);

        assert!(step.has_wins());
        assert!((step.step_win() - 1.0).abs() < 0.001);
        assert_eq!(step.state().cascade_count(), 1);
    }

    #[test]
    fn test_cascade_seeds_one_wild_and_refills() {
        let rules = CascadeRules::standard();
        let board = Board::from_columns(vec![
            vec![S::LOW1, S::LOW2, S::HI1],
            vec![S::LOW3, S::HI1, S::LOW4],
            vec![S::HI1, S::SCATTER, S::HI2],
            vec![S::HI3, S::HI4, S::LOW1],
        ])
        .unwrap();
        let step = rules.evaluate_step(board, &BaseSpinState::default(), StepType::InitialStep);
        assert_eq!(step.won_combinations().len(), 1);

        // seed index 1 -> (1,1), which fills reel 1 back up; reels 0 and 2
        // each need one refill
        let mut rng = ScriptedRng::new(vec![1, 4, 5]);
        let next = rules.cascade(&mut rng, &step).unwrap();

        assert_eq!(rng.calls(), 3);
        assert_eq!(rng.bounds[0], 3);
        assert_eq!(column_symbols(&next, 0), vec![S::LOW1, S::LOW1, S::LOW2]);
        assert_eq!(column_symbols(&next, 1), vec![S::LOW3, S::WILD, S::LOW4]);
        assert_eq!(column_symbols(&next, 2), vec![S::LOW2, S::SCATTER, S::HI2]);
        assert_eq!(column_symbols(&next, 3), vec![S::HI3, S::HI4, S::LOW1]);
        assert!(next.cells().all(|c| !c.symbol.is_empty()));

        // the evaluated board is untouched
        assert_eq!(step.board().count(&S::WILD), 0);
    }
}
