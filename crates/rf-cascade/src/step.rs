//! Step records produced by the modes

use serde::Serialize;

use crate::board::Board;
use crate::mode::StepType;
use crate::paytable::CellCombination;
use crate::state::RoundState;

/// One evaluated board state. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    board: Board,
    won_combinations: Vec<CellCombination>,
    step_win: f64,
    state: RoundState,
    step_type: StepType,
}

impl Step {
    pub fn new(
        board: Board,
        won_combinations: Vec<CellCombination>,
        step_win: f64,
        state: RoundState,
        step_type: StepType,
    ) -> Self {
        Self {
            board,
            won_combinations,
            step_win,
            state,
            step_type,
        }
    }

    /// Board this step was evaluated on
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn won_combinations(&self) -> &[CellCombination] {
        &self.won_combinations
    }

    /// Total payout including the cascade multiplier
    pub fn step_win(&self) -> f64 {
        self.step_win
    }

    /// State as of this step
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn step_type(&self) -> StepType {
        self.step_type
    }

    pub fn has_wins(&self) -> bool {
        !self.won_combinations.is_empty()
    }
}
