//! Free spins mode
//!
//! Cascades exactly like the base game. A step without a win consumes one
//! free spin and redraws the whole board (a virtual respin) until the
//! spins run out. Free spins never lead to another mode.

use crate::board::Board;
use crate::error::{RoundError, RoundResult};
use crate::mode::{GameMode, StepType};
use crate::rng::RandomSource;
use crate::state::{FreeSpinsState, SpinState};
use crate::step::Step;

use super::{CascadeRules, PreparedStep, SpinMode};

/// Free spins tier
#[derive(Debug, Clone)]
pub struct FreeSpinsMode {
    mode: GameMode,
    spins: u32,
    rules: CascadeRules,
}

impl FreeSpinsMode {
    /// Mode for a standard tier (7, 9 or 11 spins)
    pub fn new(mode: GameMode) -> RoundResult<Self> {
        let spins = mode.free_spins_awarded().ok_or_else(|| {
            RoundError::Config(format!("{mode} is not a free spins tier"))
        })?;
        Ok(Self::with_spins(mode, spins))
    }

    /// Mode awarding an explicit number of spins
    pub fn with_spins(mode: GameMode, spins: u32) -> Self {
        Self {
            mode,
            spins,
            rules: CascadeRules::standard(),
        }
    }

    /// Builder: replace the cascade rules
    pub fn with_rules(mut self, rules: CascadeRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &CascadeRules {
        &self.rules
    }

    /// Spins awarded on entry
    pub fn spins(&self) -> u32 {
        self.spins
    }
}

impl SpinMode for FreeSpinsMode {
    type State = FreeSpinsState;

    fn current_mode(&self) -> GameMode {
        self.mode.clone()
    }

    fn initialize_board(&self, width: usize, height: usize, rng: &mut dyn RandomSource) -> Board {
        self.rules.initial_board(width, height, rng)
    }

    fn initial_state(&self) -> FreeSpinsState {
        FreeSpinsState::awarded(self.spins)
    }

    fn evaluate_step(&self, board: Board, state: &FreeSpinsState, is_initial_step: bool) -> Step {
        self.rules.evaluate_step_with(board, state, |has_wins| {
            if is_initial_step {
                StepType::InitialStep
            } else if has_wins {
                StepType::Cascade
            } else {
                StepType::VirtualRespin
            }
        })
    }

    fn prepare_board_for_next_step(
        &self,
        rng: &mut dyn RandomSource,
        last_step: &Step,
        state: &FreeSpinsState,
    ) -> RoundResult<PreparedStep<FreeSpinsState>> {
        if last_step.has_wins() {
            return Ok(PreparedStep {
                board: self.rules.cascade(rng, last_step)?,
                state: state.with_next_cascade(),
            });
        }

        if state.free_spins_remaining > 0 {
            let board = last_step.board();
            log::trace!(
                "{}: virtual respin, {} spins left",
                self.mode,
                state.free_spins_remaining - 1
            );
            return Ok(PreparedStep {
                board: self.rules.random_board(board.width(), board.height(), rng),
                state: state.with_spin_consumed(),
            });
        }

        Ok(PreparedStep {
            board: last_step.board().clone(),
            state: *state,
        })
    }

    fn should_have_next_step(
        &self,
        _rng: &mut dyn RandomSource,
        step: &Step,
        state: &FreeSpinsState,
    ) -> bool {
        step.has_wins() || state.free_spins_remaining > 0
    }

    fn next_mode(&self, _last_step: &Step) -> RoundResult<GameMode> {
        Ok(GameMode::NONE)
    }
}
