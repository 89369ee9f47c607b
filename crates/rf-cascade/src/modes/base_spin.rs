//! Base game mode

use crate::board::Board;
use crate::error::{RoundError, RoundResult};
use crate::mode::{GameMode, StepType};
use crate::rng::RandomSource;
use crate::state::{BaseSpinState, SpinState};
use crate::step::Step;
use crate::symbols::Symbol;

use super::{CascadeRules, PreparedStep, SpinMode};

/// Scatter count threshold and the mode it awards
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterAward {
    pub min_scatters: usize,
    pub mode: GameMode,
}

/// Standard awards: 3 scatters -> 7 spins, 4 -> 9, 5 or more -> 11
pub fn standard_scatter_awards() -> Vec<ScatterAward> {
    vec![
        ScatterAward {
            min_scatters: 3,
            mode: GameMode::FREE_SPINS_7,
        },
        ScatterAward {
            min_scatters: 4,
            mode: GameMode::FREE_SPINS_9,
        },
        ScatterAward {
            min_scatters: 5,
            mode: GameMode::FREE_SPINS_11,
        },
    ]
}

/// Base game: cascades while wins keep coming, then scatters on the final
/// board decide whether free spins follow.
#[derive(Debug, Clone)]
pub struct BaseSpinMode {
    mode: GameMode,
    rules: CascadeRules,
    scatter: Symbol,
    scatter_awards: Vec<ScatterAward>,
    allowed_transitions: Vec<GameMode>,
}

impl BaseSpinMode {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            rules: CascadeRules::standard(),
            scatter: Symbol::SCATTER,
            scatter_awards: standard_scatter_awards(),
            allowed_transitions: vec![
                GameMode::FREE_SPINS_7,
                GameMode::FREE_SPINS_9,
                GameMode::FREE_SPINS_11,
            ],
        }
    }

    /// Builder: replace the cascade rules
    pub fn with_rules(mut self, rules: CascadeRules) -> Self {
        self.rules = rules;
        self
    }

    /// Builder: replace the scatter award table
    pub fn with_scatter_awards(mut self, mut awards: Vec<ScatterAward>) -> Self {
        awards.sort_by_key(|a| a.min_scatters);
        self.scatter_awards = awards;
        self
    }

    pub fn rules(&self) -> &CascadeRules {
        &self.rules
    }

    /// Modes this mode may hand over to (besides [`GameMode::NONE`])
    pub fn allowed_transitions(&self) -> &[GameMode] {
        &self.allowed_transitions
    }

    /// Highest award whose threshold `scatters` reaches
    fn award_for(&self, scatters: usize) -> GameMode {
        self.scatter_awards
            .iter()
            .rev()
            .find(|a| scatters >= a.min_scatters)
            .map(|a| a.mode.clone())
            .unwrap_or(GameMode::NONE)
    }
}

impl Default for BaseSpinMode {
    fn default() -> Self {
        Self::new(GameMode::BASE_SPIN)
    }
}

impl SpinMode for BaseSpinMode {
    type State = BaseSpinState;

    fn current_mode(&self) -> GameMode {
        self.mode.clone()
    }

    fn initialize_board(&self, width: usize, height: usize, rng: &mut dyn RandomSource) -> Board {
        self.rules.initial_board(width, height, rng)
    }

    fn initial_state(&self) -> BaseSpinState {
        BaseSpinState { cascade_count: 0 }
    }

    fn evaluate_step(&self, board: Board, state: &BaseSpinState, is_initial_step: bool) -> Step {
        // no respins in the base game
        let step_type = if is_initial_step {
            StepType::InitialStep
        } else {
            StepType::Cascade
        };
        self.rules.evaluate_step(board, state, step_type)
    }

    fn prepare_board_for_next_step(
        &self,
        rng: &mut dyn RandomSource,
        last_step: &Step,
        state: &BaseSpinState,
    ) -> RoundResult<PreparedStep<BaseSpinState>> {
        if !last_step.has_wins() {
            return Ok(PreparedStep {
                board: last_step.board().clone(),
                state: *state,
            });
        }

        Ok(PreparedStep {
            board: self.rules.cascade(rng, last_step)?,
            state: state.with_next_cascade(),
        })
    }

    fn should_have_next_step(
        &self,
        _rng: &mut dyn RandomSource,
        step: &Step,
        _state: &BaseSpinState,
    ) -> bool {
        step.has_wins()
    }

    fn next_mode(&self, last_step: &Step) -> RoundResult<GameMode> {
        let scatters = last_step.board().count(&self.scatter);
        let next = self.award_for(scatters);
        if !next.is_none() && !self.allowed_transitions.contains(&next) {
            return Err(RoundError::IllegalTransition {
                from: self.mode.clone(),
                to: next,
            });
        }
        Ok(next)
    }
}
