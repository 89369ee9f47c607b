//! Spin modes: one strategy per game mode
//!
//! Each mode owns the full per-step lifecycle of a round in that mode. The
//! base game and the free spins tiers share the cascade mechanics through
//! [`CascadeRules`] and differ only in how a round ends and where it leads.
//!
//! ## Round lifecycle
//!
//! ```text
//! initialize_board + initial_state
//!        │
//!        v
//! evaluate_step ──> should_have_next_step? ──no──> next_mode
//!        ^                    │ yes
//!        │                    v
//!        └──── prepare_board_for_next_step
//! ```

mod base_spin;
mod free_spins;
mod rules;

pub use base_spin::*;
pub use free_spins::*;
pub use rules::*;

use std::collections::HashMap;

use crate::board::Board;
use crate::error::RoundResult;
use crate::mode::{Feature, GameMode, StepType};
use crate::rng::RandomSource;
use crate::state::SpinState;
use crate::step::Step;

/// Board and state for the next step of a round
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedStep<S> {
    pub board: Board,
    pub state: S,
}

/// The per-mode round strategy.
///
/// Random draws happen only inside `initialize_board` and
/// `prepare_board_for_next_step`, in a fixed order, so a seeded source
/// replays a round exactly.
pub trait SpinMode: Send + Sync {
    /// Mode-specific round state
    type State: SpinState;

    /// This mode's identifier
    fn current_mode(&self) -> GameMode;

    /// Random opening board. Never contains the wild.
    fn initialize_board(&self, width: usize, height: usize, rng: &mut dyn RandomSource) -> Board;

    /// Zero-valued state for a new round
    fn initial_state(&self) -> Self::State;

    /// Evaluate `board` under `state`.
    ///
    /// The returned step carries a copy of `state` as given; advancing the
    /// cascade counter is left to [`prepare_board_for_next_step`].
    ///
    /// [`prepare_board_for_next_step`]: SpinMode::prepare_board_for_next_step
    fn evaluate_step(&self, board: Board, state: &Self::State, is_initial_step: bool) -> Step;

    /// Board and state for the step following `last_step`
    fn prepare_board_for_next_step(
        &self,
        rng: &mut dyn RandomSource,
        last_step: &Step,
        state: &Self::State,
    ) -> RoundResult<PreparedStep<Self::State>>;

    /// Should the round continue after `step`?
    fn should_have_next_step(
        &self,
        rng: &mut dyn RandomSource,
        step: &Step,
        state: &Self::State,
    ) -> bool;

    /// Mode to enter once the round ends, [`GameMode::NONE`] for none
    fn next_mode(&self, last_step: &Step) -> RoundResult<GameMode>;

    /// Feature occurrences in `step`
    fn count_feature_occurrences(&self, step: &Step) -> HashMap<Feature, u32> {
        let mut counts = HashMap::new();
        if step.step_type() == StepType::Cascade && step.has_wins() {
            counts.insert(Feature::AVALANCHE, 1);
        }
        counts
    }
}
