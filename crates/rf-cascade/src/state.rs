//! Per-round progress state
//!
//! States are values. Every transition returns a new state and leaves the
//! old one untouched, so the copy embedded in a [`Step`](crate::Step) is
//! exactly the state as of that step.

use serde::{Deserialize, Serialize};

/// Behaviour shared by all mode states
pub trait SpinState: Clone + std::fmt::Debug + PartialEq + Send + Sync {
    /// Winning steps so far this round
    fn cascade_count(&self) -> u32;

    /// Copy with the cascade counter advanced by one
    fn with_next_cascade(&self) -> Self;

    /// Mode-independent snapshot for step records
    fn to_round_state(&self) -> RoundState;

    /// Cascade payout multiplier, `2^cascade_count`
    fn multiplier(&self) -> f64 {
        2f64.powi(self.cascade_count() as i32)
    }
}

/// Base game state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSpinState {
    pub cascade_count: u32,
}

impl SpinState for BaseSpinState {
    fn cascade_count(&self) -> u32 {
        self.cascade_count
    }

    fn with_next_cascade(&self) -> Self {
        Self {
            cascade_count: self.cascade_count + 1,
        }
    }

    fn to_round_state(&self) -> RoundState {
        RoundState::Base(*self)
    }
}

/// Free spins state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSpinsState {
    pub cascade_count: u32,
    pub free_spins_remaining: u32,
}

impl FreeSpinsState {
    /// Fresh state for a tier awarding `spins`
    pub fn awarded(spins: u32) -> Self {
        Self {
            cascade_count: 0,
            free_spins_remaining: spins,
        }
    }

    /// Copy with one free spin consumed. Never goes below zero.
    pub fn with_spin_consumed(&self) -> Self {
        Self {
            free_spins_remaining: self.free_spins_remaining.saturating_sub(1),
            ..*self
        }
    }
}

impl SpinState for FreeSpinsState {
    fn cascade_count(&self) -> u32 {
        self.cascade_count
    }

    fn with_next_cascade(&self) -> Self {
        Self {
            cascade_count: self.cascade_count + 1,
            ..*self
        }
    }

    fn to_round_state(&self) -> RoundState {
        RoundState::FreeSpins(*self)
    }
}

/// Mode-independent state snapshot carried by steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RoundState {
    Base(BaseSpinState),
    FreeSpins(FreeSpinsState),
}

impl RoundState {
    pub fn cascade_count(&self) -> u32 {
        match self {
            Self::Base(s) => s.cascade_count,
            Self::FreeSpins(s) => s.cascade_count,
        }
    }

    /// Remaining free spins; `None` for base game state
    pub fn free_spins_remaining(&self) -> Option<u32> {
        match self {
            Self::Base(_) => None,
            Self::FreeSpins(s) => Some(s.free_spins_remaining),
        }
    }
}
