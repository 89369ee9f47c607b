//! # rf-cascade — Cascading-Reel Round Engine
//!
//! Plays rounds of a cascading ("avalanche") slot game: winning cells are
//! removed, one of them becomes a wild, the reels fall and refill, and the
//! win multiplier doubles with every cascade.
//!
//! ## Features
//!
//! - **Ways evaluation**: left-to-right adjacent-reel wins with wild substitution
//! - **Avalanche wilds**: each cascade seeds exactly one wild
//! - **Free spins**: 7, 9 or 11 spins awarded by scatters, with virtual respins
//! - **Deterministic play**: every random draw goes through a [`RandomSource`]
//!
//! ## Architecture
//!
//! ```text
//! GameSession
//!     │
//!     ├── GameConfig (grid, seed, pay table override)
//!     └── GameModeRunners
//!           │
//!           v
//!     SpinGameModeRunner<M: SpinMode>
//!           │
//!           ├── BaseSpinMode   (cascades, scatters → free spins)
//!           └── FreeSpinsMode  (cascades, virtual respins)
//!                 │
//!                 v
//!           CascadeRules → Board + PayTable → Step
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod mode;
pub mod modes;
pub mod paytable;
pub mod rng;
pub mod runner;
pub mod state;
pub mod step;
pub mod symbols;

pub use board::*;
pub use config::*;
pub use error::*;
pub use mode::*;
pub use modes::*;
pub use paytable::*;
pub use rng::*;
pub use runner::*;
pub use state::*;
pub use step::*;
pub use symbols::*;
