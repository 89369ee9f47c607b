//! Game mode identifiers, step types and feature counters

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameModeKind {
    /// Terminal marker, no mode
    None,
    /// Reel spin modes (base game and free spins)
    Spin,
}

/// Game mode identifier. Equality by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameMode {
    pub kind: GameModeKind,
    pub name: Cow<'static, str>,
}

impl GameMode {
    /// No further mode transition
    pub const NONE: GameMode = GameMode::new_static(GameModeKind::None, "None");
    pub const BASE_SPIN: GameMode = GameMode::new_static(GameModeKind::Spin, "BaseSpin");
    pub const FREE_SPINS_7: GameMode = GameMode::new_static(GameModeKind::Spin, "FreeSpins7");
    pub const FREE_SPINS_9: GameMode = GameMode::new_static(GameModeKind::Spin, "FreeSpins9");
    pub const FREE_SPINS_11: GameMode = GameMode::new_static(GameModeKind::Spin, "FreeSpins11");

    pub const fn new_static(kind: GameModeKind, name: &'static str) -> Self {
        Self {
            kind,
            name: Cow::Borrowed(name),
        }
    }

    pub fn new(kind: GameModeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Cow::Owned(name.into()),
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Free spins tier this mode represents, if any
    pub fn free_spins_awarded(&self) -> Option<u32> {
        if *self == Self::FREE_SPINS_7 {
            Some(7)
        } else if *self == Self::FREE_SPINS_9 {
            Some(9)
        } else if *self == Self::FREE_SPINS_11 {
            Some(11)
        } else {
            None
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// How a step came about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    /// First evaluation of a round
    InitialStep,
    /// Evaluation after a win-driven collapse
    Cascade,
    /// Free spins evaluation without a win; the next board is a full redraw
    VirtualRespin,
}

impl StepType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InitialStep => "InitialStep",
            Self::Cascade => "Cascade",
            Self::VirtualRespin => "VirtualRespin",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Named occurrence counter emitted per step
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feature(pub Cow<'static, str>);

impl Feature {
    /// A winning cascade step
    pub const AVALANCHE: Feature = Feature(Cow::Borrowed("Avalanche"));

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
