//! Game configuration
//!
//! Configs load from JSON or YAML and are validated against
//! [`ConfigLimits`] before use.
//!
//! ```rust,ignore
//! let config = GameConfig::from_json(r#"{ "grid": { "reels": 5, "rows": 3 }, "seed": 42 }"#)?;
//! let session = GameSession::from_config(&config)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{RoundError, RoundResult};
use crate::paytable::PayTable;

/// Grid specification (reels × rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of reels (columns)
    pub reels: usize,
    /// Number of visible rows per reel
    pub rows: usize,
}

impl GridSpec {
    /// Standard 5×3
    pub fn standard_5x3() -> Self {
        Self { reels: 5, rows: 3 }
    }

    /// Total grid positions
    pub fn total_positions(&self) -> usize {
        self.reels * self.rows
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::standard_5x3()
    }
}

fn default_max_steps() -> usize {
    1000
}

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub grid: GridSpec,

    /// RNG seed. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Guard against runaway rounds
    #[serde(default = "default_max_steps")]
    pub max_steps_per_round: usize,

    /// Pay table override for all modes
    #[serde(default)]
    pub pay_table: Option<PayTable>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            seed: None,
            max_steps_per_round: default_max_steps(),
            pay_table: None,
        }
    }
}

/// Validation limits
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    pub max_reels: usize,
    pub max_rows: usize,
    pub max_steps_per_round: usize,
    pub max_pay_value: f64,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_reels: 10,
            max_rows: 10,
            max_steps_per_round: 100_000,
            max_pay_value: 100_000.0,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> RoundResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RoundError::Config(format!("JSON parse error: {e}")))?;
        config.validate(&ConfigLimits::default())?;
        Ok(config)
    }

    /// Parse and validate a YAML config
    pub fn from_yaml(yaml: &str) -> RoundResult<Self> {
        let config: Self = serde_yml::from_str(yaml)
            .map_err(|e| RoundError::Config(format!("YAML parse error: {e}")))?;
        config.validate(&ConfigLimits::default())?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> RoundResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RoundError::Config(e.to_string()))
    }

    /// Check the config against `limits`
    pub fn validate(&self, limits: &ConfigLimits) -> RoundResult<()> {
        if self.grid.reels == 0 || self.grid.rows == 0 {
            return Err(RoundError::Config(format!(
                "Grid must be non-empty: {}x{}",
                self.grid.reels, self.grid.rows
            )));
        }
        if self.grid.reels > limits.max_reels {
            return Err(RoundError::Config(format!(
                "Too many reels: {} > {}",
                self.grid.reels, limits.max_reels
            )));
        }
        if self.grid.rows > limits.max_rows {
            return Err(RoundError::Config(format!(
                "Too many rows: {} > {}",
                self.grid.rows, limits.max_rows
            )));
        }
        if self.max_steps_per_round == 0 || self.max_steps_per_round > limits.max_steps_per_round {
            return Err(RoundError::Config(format!(
                "max_steps_per_round out of range: {}",
                self.max_steps_per_round
            )));
        }

        if let Some(table) = &self.pay_table {
            for symbol in table.symbols() {
                if symbol.is_empty() {
                    return Err(RoundError::Config("Empty symbol cannot pay".into()));
                }
                for tier in 3..=self.grid.reels.max(3) {
                    let pay = table.pay(symbol, tier);
                    if !pay.is_finite() || pay < 0.0 || pay > limits.max_pay_value {
                        return Err(RoundError::Config(format!(
                            "Invalid pay for {symbol} x{tier}: {pay}"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
