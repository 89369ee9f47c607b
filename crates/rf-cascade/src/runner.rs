//! Round orchestration
//!
//! ```text
//! GameSession
//!     │
//!     └── GameModeRunners (GameMode → runner)
//!           ├── BaseSpin     SpinGameModeRunner<BaseSpinMode>
//!           ├── FreeSpins7   SpinGameModeRunner<FreeSpinsMode>
//!           ├── FreeSpins9   SpinGameModeRunner<FreeSpinsMode>
//!           └── FreeSpins11  SpinGameModeRunner<FreeSpinsMode>
//! ```
//!
//! A runner plays one round of its mode. The session plays the entry mode
//! and follows each round's next mode until none is left.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{ConfigLimits, GameConfig, GridSpec};
use crate::error::{RoundError, RoundResult};
use crate::mode::{Feature, GameMode};
use crate::modes::{BaseSpinMode, CascadeRules, FreeSpinsMode, SpinMode};
use crate::rng::RandomSource;
use crate::state::SpinState;
use crate::step::Step;

/// Upper bound on rounds chained in one session
pub const MAX_CHAINED_ROUNDS: usize = 64;

/// Result of one round in one mode
#[derive(Debug, Clone, Serialize)]
pub struct RoundOutcome {
    pub mode: GameMode,
    /// Steps in play order; the first is the initial step
    pub steps: Vec<Step>,
    pub total_win: f64,
    pub features: HashMap<Feature, u32>,
    /// Mode the round hands over to
    pub next_mode: GameMode,
}

impl RoundOutcome {
    pub fn last_step(&self) -> Option<&Step> {
        self.steps.last()
    }
}

/// Plays whole rounds of a single mode
pub trait GameModeRunner: Send + Sync {
    fn mode(&self) -> GameMode;

    fn play_round(&self, rng: &mut dyn RandomSource) -> RoundResult<RoundOutcome>;
}

/// Drives a [`SpinMode`] through a round
#[derive(Debug, Clone)]
pub struct SpinGameModeRunner<M> {
    spin_mode: M,
    grid: GridSpec,
    max_steps: usize,
}

impl<M: SpinMode> SpinGameModeRunner<M> {
    pub fn new(spin_mode: M, grid: GridSpec) -> Self {
        Self {
            spin_mode,
            grid,
            max_steps: 1000,
        }
    }

    /// Builder: cap on steps per round
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn spin_mode(&self) -> &M {
        &self.spin_mode
    }
}

impl<M: SpinMode> GameModeRunner for SpinGameModeRunner<M> {
    fn mode(&self) -> GameMode {
        self.spin_mode.current_mode()
    }

    fn play_round(&self, rng: &mut dyn RandomSource) -> RoundResult<RoundOutcome> {
        let mode = &self.spin_mode;
        let current = mode.current_mode();

        let board = mode.initialize_board(self.grid.reels, self.grid.rows, rng);
        let mut state = mode.initial_state();
        let mut step = mode.evaluate_step(board, &state, true);

        let mut steps = Vec::new();
        let mut features: HashMap<Feature, u32> = HashMap::new();
        let mut total_win = 0.0;

        loop {
            log::debug!(
                "{current}: step {} {} win={:.2} x{}",
                steps.len(),
                step.step_type(),
                step.step_win(),
                state.multiplier()
            );
            total_win += step.step_win();
            for (feature, count) in mode.count_feature_occurrences(&step) {
                *features.entry(feature).or_insert(0) += count;
            }

            if !mode.should_have_next_step(rng, &step, &state) {
                break;
            }
            if steps.len() + 1 >= self.max_steps {
                log::warn!("{current}: round stopped at {} steps", self.max_steps);
                return Err(RoundError::StepLimitExceeded {
                    mode: current,
                    limit: self.max_steps,
                });
            }

            let prepared = mode.prepare_board_for_next_step(rng, &step, &state)?;
            steps.push(step);
            state = prepared.state;
            step = mode.evaluate_step(prepared.board, &state, false);
        }

        let next_mode = mode.next_mode(&step)?;
        steps.push(step);

        log::info!(
            "{current}: round over after {} steps, win={total_win:.2}, next={next_mode}",
            steps.len()
        );

        Ok(RoundOutcome {
            mode: current,
            steps,
            total_win,
            features,
            next_mode,
        })
    }
}

/// Boxed runner for dynamic dispatch
pub type BoxedGameModeRunner = Box<dyn GameModeRunner + 'static>;

/// Mode → runner registry
#[derive(Default)]
pub struct GameModeRunners {
    runners: IndexMap<GameMode, BoxedGameModeRunner>,
}

impl GameModeRunners {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Base game plus the three free spins tiers on `grid`
    pub fn standard(grid: GridSpec) -> Self {
        Self::with_rules(grid, CascadeRules::standard(), 1000)
    }

    /// Standard modes sharing `rules`
    pub fn with_rules(grid: GridSpec, rules: CascadeRules, max_steps: usize) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(
            SpinGameModeRunner::new(
                BaseSpinMode::new(GameMode::BASE_SPIN).with_rules(rules.clone()),
                grid,
            )
            .with_max_steps(max_steps),
        ));
        for (mode, spins) in [
            (GameMode::FREE_SPINS_7, 7),
            (GameMode::FREE_SPINS_9, 9),
            (GameMode::FREE_SPINS_11, 11),
        ] {
            registry.register(Box::new(
                SpinGameModeRunner::new(
                    FreeSpinsMode::with_spins(mode, spins).with_rules(rules.clone()),
                    grid,
                )
                .with_max_steps(max_steps),
            ));
        }
        registry
    }

    /// Register a runner under its own mode. Returns the runner it replaced.
    pub fn register(&mut self, runner: BoxedGameModeRunner) -> Option<BoxedGameModeRunner> {
        self.runners.insert(runner.mode(), runner)
    }

    /// Runner for `mode`
    pub fn get(&self, mode: &GameMode) -> RoundResult<&dyn GameModeRunner> {
        self.runners
            .get(mode)
            .map(|r| r.as_ref())
            .ok_or_else(|| RoundError::UnknownMode(mode.clone()))
    }

    pub fn has(&self, mode: &GameMode) -> bool {
        self.runners.contains_key(mode)
    }

    /// Registered modes in registration order
    pub fn modes(&self) -> impl Iterator<Item = &GameMode> + '_ {
        self.runners.keys()
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }
}

/// Rounds played from one entry spin
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub rounds: Vec<RoundOutcome>,
    pub total_win: f64,
    pub features: HashMap<Feature, u32>,
}

/// Plays an entry mode and every mode it chains into
pub struct GameSession {
    runners: GameModeRunners,
    entry: GameMode,
}

impl GameSession {
    pub fn new(runners: GameModeRunners, entry: GameMode) -> Self {
        Self { runners, entry }
    }

    /// Standard session from a config. The config is validated against the
    /// default limits first.
    pub fn from_config(config: &GameConfig) -> RoundResult<Self> {
        config.validate(&ConfigLimits::default())?;
        let mut rules = CascadeRules::standard();
        if let Some(table) = &config.pay_table {
            rules = rules.with_pay_table(table.clone());
        }
        Ok(Self::new(
            GameModeRunners::with_rules(config.grid, rules, config.max_steps_per_round),
            GameMode::BASE_SPIN,
        ))
    }

    pub fn runners(&self) -> &GameModeRunners {
        &self.runners
    }

    pub fn play(&self, rng: &mut dyn RandomSource) -> RoundResult<SessionOutcome> {
        let mut rounds: Vec<RoundOutcome> = Vec::new();
        let mut mode = self.entry.clone();

        loop {
            if rounds.len() >= MAX_CHAINED_ROUNDS {
                log::warn!("{}: mode chain stopped at {MAX_CHAINED_ROUNDS} rounds", self.entry);
                return Err(RoundError::ChainLimitExceeded {
                    entry: self.entry.clone(),
                    limit: MAX_CHAINED_ROUNDS,
                });
            }

            let outcome = self.runners.get(&mode)?.play_round(rng)?;
            let next = outcome.next_mode.clone();
            rounds.push(outcome);

            if next.is_none() {
                break;
            }
            log::info!("transition {mode} -> {next}");
            mode = next;
        }

        let total_win = rounds.iter().map(|r| r.total_win).sum();
        let mut features = HashMap::new();
        for round in &rounds {
            for (feature, count) in &round.features {
                *features.entry(feature.clone()).or_insert(0) += count;
            }
        }

        Ok(SessionOutcome {
            rounds,
            total_win,
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::mode::StepType;
    use crate::rng::GameRng;
    use crate::state::BaseSpinState;
    use crate::symbols::Symbol as S;

    /// Base mode whose opening board is fixed
    struct FixedBoardMode {
        inner: BaseSpinMode,
        board: Board,
    }

    impl SpinMode for FixedBoardMode {
        type State = BaseSpinState;

        fn current_mode(&self) -> GameMode {
            self.inner.current_mode()
        }
        fn initialize_board(&self, _: usize, _: usize, _: &mut dyn RandomSource) -> Board {
            self.board.clone()
        }
        fn initial_state(&self) -> BaseSpinState {
            self.inner.initial_state()
        }
        fn evaluate_step(&self, board: Board, state: &BaseSpinState, initial: bool) -> Step {
            self.inner.evaluate_step(board, state, initial)
        }
        fn prepare_board_for_next_step(
            &self,
            rng: &mut dyn RandomSource,
            last_step: &Step,
            state: &BaseSpinState,
        ) -> RoundResult<crate::modes::PreparedStep<BaseSpinState>> {
            self.inner.prepare_board_for_next_step(rng, last_step, state)
        }
        fn should_have_next_step(
            &self,
            rng: &mut dyn RandomSource,
            step: &Step,
            state: &BaseSpinState,
        ) -> bool {
            self.inner.should_have_next_step(rng, step, state)
        }
        fn next_mode(&self, last_step: &Step) -> RoundResult<GameMode> {
            self.inner.next_mode(last_step)
        }
    }

    fn three_scatter_board() -> Board {
        Board::from_columns(vec![
            vec![S::SCATTER, S::LOW1, S::HI2],
            vec![S::LOW2, S::SCATTER, S::LOW3],
            vec![S::HI4, S::LOW4, S::SCATTER],
            vec![S::LOW1, S::HI2, S::LOW2],
            vec![S::HI3, S::LOW3, S::HI4],
        ])
        .unwrap()
    }

    #[test]
    fn test_dead_base_round_with_scatters_enters_free_spins() {
        let runner = SpinGameModeRunner::new(
            FixedBoardMode {
                inner: BaseSpinMode::default(),
                board: three_scatter_board(),
            },
            GridSpec::standard_5x3(),
        );
        let mut rng = GameRng::seeded(1);
        let outcome = runner.play_round(&mut rng).unwrap();

        assert_eq!(outcome.steps.len(), 1);
        assert_eq!(outcome.steps[0].step_type(), StepType::InitialStep);
        assert_eq!(outcome.total_win, 0.0);
        assert_eq!(outcome.next_mode, GameMode::FREE_SPINS_7);
        assert_eq!(rng.draws(), 0);

        let fs = FreeSpinsMode::new(outcome.next_mode).unwrap();
        assert_eq!(fs.initial_state().free_spins_remaining, 7);
    }

    #[test]
    fn test_free_spins_round_consumes_all_spins() {
        let runner = SpinGameModeRunner::new(
            FreeSpinsMode::new(GameMode::FREE_SPINS_9).unwrap(),
            GridSpec::standard_5x3(),
        );
        let mut rng = GameRng::seeded(99);
        let outcome = runner.play_round(&mut rng).unwrap();

        let last = outcome.last_step().unwrap();
        assert_eq!(last.state().free_spins_remaining(), Some(0));
        assert!(!last.has_wins());
        assert_eq!(outcome.next_mode, GameMode::NONE);

        let respins = outcome
            .steps
            .iter()
            .filter(|s| !s.has_wins())
            .count();
        // every non-winning step but the last consumed a spin
        assert_eq!(respins, 10);
    }

    #[test]
    fn test_step_limit() {
        let runner = SpinGameModeRunner::new(
            FreeSpinsMode::new(GameMode::FREE_SPINS_11).unwrap(),
            GridSpec::standard_5x3(),
        )
        .with_max_steps(3);
        let mut rng = GameRng::seeded(5);

        assert_eq!(
            runner.play_round(&mut rng).unwrap_err(),
            RoundError::StepLimitExceeded {
                mode: GameMode::FREE_SPINS_11,
                limit: 3
            }
        );
    }

    #[test]
    fn test_registry_lookup() {
        let registry = GameModeRunners::standard(GridSpec::default());
        assert_eq!(registry.len(), 4);
        assert!(registry.has(&GameMode::FREE_SPINS_11));
        assert_eq!(
            registry.modes().cloned().collect::<Vec<_>>(),
            vec![
                GameMode::BASE_SPIN,
                GameMode::FREE_SPINS_7,
                GameMode::FREE_SPINS_9,
                GameMode::FREE_SPINS_11
            ]
        );
        assert!(matches!(
            registry.get(&GameMode::NONE),
            Err(RoundError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_session_follows_transition() {
        let mut runners = GameModeRunners::standard(GridSpec::standard_5x3());
        runners.register(Box::new(SpinGameModeRunner::new(
            FixedBoardMode {
                inner: BaseSpinMode::default(),
                board: three_scatter_board(),
            },
            GridSpec::standard_5x3(),
        )));
        let session = GameSession::new(runners, GameMode::BASE_SPIN);
        let outcome = session.play(&mut GameRng::seeded(3)).unwrap();

        assert_eq!(outcome.rounds.len(), 2);
        assert_eq!(outcome.rounds[0].mode, GameMode::BASE_SPIN);
        assert_eq!(outcome.rounds[1].mode, GameMode::FREE_SPINS_7);
        assert_eq!(outcome.rounds[1].next_mode, GameMode::NONE);
        let sum: f64 = outcome.rounds.iter().map(|r| r.total_win).sum();
        assert!((outcome.total_win - sum).abs() < 1e-9);
    }

    /// Runner that ends every round by re-entering its own mode
    struct LoopingRunner;

    impl GameModeRunner for LoopingRunner {
        fn mode(&self) -> GameMode {
            GameMode::BASE_SPIN
        }

        fn play_round(&self, _rng: &mut dyn RandomSource) -> RoundResult<RoundOutcome> {
            Ok(RoundOutcome {
                mode: GameMode::BASE_SPIN,
                steps: Vec::new(),
                total_win: 0.0,
                features: HashMap::new(),
                next_mode: GameMode::BASE_SPIN,
            })
        }
    }

    #[test]
    fn test_session_chain_limit() {
        let mut runners = GameModeRunners::new();
        runners.register(Box::new(LoopingRunner));
        let session = GameSession::new(runners, GameMode::BASE_SPIN);

        assert_eq!(
            session.play(&mut GameRng::seeded(0)).unwrap_err(),
            RoundError::ChainLimitExceeded {
                entry: GameMode::BASE_SPIN,
                limit: MAX_CHAINED_ROUNDS
            }
        );
    }

    #[test]
    fn test_from_config_validates() {
        let config = GameConfig {
            max_steps_per_round: 0,
            ..Default::default()
        };
        assert!(matches!(
            GameSession::from_config(&config),
            Err(RoundError::Config(_))
        ));

        let config = GameConfig {
            grid: GridSpec { reels: 0, rows: 3 },
            ..Default::default()
        };
        assert!(GameSession::from_config(&config).is_err());
        assert!(GameSession::from_config(&GameConfig::default()).is_ok());
    }

    #[test]
    fn test_session_unknown_mode() {
        let session = GameSession::new(GameModeRunners::new(), GameMode::BASE_SPIN);
        assert_eq!(
            session.play(&mut GameRng::seeded(0)).unwrap_err(),
            RoundError::UnknownMode(GameMode::BASE_SPIN)
        );
    }
}
