//! Engine configuration.
//!
//! Every weight table the components consult lives here and is injected at
//! construction, so alternate weightings are a matter of building a
//! different config rather than patching module state.

use roster_core::{Position, SpotStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default scoring week the engine computes against.
pub const DEFAULT_CURRENT_WEEK: u16 = 8;

/// Default Monte Carlo trial count per matchup simulation.
pub const DEFAULT_SIMULATION_RUNS: u32 = 500;

/// Default number of waiver candidates returned.
pub const DEFAULT_WAIVER_LIMIT: usize = 5;

/// Configuration for the coach engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scoring week all components blend and evaluate against
    pub current_week: u16,

    /// Projection blending parameters
    pub blend: BlendParameters,

    /// Lineup optimization parameters
    pub lineup: LineupParameters,

    /// Waiver candidate ranking parameters
    pub waiver: WaiverParameters,

    /// Trade proposal search parameters
    pub trade: TradeParameters,

    /// Matchup simulation parameters
    pub sim: SimulationParameters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlendParameters {
    /// Fixed per-source weights for known projection feeds
    pub source_weights: HashMap<String, f64>,

    /// Uniform weight for sources absent from the table
    pub default_weight: f64,

    /// Source tag applied to synthesized consensus rows
    pub blended_source: String,

    /// Source tag applied to zero-valued no-data placeholders
    pub fallback_source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupParameters {
    /// Replacement-level points per slot label
    pub replacement_by_slot: HashMap<String, f64>,

    /// Generic replacement value when neither slot nor status is known
    pub replacement_default: f64,

    /// Share of the projection's excess over replacement credited to the
    /// start score (rewards clearing replacement by a wide margin)
    pub excess_weight: f64,

    /// Flat penalty applied when a spot is not already started
    /// (discourages flip-flopping on marginal calls)
    pub bench_risk_penalty: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaiverParameters {
    /// Weight of the blended point estimate in rest-of-season value
    pub ros_point_weight: f64,

    /// Weight of the blended ceiling in rest-of-season value
    pub ros_ceiling_weight: f64,

    /// Positions considered scarce
    pub scarcity_positions: Vec<Position>,

    /// Multiplier applied to scarce positions
    pub scarcity_multiplier: f64,

    /// Bye weeks where too many teams rest at once
    pub crowded_bye_weeks: Vec<u16>,

    /// Multiplier when the bye week avoids the crowded set
    pub bye_bonus: f64,

    /// Multiplier when the bye week lands in the crowded set
    pub bye_penalty: f64,

    /// Strength-of-schedule multiplier. Structural placeholder: always 1.0
    /// until schedule modeling exists
    pub schedule_multiplier: f64,

    /// Candidates returned when the caller does not pass a limit
    pub default_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeParameters {
    /// Largest package size enumerated on each side of a proposal
    pub max_package_size: usize,

    /// Playoff-odds delta per point of lineup delta (heuristic proxy)
    pub playoff_delta_rate: f64,

    /// Proposals kept after ranking across all opposing teams
    pub max_proposals: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Trials per simulation when the caller does not pass a count
    pub default_runs: u32,

    /// Variance floor: no player samples tighter than this std-dev
    pub min_std_dev: f64,

    /// Divisor turning the floor-to-ceiling spread into a std-dev
    pub spread_divisor: f64,

    /// Slope of the win-probability to playoff-odds transform
    pub playoff_odds_slope: f64,

    /// Explicit lower clamp on playoff odds
    pub playoff_odds_floor: f64,

    /// Upper clamp on playoff odds
    pub playoff_odds_ceiling: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut source_weights = HashMap::new();
        source_weights.insert("fantasycalc".to_string(), 0.6);
        source_weights.insert("nfldata".to_string(), 0.3);
        source_weights.insert("mock-blend".to_string(), 0.1);

        let mut replacement_by_slot = HashMap::new();
        replacement_by_slot.insert("QB".to_string(), 18.0);
        replacement_by_slot.insert("RB".to_string(), 12.0);
        replacement_by_slot.insert("WR".to_string(), 11.0);
        replacement_by_slot.insert("TE".to_string(), 8.0);
        replacement_by_slot.insert("FLEX".to_string(), 10.5);

        Self {
            current_week: DEFAULT_CURRENT_WEEK,
            blend: BlendParameters {
                source_weights,
                default_weight: 0.2,
                blended_source: "blended".to_string(),
                fallback_source: "fallback".to_string(),
            },
            lineup: LineupParameters {
                replacement_by_slot,
                replacement_default: 9.5,
                excess_weight: 0.35,
                bench_risk_penalty: 1.5,
            },
            waiver: WaiverParameters {
                ros_point_weight: 0.9,
                ros_ceiling_weight: 0.1,
                scarcity_positions: vec![Position::Rb, Position::Wr],
                scarcity_multiplier: 1.2,
                crowded_bye_weeks: vec![5, 9],
                bye_bonus: 1.1,
                bye_penalty: 0.9,
                schedule_multiplier: 1.0,
                default_limit: DEFAULT_WAIVER_LIMIT,
            },
            trade: TradeParameters {
                max_package_size: 2,
                playoff_delta_rate: 0.02,
                max_proposals: 3,
            },
            sim: SimulationParameters {
                default_runs: DEFAULT_SIMULATION_RUNS,
                min_std_dev: 2.5,
                spread_divisor: 3.0,
                playoff_odds_slope: 1.5,
                playoff_odds_floor: 0.01,
                playoff_odds_ceiling: 0.99,
            },
        }
    }
}

impl EngineConfig {
    /// Load configuration, applying environment overrides on top of the
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(week) = std::env::var("COACH_CURRENT_WEEK") {
            config.current_week = week.parse().unwrap_or(DEFAULT_CURRENT_WEEK);
        }

        if let Ok(runs) = std::env::var("COACH_SIMULATION_RUNS") {
            config.sim.default_runs = runs.parse().unwrap_or(DEFAULT_SIMULATION_RUNS);
        }

        if let Ok(limit) = std::env::var("COACH_WAIVER_LIMIT") {
            config.waiver.default_limit = limit.parse().unwrap_or(DEFAULT_WAIVER_LIMIT);
        }

        config
    }
}

impl BlendParameters {
    /// Weight for a projection source, falling back to the uniform default
    /// for sources not in the table.
    pub fn weight_for(&self, source: &str) -> f64 {
        self.source_weights.get(source).copied().unwrap_or(self.default_weight)
    }
}

impl LineupParameters {
    /// Replacement-level value for a spot: by slot label first, then by
    /// uppercased status, then the generic default.
    pub fn replacement_for(&self, slot: &str, status: SpotStatus) -> f64 {
        self.replacement_by_slot
            .get(slot)
            .or_else(|| self.replacement_by_slot.get(status.as_upper()))
            .copied()
            .unwrap_or(self.replacement_default)
    }
}

impl WaiverParameters {
    /// Scarcity multiplier for a position.
    pub fn scarcity_for(&self, position: Position) -> f64 {
        if self.scarcity_positions.contains(&position) {
            self.scarcity_multiplier
        } else {
            1.0
        }
    }

    /// Bye-coverage multiplier for a bye week (0 = no bye, which counts as
    /// avoiding the crowded weeks).
    pub fn bye_coverage_for(&self, bye_week: u16) -> f64 {
        if self.crowded_bye_weeks.contains(&bye_week) {
            self.bye_penalty
        } else {
            self.bye_bonus
        }
    }
}
