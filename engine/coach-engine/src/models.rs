//! Computed result objects returned by the engine.
//!
//! Everything here is derived and ephemeral: recomputed on demand from
//! storage snapshots, owned by the caller, never persisted. The one
//! persisted artifact (the simulation summary) lives in roster-core.

use roster_core::{Player, SpotStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Start/bench call for a single roster spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Start,
    Bench,
}

impl Recommendation {
    /// Uppercase label used in rationale lines.
    pub fn as_upper(&self) -> &'static str {
        match self {
            Recommendation::Start => "START",
            Recommendation::Bench => "BENCH",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recommendation::Start => "start",
            Recommendation::Bench => "bench",
        };
        write!(f, "{label}")
    }
}

/// One line of the optimized lineup: the spot, its blended projection, and
/// the call made for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub player_id: String,
    pub name: String,
    pub slot: String,
    pub status: SpotStatus,
    pub projected_points: f64,
    pub recommendation: Recommendation,
    pub rationale: String,
}

/// Start/bench recommendations for a whole roster with the aggregate value
/// improvement over the currently started lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedLineup {
    pub lineup: Vec<LineupEntry>,
    pub total_projection: f64,
    pub delta: f64,
    pub rationale: String,
}

/// A rosterable free agent with its component scores. The schedule score
/// is a structural placeholder (always 1.0) reserved for future
/// strength-of-schedule modeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiverCandidate {
    pub player: Player,
    pub ros_value: f64,
    pub scarcity_score: f64,
    pub team_fit_score: f64,
    pub bye_coverage_score: f64,
    pub schedule_score: f64,
    pub total_score: f64,
    pub explanation: String,
}

/// A proposed two-sided player swap that strictly improves the requesting
/// team's lineup value. The playoff-odds delta is a coarse heuristic
/// proxy, not a calibrated probability shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeProposal {
    pub offer_players: Vec<Player>,
    pub request_players: Vec<Player>,
    pub offer_value: f64,
    pub request_value: f64,
    pub lineup_delta: f64,
    pub playoff_odds_delta: f64,
    pub notes: String,
}

/// League-wide scoring pace for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPace {
    pub week: u16,
    pub pace: f64,
}
